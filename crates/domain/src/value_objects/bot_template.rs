//! Bot templates as consumed by scav regeneration

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use raidledger_domain::TemplateId;

/// The bot template fields scav regeneration adjusts. Everything else is
/// carried in `extra` for the bot generator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BotTemplate {
    #[serde(default)]
    pub inventory: BotInventoryPool,
    #[serde(default)]
    pub chances: BotChances,
    #[serde(default)]
    pub generation: BotGeneration,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BotInventoryPool {
    /// Equipment slot -> item template -> spawn weight.
    #[serde(default)]
    pub equipment: BTreeMap<String, BTreeMap<TemplateId, f64>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BotChances {
    /// Equipment slot -> spawn chance percent.
    #[serde(default)]
    pub equipment: BTreeMap<String, f64>,
    /// Mod slot -> spawn chance percent.
    #[serde(default)]
    pub mods: BTreeMap<String, f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BotGeneration {
    /// Loot category -> how many items to generate.
    #[serde(default)]
    pub items: BTreeMap<String, ItemCountRange>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemCountRange {
    pub min: u32,
    pub max: u32,
}

impl BotTemplate {
    /// Replaces the loot-defining parts of this template with `source`'s.
    pub fn take_loot_from(&mut self, source: BotTemplate) {
        self.inventory = source.inventory;
        self.chances = source.chances;
        self.generation = source.generation;
    }
}
