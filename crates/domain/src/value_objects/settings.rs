//! Raid reconciliation settings value object
//!
//! Every group and field carries a serde default so a partial settings file
//! (or none at all) yields a usable configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::value_objects::{EquipmentSlot, ItemCountRange};
use raidledger_domain::{TemplateId, TraderId};

/// Trader multiplier used when a trader has no configured insurance multiplier.
pub const DEFAULT_INSURANCE_MULTIPLIER: f64 = 0.3;

/// Bot role whose template seeds every player scav.
pub const BASE_SCAV_ROLE: &str = "assault";

/// Template of the Terragroup Labs access keycard.
pub const LABS_ACCESS_CARD_TPL: &str = "5c94bbff86f7747ee735c08f";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RaidSettings {
    #[serde(default)]
    pub lost_on_death: LostOnDeathSettings,
    #[serde(default)]
    pub in_raid: InRaidSettings,
    #[serde(default)]
    pub insurance: InsuranceSettings,
    #[serde(default)]
    pub player_scav: PlayerScavSettings,
    #[serde(default)]
    pub health: HealthSettings,
}

// ============================================================================
// Loss on death
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LostOnDeathSettings {
    /// Equipment slot -> lost on death. Slots not listed are lost.
    /// `Pockets` refers to the pockets item itself; what is inside the
    /// pockets follows `loose_loot` and the special-slot rule.
    #[serde(default = "default_equipment_lost")]
    pub equipment: BTreeMap<EquipmentSlot, bool>,
    /// Quest items are lost and their pickup progress reset.
    #[serde(default = "default_true")]
    pub quest_items: bool,
    /// Loot one level inside the vest, pockets and backpack is lost.
    #[serde(default = "default_true")]
    pub loose_loot: bool,
}

impl Default for LostOnDeathSettings {
    fn default() -> Self {
        Self {
            equipment: default_equipment_lost(),
            quest_items: true,
            loose_loot: true,
        }
    }
}

impl LostOnDeathSettings {
    pub fn is_slot_lost(&self, slot: &str) -> bool {
        self.equipment
            .get(&EquipmentSlot::from_slot_id(slot))
            .copied()
            .unwrap_or(true)
    }
}

fn default_equipment_lost() -> BTreeMap<EquipmentSlot, bool> {
    use EquipmentSlot::*;
    [
        FirstPrimaryWeapon,
        SecondPrimaryWeapon,
        Holster,
        Scabbard,
        Compass,
        Headwear,
        Earpiece,
        Eyewear,
        FaceCover,
        ArmBand,
        ArmorVest,
        TacticalVest,
        Backpack,
    ]
    .into_iter()
    .map(|slot| (slot, true))
    .chain([(Pockets, false), (SecuredContainer, false)])
    .collect()
}

// ============================================================================
// In raid
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InRaidSettings {
    /// Fence standing gained for surviving a scav raid.
    #[serde(default = "default_scav_extract_gain")]
    pub scav_extract_gain: f64,
    #[serde(default)]
    pub keep_fir_secure_container_on_death: bool,
    /// Location whose gear is never insurable.
    #[serde(default = "default_laboratory_location")]
    pub laboratory_location: String,
}

impl Default for InRaidSettings {
    fn default() -> Self {
        Self {
            scav_extract_gain: default_scav_extract_gain(),
            keep_fir_secure_container_on_death: false,
            laboratory_location: default_laboratory_location(),
        }
    }
}

fn default_scav_extract_gain() -> f64 {
    0.01
}

fn default_laboratory_location() -> String {
    "laboratory".to_string()
}

// ============================================================================
// Insurance
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsuranceSettings {
    #[serde(default)]
    pub insurance_multiplier: BTreeMap<TraderId, f64>,
    /// Slots never returned by insurance.
    #[serde(default = "default_blacklisted_equipment")]
    pub blacklisted_equipment: Vec<EquipmentSlot>,
    /// Fixed return delay in seconds; 0 uses trader return windows.
    #[serde(default)]
    pub return_time_override_seconds: i64,
    /// Trader who tells the player uninsurable gear is gone.
    #[serde(default = "TraderId::prapor")]
    pub fallback_trader: TraderId,
}

impl Default for InsuranceSettings {
    fn default() -> Self {
        Self {
            insurance_multiplier: BTreeMap::new(),
            blacklisted_equipment: default_blacklisted_equipment(),
            return_time_override_seconds: 0,
            fallback_trader: TraderId::prapor(),
        }
    }
}

impl InsuranceSettings {
    pub fn is_blacklisted(&self, slot: &str) -> bool {
        let slot = EquipmentSlot::from_slot_id(slot);
        slot != EquipmentSlot::Unknown && self.blacklisted_equipment.contains(&slot)
    }
}

fn default_blacklisted_equipment() -> Vec<EquipmentSlot> {
    vec![
        EquipmentSlot::SecuredContainer,
        EquipmentSlot::Scabbard,
        EquipmentSlot::ArmBand,
        EquipmentSlot::Compass,
    ]
}

// ============================================================================
// Player scav
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerScavSettings {
    /// Karma level (0 to 6) -> loot tier.
    #[serde(default)]
    pub karma_levels: BTreeMap<i32, KarmaTier>,
    /// Lower-case bot role (scav victims) or side (PMC victims) -> standing delta.
    #[serde(default)]
    pub standing_for_kill: BTreeMap<String, f64>,
    #[serde(default = "default_base_cooldown_seconds")]
    pub base_cooldown_seconds: f64,
    /// Karma level (0 to 6) -> cooldown multiplier. Levels not listed use 1.0.
    #[serde(default)]
    pub fence_cooldown_modifiers: BTreeMap<i32, f64>,
    #[serde(default = "default_developer_cooldown_seconds")]
    pub developer_cooldown_seconds: f64,
    /// Rare item a scav may spawn with.
    #[serde(default = "default_access_item_tpl")]
    pub access_item_tpl: TemplateId,
}

impl Default for PlayerScavSettings {
    fn default() -> Self {
        Self {
            karma_levels: BTreeMap::new(),
            standing_for_kill: BTreeMap::new(),
            base_cooldown_seconds: default_base_cooldown_seconds(),
            fence_cooldown_modifiers: BTreeMap::new(),
            developer_cooldown_seconds: default_developer_cooldown_seconds(),
            access_item_tpl: default_access_item_tpl(),
        }
    }
}

impl PlayerScavSettings {
    pub fn fence_cooldown_modifier(&self, fence_level: i32) -> f64 {
        self.fence_cooldown_modifiers
            .get(&fence_level)
            .copied()
            .unwrap_or(1.0)
    }
}

fn default_base_cooldown_seconds() -> f64 {
    1500.0
}

fn default_developer_cooldown_seconds() -> f64 {
    10.0
}

fn default_access_item_tpl() -> TemplateId {
    TemplateId::new(LABS_ACCESS_CARD_TPL)
}

/// Loot configuration for one karma level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KarmaTier {
    /// Bot role whose loot pool replaces the base scav's.
    #[serde(default = "default_bot_type_for_loot")]
    pub bot_type_for_loot: String,
    #[serde(default)]
    pub modifiers: KarmaModifiers,
    /// Loot category -> item count override.
    #[serde(default)]
    pub item_limits: BTreeMap<String, ItemCountRange>,
    /// Equipment slot -> templates removed from the pool.
    #[serde(default)]
    pub equipment_blacklist: BTreeMap<EquipmentSlot, Vec<TemplateId>>,
    #[serde(default)]
    pub access_item_chance_percent: f64,
    /// Replaces the global extraction gain for scavs at this level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extraction_standing_bonus: Option<f64>,
}

impl Default for KarmaTier {
    fn default() -> Self {
        Self {
            bot_type_for_loot: default_bot_type_for_loot(),
            modifiers: KarmaModifiers::default(),
            item_limits: BTreeMap::new(),
            equipment_blacklist: BTreeMap::new(),
            access_item_chance_percent: 0.0,
            extraction_standing_bonus: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KarmaModifiers {
    /// Equipment slot -> additive spawn chance delta.
    #[serde(default)]
    pub equipment: BTreeMap<EquipmentSlot, f64>,
    /// Mod slot -> additive spawn chance delta.
    #[serde(default, rename = "mod")]
    pub mods: BTreeMap<String, f64>,
}

fn default_bot_type_for_loot() -> String {
    BASE_SCAV_ROLE.to_string()
}

// ============================================================================
// Health
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthSettings {
    #[serde(default = "default_true")]
    pub save_health: bool,
    /// Fraction of maximum a limb destroyed in raid comes back with.
    #[serde(default = "default_blacked_multiplier")]
    pub blacked_multiplier: f64,
}

impl Default for HealthSettings {
    fn default() -> Self {
        Self {
            save_health: true,
            blacked_multiplier: default_blacked_multiplier(),
        }
    }
}

fn default_blacked_multiplier() -> f64 {
    0.1
}

fn default_true() -> bool {
    true
}
