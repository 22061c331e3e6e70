//! The client's post-raid submission

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::entities::{BodyPart, Character};
use crate::value_objects::ExitStatus;

/// Everything the client reports when a raid ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaidOutcomeRequest {
    pub exit: ExitStatus,
    /// The character as it left the raid.
    pub profile: Character,
    #[serde(default)]
    pub is_player_scav: bool,
    #[serde(default)]
    pub health: HealthSync,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RaidOutcomeRequest {
    pub fn is_dead(&self) -> bool {
        self.exit.is_dead()
    }
}

/// Health values reported at the end of the raid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HealthSync {
    #[serde(default)]
    pub health: BTreeMap<BodyPart, SyncedBodyPart>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_alive: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hydration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SyncedBodyPart {
    pub current: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effects: Option<Map<String, Value>>,
}
