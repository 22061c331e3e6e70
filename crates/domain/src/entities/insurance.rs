//! Insurance records - matured losses waiting for the delivery scheduler

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::entities::Item;
use raidledger_domain::TraderId;

/// Mail message types used by insurance flows.
pub mod message_type {
    pub const NPC_TRADER: u32 = 2;
    pub const INSURANCE_RETURN: u32 = 8;
}

/// Context attached to insurance mail, rendered into the message text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl SystemData {
    pub fn location(location: impl Into<String>) -> Self {
        Self {
            location: Some(location.into()),
            ..Self::default()
        }
    }
}

/// A scheduled insurance parcel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsuranceRecord {
    /// Unix seconds at which the parcel may be delivered.
    pub scheduled_time: i64,
    pub trader_id: TraderId,
    /// Seconds the parcel stays claimable once delivered.
    pub max_storage_time: i64,
    #[serde(default)]
    pub system_data: SystemData,
    pub message_type: u32,
    pub message_template_id: String,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
