//! Data carried across port boundaries.

use raidledger_domain::{Item, QuestId, SystemData, TemplateId, TraderId};

/// Dialogue template groups a trader can speak from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialogueKind {
    /// "I'll look for your gear."
    InsuranceStart,
    /// "Found your gear, come pick it up."
    InsuranceFound,
    /// "Your gear is gone."
    InsuranceFailed,
    /// Gear lost on a map with no insurance coverage.
    InsuranceFailedLabs,
}

/// A trader's insurance return window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InsuranceTerms {
    pub min_return_hours: i32,
    pub max_return_hours: i32,
    pub max_storage_time_hours: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocationInfo {
    pub id: String,
    pub name: String,
    pub insurance_enabled: bool,
    /// One-time access keys consumed on entry; only the first is enforced.
    pub access_keys: Vec<TemplateId>,
}

/// A quest's find-item condition satisfied by a carried quest item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestConditionRef {
    pub quest_id: QuestId,
    pub condition_id: String,
}

/// A localized message sent to the player from a trader.
#[derive(Debug, Clone, PartialEq)]
pub struct NpcMessage {
    pub trader_id: TraderId,
    pub message_type: u32,
    pub template_id: String,
    pub items: Vec<Item>,
    /// Seconds attached items stay claimable.
    pub max_storage_seconds: Option<i64>,
    pub system_data: Option<SystemData>,
}
