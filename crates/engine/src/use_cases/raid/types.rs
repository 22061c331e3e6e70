//! Raid use case result types.

use std::collections::BTreeMap;

use raidledger_domain::{CharacterKind, ExitStatus, ItemId, SessionId, TraderId};

use crate::stores::SaveOutcome;

/// What a raid resolution changed.
#[derive(Debug, Clone, PartialEq)]
pub struct RaidResolution {
    pub session_id: SessionId,
    pub character: CharacterKind,
    pub exit: ExitStatus,
    pub died: bool,
    /// Insurance records appended to the profile's delivery queue.
    pub insurance_records: usize,
    /// Fence standing after a scav raid.
    pub fence_standing: Option<f64>,
    pub scav_regenerated: bool,
    pub saved: SaveOutcome,
}

/// Premiums per trader, per item.
pub type PremiumQuote = BTreeMap<TraderId, BTreeMap<ItemId, i64>>;
