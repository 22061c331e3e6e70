//! Raid use cases.
//!
//! Turns what the client reports at the end of a raid into authoritative
//! profile changes: inventory reconciliation, death penalties, insurance and
//! scav karma.

mod death_penalty;
mod error;
mod insurance;
mod quote_insurance;
mod reconcile_inventory;
mod regenerate_scav;
mod resolve_outcome;
mod scav_karma;
mod types;

use std::sync::Arc;

pub use death_penalty::DeathPenaltyEngine;
pub use error::RaidError;
pub use insurance::{CapturedItem, InsuranceLedger};
pub use quote_insurance::QuoteInsurance;
pub use reconcile_inventory::InventoryReconciler;
pub use regenerate_scav::RegenerateScav;
pub use resolve_outcome::ResolveRaidOutcome;
pub use scav_karma::ScavKarmaEngine;
pub use types::{PremiumQuote, RaidResolution};

/// Container for raid use cases.
pub struct RaidUseCases {
    pub resolve_outcome: Arc<ResolveRaidOutcome>,
    pub quote_insurance: Arc<QuoteInsurance>,
    pub regenerate_scav: Arc<RegenerateScav>,
}

impl RaidUseCases {
    pub fn new(
        resolve_outcome: Arc<ResolveRaidOutcome>,
        quote_insurance: Arc<QuoteInsurance>,
        regenerate_scav: Arc<RegenerateScav>,
    ) -> Self {
        Self {
            resolve_outcome,
            quote_insurance,
            regenerate_scav,
        }
    }
}
