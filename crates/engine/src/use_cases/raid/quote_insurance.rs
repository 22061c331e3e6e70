//! Insurance quote use case.
//!
//! Prices insurance for items the PMC is carrying, per trader.

use std::sync::Arc;

use raidledger_domain::{ItemId, SessionId, TraderId};

use crate::stores::ProfileStore;

use super::error::RaidError;
use super::insurance::InsuranceLedger;
use super::types::PremiumQuote;

pub struct QuoteInsurance {
    store: Arc<ProfileStore>,
    ledger: Arc<InsuranceLedger>,
}

impl QuoteInsurance {
    pub fn new(store: Arc<ProfileStore>, ledger: Arc<InsuranceLedger>) -> Self {
        Self { store, ledger }
    }

    /// Premium of every requested item with every requested trader.
    ///
    /// Items the PMC does not own are left out of the quote.
    pub async fn execute(
        &self,
        session_id: &SessionId,
        trader_ids: &[TraderId],
        item_ids: &[ItemId],
    ) -> Result<PremiumQuote, RaidError> {
        let profile = self
            .store
            .lock(session_id)
            .await
            .map_err(|e| RaidError::from_lookup(session_id, e))?;
        let pmc = profile.pmc();

        let items: Vec<_> = item_ids
            .iter()
            .filter_map(|id| {
                let item = pmc.inventory.find(id);
                if item.is_none() {
                    tracing::debug!(session_id = %session_id, item_id = %id, "Quoted item not in inventory");
                }
                item
            })
            .collect();

        let quote: PremiumQuote = trader_ids
            .iter()
            .map(|trader_id| {
                let premiums = items
                    .iter()
                    .map(|item| {
                        (
                            item.id.clone(),
                            self.ledger.get_premium(pmc, item, trader_id),
                        )
                    })
                    .collect();
                (trader_id.clone(), premiums)
            })
            .collect();

        tracing::debug!(
            session_id = %session_id,
            traders = trader_ids.len(),
            items = items.len(),
            "Quoted insurance premiums"
        );
        Ok(quote)
    }
}
