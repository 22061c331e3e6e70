//! Regenerate scav use case.
//!
//! Generates a new player scav for a stored session outside of raid
//! resolution, e.g. when a profile is created without one.

use std::sync::Arc;

use raidledger_domain::SessionId;

use crate::stores::{ProfileStore, SaveOutcome};

use super::error::RaidError;
use super::scav_karma::ScavKarmaEngine;

pub struct RegenerateScav {
    store: Arc<ProfileStore>,
    karma: Arc<ScavKarmaEngine>,
}

impl RegenerateScav {
    pub fn new(store: Arc<ProfileStore>, karma: Arc<ScavKarmaEngine>) -> Self {
        Self { store, karma }
    }

    pub async fn execute(&self, session_id: &SessionId) -> Result<SaveOutcome, RaidError> {
        let mut profile = self
            .store
            .lock(session_id)
            .await
            .map_err(|e| RaidError::from_lookup(session_id, e))?;

        self.karma.regenerate(session_id, &mut profile)?;
        let saved = self.store.save_profile(&mut profile).await?;
        Ok(saved)
    }
}
