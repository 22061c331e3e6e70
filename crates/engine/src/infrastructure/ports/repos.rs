//! Storage and game data ports.

use async_trait::async_trait;
use raidledger_domain::{QuestId, SessionId, TemplateId, TraderId};

use super::error::RepoError;
use super::types::{DialogueKind, InsuranceTerms, LocationInfo, QuestConditionRef};

// =============================================================================
// Profile Storage
// =============================================================================

/// Durable storage of serialized profiles, one document per session.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileStoragePort: Send + Sync {
    async fn list_sessions(&self) -> Result<Vec<SessionId>, RepoError>;
    async fn read(&self, session_id: &SessionId) -> Result<Option<String>, RepoError>;
    async fn write(&self, session_id: &SessionId, json: &str) -> Result<(), RepoError>;
    async fn remove(&self, session_id: &SessionId) -> Result<(), RepoError>;
}

// =============================================================================
// Game Data Catalogs
// =============================================================================

#[cfg_attr(test, mockall::automock)]
pub trait ItemCatalog: Send + Sync {
    fn exists(&self, tpl: &TemplateId) -> bool;
    fn is_quest_item(&self, tpl: &TemplateId) -> bool;
    fn is_money(&self, tpl: &TemplateId) -> bool;
    /// Flea-independent reference price.
    fn handbook_price(&self, tpl: &TemplateId) -> Option<f64>;
}

#[cfg_attr(test, mockall::automock)]
pub trait TraderCatalog: Send + Sync {
    fn insurance_terms(&self, trader_id: &TraderId) -> Option<InsuranceTerms>;
    /// Insurance discount percent at the given loyalty level.
    fn loyalty_insurance_coefficient(&self, trader_id: &TraderId, loyalty_level: i32) -> f64;
    /// Message template ids for a dialogue group.
    fn dialogue(&self, trader_id: &TraderId, kind: DialogueKind) -> Vec<String>;
}

#[cfg_attr(test, mockall::automock)]
pub trait LocationCatalog: Send + Sync {
    /// Looks up a map by lower-case name.
    fn location(&self, name: &str) -> Option<LocationInfo>;
}

#[cfg_attr(test, mockall::automock)]
pub trait QuestCatalog: Send + Sync {
    /// Find-item conditions among `active_quests` satisfied by `item_tpl`.
    fn find_item_conditions(
        &self,
        item_tpl: &TemplateId,
        active_quests: &[QuestId],
    ) -> Vec<QuestConditionRef>;
}
