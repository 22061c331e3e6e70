//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Profile storage (could swap JSON files -> database)
//! - Game data catalogs (items, traders, locations, quests)
//! - Collaborators owned by other subsystems (bot generation, mail, chat)
//! - Clock/Random (for testing)

mod error;
mod external;
mod repos;
mod testing;
pub mod types;

// =============================================================================
// Storage and Catalog Ports
// =============================================================================
pub use repos::{ItemCatalog, LocationCatalog, ProfileStoragePort, QuestCatalog, TraderCatalog};

// =============================================================================
// Types from types module (re-export for visibility)
// =============================================================================
pub use types::{DialogueKind, InsuranceTerms, LocationInfo, NpcMessage, QuestConditionRef};

// =============================================================================
// External Collaborator Ports
// =============================================================================
pub use external::{
    BotDetailCachePort, BotGenerationPort, ChatResponsePort, NotificationPort, ProfileFixerPort,
};

// =============================================================================
// Error Types
// =============================================================================
pub use error::{NotificationError, RepoError};

// =============================================================================
// Testability Ports
// =============================================================================
pub use testing::{ClockPort, RandomPort};

#[cfg(test)]
pub use external::{
    MockBotDetailCachePort, MockBotGenerationPort, MockChatResponsePort, MockNotificationPort,
    MockProfileFixerPort,
};
#[cfg(test)]
pub use repos::{
    MockItemCatalog, MockLocationCatalog, MockProfileStoragePort, MockQuestCatalog,
    MockTraderCatalog,
};
#[cfg(test)]
pub use testing::MockClockPort;
