//! Ports for collaborators owned by other subsystems.

use async_trait::async_trait;
use serde_json::Value;

use raidledger_domain::{BotTemplate, Character, EquipmentSlot, Inventory, Item, SessionId, Victim};

use super::error::NotificationError;
use super::types::NpcMessage;

// =============================================================================
// Mail and Chat
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationPort: Send + Sync {
    async fn send_npc_message(
        &self,
        session_id: &SessionId,
        message: NpcMessage,
    ) -> Result<(), NotificationError>;
}

/// Chat reactions from PMC bots to raid kills.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatResponsePort: Send + Sync {
    async fn send_killer_response(
        &self,
        session_id: &SessionId,
        character: &Character,
        aggressor: Option<Value>,
    ) -> Result<(), NotificationError>;

    async fn send_victim_response(
        &self,
        session_id: &SessionId,
        victims: Vec<Victim>,
        character: &Character,
    ) -> Result<(), NotificationError>;
}

// =============================================================================
// Bot Generation
// =============================================================================

#[cfg_attr(test, mockall::automock)]
pub trait BotGenerationPort: Send + Sync {
    fn template(&self, role: &str) -> Option<BotTemplate>;

    fn generate_player_scav(
        &self,
        session_id: &SessionId,
        role: &str,
        difficulty: &str,
        template: &BotTemplate,
    ) -> Character;

    /// Places `item` in the first container with room. Returns false when
    /// nothing fits.
    fn add_item_to_containers(
        &self,
        inventory: &mut Inventory,
        item: Item,
        containers: &[EquipmentSlot],
    ) -> bool;

    fn clear_loot_cache(&self);
}

/// Cache of bot details recorded for the last raid.
#[cfg_attr(test, mockall::automock)]
pub trait BotDetailCachePort: Send + Sync {
    fn clear(&self);
}

#[cfg_attr(test, mockall::automock)]
pub trait ProfileFixerPort: Send + Sync {
    fn fix_pmc_profile(&self, character: &mut Character);
}
