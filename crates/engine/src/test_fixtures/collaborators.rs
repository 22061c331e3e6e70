//! Recording fakes for collaborators owned by other subsystems.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use raidledger_domain::{
    BotTemplate, Character, EquipmentSlot, Inventory, Item, SessionId, Victim,
};

use super::profiles;
use crate::infrastructure::ports::{
    BotDetailCachePort, BotGenerationPort, ChatResponsePort, NotificationError, NotificationPort,
    NpcMessage, ProfileFixerPort, ProfileStoragePort, RepoError,
};

// =============================================================================
// Storage
// =============================================================================

/// Profile documents kept in memory, counting durable writes.
#[derive(Default)]
pub struct MemoryProfileStorage {
    pub documents: Mutex<BTreeMap<SessionId, String>>,
    pub writes: AtomicUsize,
}

impl MemoryProfileStorage {
    pub fn document(&self, session_id: &SessionId) -> Option<String> {
        self.documents.lock().unwrap().get(session_id).cloned()
    }
}

#[async_trait]
impl ProfileStoragePort for MemoryProfileStorage {
    async fn list_sessions(&self) -> Result<Vec<SessionId>, RepoError> {
        Ok(self.documents.lock().unwrap().keys().cloned().collect())
    }

    async fn read(&self, session_id: &SessionId) -> Result<Option<String>, RepoError> {
        Ok(self.document(session_id))
    }

    async fn write(&self, session_id: &SessionId, json: &str) -> Result<(), RepoError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.documents
            .lock()
            .unwrap()
            .insert(session_id.clone(), json.to_string());
        Ok(())
    }

    async fn remove(&self, session_id: &SessionId) -> Result<(), RepoError> {
        self.documents.lock().unwrap().remove(session_id);
        Ok(())
    }
}

// =============================================================================
// Mail and Chat
// =============================================================================

#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<(SessionId, NpcMessage)>>,
    pub fail: bool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn messages(&self) -> Vec<NpcMessage> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|(_, message)| message.clone())
            .collect()
    }
}

#[async_trait]
impl NotificationPort for RecordingNotifier {
    async fn send_npc_message(
        &self,
        session_id: &SessionId,
        message: NpcMessage,
    ) -> Result<(), NotificationError> {
        if self.fail {
            return Err(NotificationError::Delivery("mailbox offline".into()));
        }
        self.sent.lock().unwrap().push((session_id.clone(), message));
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingChat {
    pub killer_responses: AtomicUsize,
    pub victim_batches: Mutex<Vec<Vec<Victim>>>,
}

#[async_trait]
impl ChatResponsePort for RecordingChat {
    async fn send_killer_response(
        &self,
        _session_id: &SessionId,
        _character: &Character,
        _aggressor: Option<Value>,
    ) -> Result<(), NotificationError> {
        self.killer_responses.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn send_victim_response(
        &self,
        _session_id: &SessionId,
        victims: Vec<Victim>,
        _character: &Character,
    ) -> Result<(), NotificationError> {
        self.victim_batches.lock().unwrap().push(victims);
        Ok(())
    }
}

// =============================================================================
// Bots
// =============================================================================

/// Generates a fixed scav body: a vest, a backpack and a secure container
/// holding one item. Records every template it was asked to use.
pub struct FakeBotGenerator {
    pub templates: HashMap<String, BotTemplate>,
    pub generated_with: Mutex<Vec<BotTemplate>>,
    pub loot_cache_clears: AtomicUsize,
    pub has_room: bool,
}

impl Default for FakeBotGenerator {
    fn default() -> Self {
        Self {
            templates: HashMap::from([("assault".to_string(), BotTemplate::default())]),
            generated_with: Mutex::new(Vec::new()),
            loot_cache_clears: AtomicUsize::new(0),
            has_room: true,
        }
    }
}

impl FakeBotGenerator {
    pub fn with_template(mut self, role: &str, template: BotTemplate) -> Self {
        self.templates.insert(role.to_string(), template);
        self
    }

    pub fn last_template(&self) -> Option<BotTemplate> {
        self.generated_with.lock().unwrap().last().cloned()
    }
}

impl BotGenerationPort for FakeBotGenerator {
    fn template(&self, role: &str) -> Option<BotTemplate> {
        self.templates.get(role).cloned()
    }

    fn generate_player_scav(
        &self,
        _session_id: &SessionId,
        _role: &str,
        _difficulty: &str,
        template: &BotTemplate,
    ) -> Character {
        self.generated_with.lock().unwrap().push(template.clone());

        let mut scav = Character::new("generated", profiles::inventory("gen_"));
        scav.info.side = "Savage".into();
        profiles::equip(&mut scav, "gen_vest", profiles::VEST_TPL, "TacticalVest");
        profiles::equip(&mut scav, "gen_backpack", profiles::BACKPACK_TPL, "Backpack");
        profiles::equip(&mut scav, "gen_secure", profiles::SECURE_TPL, "SecuredContainer");
        profiles::put(&mut scav, "gen_secure_loot", profiles::LOOT_TPL, "gen_secure", "main");
        scav
    }

    fn add_item_to_containers(
        &self,
        inventory: &mut Inventory,
        mut item: Item,
        containers: &[EquipmentSlot],
    ) -> bool {
        if !self.has_room {
            return false;
        }
        let Some(container) = containers
            .iter()
            .find_map(|slot| inventory.equipped_in(slot.as_slot_id()))
            .map(|container| container.id.clone())
        else {
            return false;
        };
        item.parent_id = Some(container);
        item.slot_id = Some("main".into());
        inventory.items.push(item);
        true
    }

    fn clear_loot_cache(&self) {
        self.loot_cache_clears.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
pub struct CountingBotCache {
    pub clears: AtomicUsize,
}

impl BotDetailCachePort for CountingBotCache {
    fn clear(&self) {
        self.clears.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
pub struct CountingProfileFixer {
    pub calls: AtomicUsize,
}

impl ProfileFixerPort for CountingProfileFixer {
    fn fix_pmc_profile(&self, _character: &mut Character) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}
