//! Inventory reconciliation.
//!
//! Folds the character snapshot the client submits after a raid into the
//! authoritative character: progression, found-in-raid provenance, fresh
//! item ids, the equipment subtree itself and post-raid health.

use std::collections::HashSet;
use std::sync::Arc;

use raidledger_domain::common::unix_seconds;
use raidledger_domain::{
    Character, CharacterKind, EquipmentSlot, ExitStatus, HealthSync, InsuredItem, Inventory, Item,
    ItemId, Profile, RaidOutcomeRequest, RaidSettings, HIDEOUT_SLOT,
};

use crate::infrastructure::ports::{
    ClockPort, ItemCatalog, LocationInfo, ProfileFixerPort, RandomPort,
};

use super::error::RaidError;

pub struct InventoryReconciler {
    items: Arc<dyn ItemCatalog>,
    fixer: Arc<dyn ProfileFixerPort>,
    clock: Arc<dyn ClockPort>,
    random: Arc<dyn RandomPort>,
    settings: Arc<RaidSettings>,
}

impl InventoryReconciler {
    pub fn new(
        items: Arc<dyn ItemCatalog>,
        fixer: Arc<dyn ProfileFixerPort>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
        settings: Arc<RaidSettings>,
    ) -> Self {
        Self {
            items,
            fixer,
            clock,
            random,
            settings,
        }
    }

    /// Copies progression from the submitted snapshot onto the `kind`
    /// character and closes out the raid.
    ///
    /// The map's one-time access key is taken out of the submitted
    /// inventory here, so it is gone once the snapshot is spliced in.
    pub fn merge_base_stats(
        &self,
        profile: &mut Profile,
        kind: CharacterKind,
        request: &mut RaidOutcomeRequest,
        location: Option<&LocationInfo>,
    ) -> Result<(), RaidError> {
        let session_id = profile.session_id().clone();

        if let Some(location) = location {
            if let Some(key_id) = remove_access_key(&mut request.profile.inventory, location) {
                tracing::debug!(
                    session_id = %session_id,
                    location = %location.id,
                    item_id = %key_id,
                    "Consumed map access key"
                );
            }
        }

        let character = profile
            .character_mut(kind)
            .ok_or_else(|| RaidError::ScavProfileMissing(session_id.clone()))?;
        let snapshot = &request.profile;

        character.info.level = snapshot.info.level;

        let mut skills = snapshot.skills.clone();
        let fatigue_reset = skills.reset_session_points();
        character.skills = skills;

        character.stats.eft = snapshot.stats.eft.clone();
        character.encyclopedia = snapshot.encyclopedia.clone();
        character.task_condition_counters = snapshot.task_condition_counters.clone();
        character.quests = snapshot.quests.clone();

        let effects_added = character.health.merge_effects(&snapshot.health.body_parts);

        let session_experience = character.stats.eft.total_session_experience;
        character.info.experience += session_experience;
        character.stats.eft.total_session_experience = 0;

        if kind == CharacterKind::Pmc {
            self.fixer.fix_pmc_profile(character);
        }

        profile.clear_raid_location();

        tracing::debug!(
            session_id = %session_id,
            character = ?kind,
            session_experience,
            fatigue_reset,
            effects_added,
            "Merged raid progression"
        );
        Ok(())
    }

    /// Sets or strips the found-in-raid flag on the snapshot's items.
    ///
    /// On a `survived` exit every item the character did not own before the
    /// raid is stamped; items it did own lose any stamp (PMC only, scav loot
    /// is always eligible). Any other exit strips the stamp from everything
    /// that is not a quest item. Returns how many items changed.
    pub fn mark_found_in_raid(
        &self,
        snapshot: &mut Character,
        pre_raid_ids: &HashSet<ItemId>,
        exit: ExitStatus,
        is_scav: bool,
    ) -> usize {
        if !exit.is_survived() {
            return self.strip_found_in_raid(snapshot);
        }

        let mut changed = 0;
        for item in snapshot.inventory.items.iter_mut().filter(|item| !item.is_root()) {
            if !is_scav && pre_raid_ids.contains(&item.id) {
                if item.has_found_in_raid_flag() {
                    item.clear_found_in_raid();
                    changed += 1;
                }
                continue;
            }
            if !item.is_found_in_raid() {
                item.set_found_in_raid(true);
                changed += 1;
            }
        }
        changed
    }

    fn strip_found_in_raid(&self, snapshot: &mut Character) -> usize {
        let protected: HashSet<ItemId> = if self.settings.in_raid.keep_fir_secure_container_on_death {
            snapshot
                .inventory
                .equipped_in(EquipmentSlot::SecuredContainer.as_slot_id())
                .map(|container| snapshot.inventory.descendant_ids(&container.id))
                .unwrap_or_default()
                .into_iter()
                .collect()
        } else {
            HashSet::new()
        };

        let mut changed = 0;
        for item in &mut snapshot.inventory.items {
            if !item.has_found_in_raid_flag()
                || protected.contains(&item.id)
                || self.items.is_quest_item(&item.tpl)
            {
                continue;
            }
            item.clear_found_in_raid();
            changed += 1;
        }
        changed
    }

    /// Gives the snapshot's items fresh ids so they cannot collide with ids
    /// already persisted. Insured items keep theirs.
    pub fn replace_ids(&self, snapshot: &mut Inventory, insured: &[InsuredItem]) {
        let preserve: HashSet<ItemId> = insured.iter().map(|i| i.item_id.clone()).collect();
        snapshot.replace_ids(&preserve, || ItemId::from_uuid(self.random.gen_uuid()));
    }

    /// Gives currency items without stack metadata an explicit count of 1.
    pub fn normalize_money_stacks(&self, items: &mut [Item]) -> usize {
        items
            .iter_mut()
            .filter(|item| self.items.is_money(&item.tpl))
            .map(|item| item.ensure_stack_count())
            .filter(|changed| *changed)
            .count()
    }

    /// Replaces the character's equipment, quest-raid and sorting-table
    /// subtrees with the snapshot's. Everything else (stash, insurance
    /// bookkeeping) is left alone.
    pub fn splice_inventory(&self, character: &mut Character, snapshot: &Inventory) {
        let inventory = &mut character.inventory;
        let replaced_roots = [
            inventory.equipment.clone(),
            inventory.quest_raid_items.clone(),
            inventory.sorting_table.clone(),
        ];

        let incoming_ids: HashSet<ItemId> = replaced_roots
            .iter()
            .flat_map(|root| snapshot.descendant_ids(root))
            .collect();
        let incoming: Vec<Item> = snapshot
            .items
            .iter()
            .filter(|item| incoming_ids.contains(&item.id))
            .cloned()
            .collect();

        for root in &replaced_roots {
            let removed = inventory.remove_with_children(root);
            // Root containers must survive even if the client omitted them.
            if !snapshot.contains(root) {
                if let Some(root_item) = removed.into_iter().find(|item| &item.id == root) {
                    inventory.items.push(root_item);
                }
            }
        }

        let remaining = std::mem::take(&mut inventory.items);
        inventory.items = incoming;
        inventory.items.extend(remaining);
        inventory.fast_panel = snapshot.fast_panel.clone();
    }

    /// Writes the post-raid health the client reported.
    pub fn save_vitality(&self, character: &mut Character, sync: &HealthSync) {
        let settings = &self.settings.health;
        if !settings.save_health {
            return;
        }

        let health = &mut character.health;
        for (part, synced) in &sync.health {
            let Some(limb) = health.body_parts.get_mut(part) else {
                continue;
            };
            let maximum = limb.health.maximum;
            limb.health.current = if synced.current <= 0.0 {
                (maximum * settings.blacked_multiplier).round()
            } else {
                synced.current.min(maximum)
            };
        }

        for (resource, value) in [
            (&mut health.hydration, sync.hydration),
            (&mut health.energy, sync.energy),
            (&mut health.temperature, sync.temperature),
        ] {
            if let Some(value) = value {
                resource.current = value.min(resource.maximum).max(0.0).round();
            }
        }

        health.update_time = unix_seconds(self.clock.now());
    }

    /// Restores the character to full health.
    pub fn reset_vitality(&self, character: &mut Character) {
        character.health.reset_to_full();
        character.health.update_time = unix_seconds(self.clock.now());
    }

    /// Moves what a scav raid earned that belongs to the account onto the
    /// PMC: encyclopedia entries and task condition counters.
    pub fn carry_over_scav_progress(&self, pmc: &mut Character, scav: &Character) {
        for (tpl, examined) in &scav.encyclopedia {
            pmc.encyclopedia.entry(tpl.clone()).or_insert(*examined);
        }
        for (counter_id, counter) in &scav.task_condition_counters {
            pmc.task_condition_counters
                .insert(counter_id.clone(), counter.clone());
        }
    }
}

/// Removes the first configured access key of the map from `inventory`,
/// unless it sits in the stash.
fn remove_access_key(inventory: &mut Inventory, location: &LocationInfo) -> Option<ItemId> {
    let key_tpl = location.access_keys.first()?;
    let key_id = inventory
        .items
        .iter()
        .find(|item| &item.tpl == key_tpl && !item.in_slot(HIDEOUT_SLOT))
        .map(|item| item.id.clone())?;
    inventory.remove_with_children(&key_id);
    Some(key_id)
}
