//! Death penalties: health reduction and gear loss.

use std::collections::HashSet;
use std::sync::Arc;

use raidledger_domain::{
    is_special_slot, Character, EquipmentSlot, ExitStatus, Inventory, Item, ItemId, RaidSettings,
};

use crate::infrastructure::ports::QuestCatalog;

pub struct DeathPenaltyEngine {
    quests: Arc<dyn QuestCatalog>,
    settings: Arc<RaidSettings>,
}

impl DeathPenaltyEngine {
    pub fn new(quests: Arc<dyn QuestCatalog>, settings: Arc<RaidSettings>) -> Self {
        Self { quests, settings }
    }

    /// Applies every death penalty to the character. Returns how many items
    /// were deleted.
    pub fn apply(&self, character: &mut Character, exit: ExitStatus) -> usize {
        self.reduce_health(character, exit);
        let deleted = self.delete_inventory(character);
        if self.settings.lost_on_death.quest_items {
            self.reset_carried_quest_items(character);
        }
        deleted
    }

    /// Sets every limb to `maximum * multiplier` for exits that carry a
    /// health multiplier. Returns false when the exit leaves health alone.
    pub fn reduce_health(&self, character: &mut Character, exit: ExitStatus) -> bool {
        let Some(multiplier) = exit.health_multiplier() else {
            return false;
        };
        character.health.reduce_to_multiplier(multiplier);
        tracing::debug!(character_id = %character.id, %exit, multiplier, "Reduced health after death");
        true
    }

    /// Removes everything the character loses by dying and clears the quick
    /// panel. Returns the number of items removed, descendants included.
    pub fn delete_inventory(&self, character: &mut Character) -> usize {
        let doomed = self.lost_roots(&character.inventory);

        let inventory = &mut character.inventory;
        let removed: usize = doomed
            .iter()
            .map(|id| inventory.remove_with_children(id).len())
            .sum();
        inventory.fast_panel.clear();

        tracing::info!(character_id = %character.id, removed, "Deleted inventory lost on death");
        removed
    }

    /// Every item `delete_inventory` would remove from `inventory`,
    /// descendants included.
    pub fn items_lost_on_death(&self, inventory: &Inventory) -> HashSet<ItemId> {
        self.lost_roots(inventory)
            .iter()
            .flat_map(|id| inventory.descendant_ids(id))
            .collect()
    }

    fn lost_roots(&self, inventory: &Inventory) -> Vec<ItemId> {
        let loose_loot = loose_loot_ids(inventory);
        let pockets = inventory
            .equipped_in(EquipmentSlot::Pockets.as_slot_id())
            .map(|pockets| pockets.id.clone());

        inventory
            .items
            .iter()
            .filter(|item| !self.is_kept_after_death(inventory, item, &loose_loot))
            .filter(|item| {
                item.has_parent(&inventory.equipment)
                    || item.has_parent(&inventory.quest_raid_items)
                    || pockets.as_ref().is_some_and(|pockets| item.has_parent(pockets))
            })
            .map(|item| item.id.clone())
            .collect()
    }

    fn is_kept_after_death(
        &self,
        inventory: &Inventory,
        item: &Item,
        loose_loot: &HashSet<ItemId>,
    ) -> bool {
        let policy = &self.settings.lost_on_death;
        if item.is_root() {
            return true;
        }
        if item.has_parent(&inventory.equipment)
            && !policy.is_slot_lost(item.slot().unwrap_or_default())
        {
            return true;
        }
        if item.has_parent(&inventory.quest_raid_items) && !policy.quest_items {
            return true;
        }
        if !policy.loose_loot && loose_loot.contains(&item.id) {
            return true;
        }
        item.slot().is_some_and(is_special_slot)
    }

    /// Takes back hand-in progress earned by quest items the character was
    /// carrying and empties the carried list.
    fn reset_carried_quest_items(&self, character: &mut Character) {
        let carried = std::mem::take(&mut character.stats.eft.carried_quest_items);
        if carried.is_empty() {
            return;
        }
        let active = character.active_quest_ids();
        for tpl in &carried {
            for condition in self.quests.find_item_conditions(tpl, &active) {
                if character.remove_completed_condition(&condition.quest_id, &condition.condition_id)
                {
                    tracing::debug!(
                        quest_id = %condition.quest_id,
                        condition_id = %condition.condition_id,
                        item_tpl = %tpl,
                        "Reset quest item condition"
                    );
                }
            }
        }
    }
}

/// Ids directly inside the vest, pockets and backpack.
fn loose_loot_ids(inventory: &Inventory) -> HashSet<ItemId> {
    EquipmentSlot::loot_containers()
        .iter()
        .filter_map(|slot| inventory.equipped_in(slot.as_slot_id()))
        .flat_map(|container| inventory.children_of(&container.id))
        .map(|item| item.id.clone())
        .collect()
}
