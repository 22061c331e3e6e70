//! Inventory - a character's item forest plus the ids of its root containers

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::entities::Item;
use crate::error::DomainError;
use crate::value_objects::PLAYER_GEAR_SLOTS;
use raidledger_domain::ItemId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inventory {
    #[serde(default)]
    pub items: Vec<Item>,
    /// Root of everything the character wears.
    pub equipment: ItemId,
    #[serde(default)]
    pub stash: ItemId,
    #[serde(default)]
    pub sorting_table: ItemId,
    #[serde(default)]
    pub quest_raid_items: ItemId,
    #[serde(default)]
    pub quest_stash_items: ItemId,
    /// Quick-access binding key -> item id.
    #[serde(default)]
    pub fast_panel: BTreeMap<String, ItemId>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Inventory {
    /// An inventory holding only its root containers.
    pub fn with_roots(
        equipment: impl Into<ItemId>,
        stash: impl Into<ItemId>,
        sorting_table: impl Into<ItemId>,
        quest_raid_items: impl Into<ItemId>,
        quest_stash_items: impl Into<ItemId>,
    ) -> Self {
        Self {
            items: Vec::new(),
            equipment: equipment.into(),
            stash: stash.into(),
            sorting_table: sorting_table.into(),
            quest_raid_items: quest_raid_items.into(),
            quest_stash_items: quest_stash_items.into(),
            fast_panel: BTreeMap::new(),
            extra: Map::new(),
        }
    }

    /// Ids that are containers of the inventory itself, never regular items.
    pub fn root_ids(&self) -> [&ItemId; 5] {
        [
            &self.equipment,
            &self.stash,
            &self.sorting_table,
            &self.quest_raid_items,
            &self.quest_stash_items,
        ]
    }

    pub fn is_root_id(&self, id: &ItemId) -> bool {
        self.root_ids().contains(&id)
    }

    pub fn find(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn find_mut(&mut self, id: &ItemId) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| &item.id == id)
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.items.iter().any(|item| &item.id == id)
    }

    pub fn item_ids(&self) -> HashSet<ItemId> {
        self.items.iter().map(|item| item.id.clone()).collect()
    }

    /// Direct children of `parent`, in inventory order.
    pub fn children_of<'a>(&'a self, parent: &'a ItemId) -> impl Iterator<Item = &'a Item> + 'a {
        self.items.iter().filter(move |item| item.has_parent(parent))
    }

    /// The item equipped directly under the equipment root in `slot`.
    pub fn equipped_in(&self, slot: &str) -> Option<&Item> {
        self.children_of(&self.equipment).find(|item| item.in_slot(slot))
    }

    /// `root` and every item below it. Tolerates parent cycles.
    pub fn descendant_ids(&self, root: &ItemId) -> Vec<ItemId> {
        let mut by_parent: HashMap<&ItemId, Vec<&ItemId>> = HashMap::new();
        for item in &self.items {
            if let Some(parent) = &item.parent_id {
                by_parent.entry(parent).or_default().push(&item.id);
            }
        }

        let mut seen: HashSet<ItemId> = HashSet::new();
        let mut ordered = Vec::new();
        let mut queue = VecDeque::from([root.clone()]);
        while let Some(id) = queue.pop_front() {
            if !seen.insert(id.clone()) {
                continue;
            }
            if let Some(children) = by_parent.get(&id) {
                queue.extend(children.iter().map(|child| (*child).clone()));
            }
            ordered.push(id);
        }
        ordered
    }

    /// Removes `root` and its descendants, returning what was removed.
    pub fn remove_with_children(&mut self, root: &ItemId) -> Vec<Item> {
        let doomed: HashSet<ItemId> = self.descendant_ids(root).into_iter().collect();
        let (removed, kept): (Vec<Item>, Vec<Item>) = std::mem::take(&mut self.items)
            .into_iter()
            .partition(|item| doomed.contains(&item.id));
        self.items = kept;
        removed
    }

    /// Items a player carries into a raid: everything in the gear slots,
    /// the pocket grids and special slots, with all their contents.
    pub fn player_gear(&self) -> Vec<Item> {
        let mut gear: Vec<&Item> = self
            .items
            .iter()
            .filter(|item| {
                item.slot()
                    .is_some_and(|slot| PLAYER_GEAR_SLOTS.contains(&slot))
            })
            .collect();

        let mut seen: HashSet<&ItemId> = gear.iter().copied().map(|item| &item.id).collect();
        let mut frontier: Vec<&ItemId> = gear.iter().copied().map(|item| &item.id).collect();
        while !frontier.is_empty() {
            let children: Vec<&Item> = self
                .items
                .iter()
                .filter(|item| {
                    item.parent_id
                        .as_ref()
                        .is_some_and(|parent| frontier.contains(&parent))
                        && !seen.contains(&item.id)
                })
                .collect();
            frontier = children.iter().copied().map(|item| &item.id).collect();
            for child in children {
                seen.insert(&child.id);
                gear.push(child);
            }
        }

        gear.into_iter().cloned().collect()
    }

    /// Checks the forest invariants: unique ids, every parent resolves to a
    /// listed item (or a root container id) and no item sits on a cycle.
    pub fn check_integrity(&self) -> Result<(), DomainError> {
        let mut parents: HashMap<&ItemId, Option<&ItemId>> = HashMap::new();
        for item in &self.items {
            if parents.insert(&item.id, item.parent_id.as_ref()).is_some() {
                return Err(DomainError::inventory(format!("duplicate item id {}", item.id)));
            }
        }

        for item in &self.items {
            let mut seen = HashSet::new();
            let mut current = &item.id;
            while let Some(Some(parent)) = parents.get(current) {
                if !seen.insert(current) {
                    return Err(DomainError::inventory(format!(
                        "item {} sits on a parent cycle",
                        item.id
                    )));
                }
                current = *parent;
            }
            if !parents.contains_key(current) && !self.is_root_id(current) {
                return Err(DomainError::inventory(format!(
                    "item {} has missing ancestor {current}",
                    item.id
                )));
            }
        }
        Ok(())
    }

    /// Gives every non-root item a fresh id, keeping parent links and quick
    /// panel bindings pointing at the renamed items.
    ///
    /// Items in `preserve` (insured items) keep their ids so insurance
    /// bookkeeping still resolves after the raid.
    pub fn replace_ids(
        &mut self,
        preserve: &HashSet<ItemId>,
        mut next_id: impl FnMut() -> ItemId,
    ) {
        let mut renamed: HashMap<ItemId, ItemId> = HashMap::new();
        for item in &self.items {
            if preserve.contains(&item.id) || self.is_root_id(&item.id) {
                continue;
            }
            renamed.insert(item.id.clone(), next_id());
        }

        for item in &mut self.items {
            if let Some(new_id) = renamed.get(&item.id) {
                item.id = new_id.clone();
            }
            if let Some(parent) = item.parent_id.as_mut() {
                if let Some(new_parent) = renamed.get(parent) {
                    *parent = new_parent.clone();
                }
            }
        }

        for bound in self.fast_panel.values_mut() {
            if let Some(new_id) = renamed.get(bound) {
                *bound = new_id.clone();
            }
        }
    }
}
