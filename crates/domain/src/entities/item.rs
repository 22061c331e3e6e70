//! Item entity - one node of a character's inventory forest
//!
//! Items reference their parent by id and name the slot they occupy in it.
//! Roots (equipment, stash, quest containers, sorting table) have no parent.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use raidledger_domain::{ItemId, TemplateId};

/// An inventory item as persisted in the profile and reported by the client.
///
/// Fields the reconciliation logic never reads are carried through `extra`
/// untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "_id")]
    pub id: ItemId,
    #[serde(rename = "_tpl")]
    pub tpl: TemplateId,
    #[serde(rename = "parentId", default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<ItemId>,
    #[serde(rename = "slotId", default, skip_serializing_if = "Option::is_none")]
    pub slot_id: Option<String>,
    /// Grid position or cartridge index; shape depends on the container.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upd: Option<ItemUpd>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Mutable per-instance metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemUpd {
    #[serde(
        rename = "StackObjectsCount",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub stack_objects_count: Option<u64>,
    /// Found-in-raid flag.
    #[serde(
        rename = "SpawnedInSession",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub spawned_in_session: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Item {
    pub fn new(id: impl Into<ItemId>, tpl: impl Into<TemplateId>) -> Self {
        Self {
            id: id.into(),
            tpl: tpl.into(),
            parent_id: None,
            slot_id: None,
            location: None,
            upd: None,
            extra: Map::new(),
        }
    }

    /// Builder-style parent assignment.
    pub fn with_parent(mut self, parent: impl Into<ItemId>, slot: impl Into<String>) -> Self {
        self.parent_id = Some(parent.into());
        self.slot_id = Some(slot.into());
        self
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn has_parent(&self, parent: &ItemId) -> bool {
        self.parent_id.as_ref() == Some(parent)
    }

    pub fn slot(&self) -> Option<&str> {
        self.slot_id.as_deref()
    }

    pub fn in_slot(&self, slot: &str) -> bool {
        self.slot() == Some(slot)
    }

    /// Metadata, created empty on first access.
    pub fn upd_mut(&mut self) -> &mut ItemUpd {
        self.upd.get_or_insert_with(ItemUpd::default)
    }

    pub fn is_found_in_raid(&self) -> bool {
        self.upd
            .as_ref()
            .and_then(|upd| upd.spawned_in_session)
            .unwrap_or(false)
    }

    pub fn set_found_in_raid(&mut self, found: bool) {
        self.upd_mut().spawned_in_session = Some(found);
    }

    /// Removes the found-in-raid flag entirely rather than writing `false`.
    pub fn clear_found_in_raid(&mut self) {
        if let Some(upd) = self.upd.as_mut() {
            upd.spawned_in_session = None;
        }
    }

    pub fn has_found_in_raid_flag(&self) -> bool {
        self.upd
            .as_ref()
            .is_some_and(|upd| upd.spawned_in_session.is_some())
    }

    /// Stack size; an item without stack metadata counts as one.
    pub fn stack_count(&self) -> u64 {
        self.upd
            .as_ref()
            .and_then(|upd| upd.stack_objects_count)
            .unwrap_or(1)
    }

    /// Writes an explicit stack count of 1 when none (or zero) is recorded.
    /// Returns true when the item was changed.
    pub fn ensure_stack_count(&mut self) -> bool {
        let upd = self.upd_mut();
        match upd.stack_objects_count {
            Some(count) if count > 0 => false,
            _ => {
                upd.stack_objects_count = Some(1);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_upd_reads_as_defaults() {
        let item = Item::new("a", "tpl");
        assert_eq!(item.stack_count(), 1);
        assert!(!item.is_found_in_raid());
        assert!(!item.has_found_in_raid_flag());
    }

    #[test]
    fn ensure_stack_count_only_fills_gaps() {
        let mut item = Item::new("a", "money");
        assert!(item.ensure_stack_count());
        assert_eq!(item.upd.as_ref().and_then(|u| u.stack_objects_count), Some(1));

        let mut stacked = Item::new("b", "money");
        stacked.upd_mut().stack_objects_count = Some(50_000);
        assert!(!stacked.ensure_stack_count());
        assert_eq!(stacked.stack_count(), 50_000);
    }

    #[test]
    fn unknown_fields_survive_a_round_trip() {
        let raw = r#"{"_id":"a","_tpl":"t","parentId":"p","slotId":"main","upd":{"Repairable":{"Durability":40},"SpawnedInSession":true},"custom":1}"#;
        let item: Item = serde_json::from_str(raw).unwrap();
        assert!(item.is_found_in_raid());
        assert_eq!(item.extra.get("custom"), Some(&Value::from(1)));

        let written = serde_json::to_value(&item).unwrap();
        assert_eq!(written["upd"]["Repairable"]["Durability"], Value::from(40));
        assert_eq!(written["slotId"], Value::from("main"));
    }

    #[test]
    fn clearing_found_in_raid_removes_the_key() {
        let mut item = Item::new("a", "t");
        item.set_found_in_raid(true);
        item.clear_found_in_raid();
        let written = serde_json::to_value(&item).unwrap();
        assert!(written["upd"].get("SpawnedInSession").is_none());
    }
}
