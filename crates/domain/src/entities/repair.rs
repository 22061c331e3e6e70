//! Best-effort repair of profiles read from disk
//!
//! Profiles are hand-edited by operators and modding tools. Repairs never
//! fail; each returns an event describing what was changed so the caller can
//! report it.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::entities::{Character, Profile};
use crate::value_objects::FenceStanding;
use raidledger_domain::{ItemId, TraderId};

#[derive(Debug, Clone, PartialEq)]
pub enum RepairEvent {
    DuplicateItem {
        character: &'static str,
        item_id: ItemId,
    },
    OrphanedItem {
        character: &'static str,
        item_id: ItemId,
    },
    CyclicItem {
        character: &'static str,
        item_id: ItemId,
    },
    DanglingInsurance {
        character: &'static str,
        item_id: ItemId,
    },
    FenceStandingClamped {
        character: &'static str,
        from: f64,
        to: f64,
    },
    EmptyInsuranceRecord {
        trader_id: TraderId,
    },
}

impl fmt::Display for RepairEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateItem { character, item_id } => {
                write!(f, "{character}: removed duplicate item {item_id}")
            }
            Self::OrphanedItem { character, item_id } => {
                write!(f, "{character}: removed item {item_id} with missing parent")
            }
            Self::CyclicItem { character, item_id } => {
                write!(f, "{character}: removed item {item_id} on a parent cycle")
            }
            Self::DanglingInsurance { character, item_id } => {
                write!(f, "{character}: dropped insurance for missing item {item_id}")
            }
            Self::FenceStandingClamped { character, from, to } => {
                write!(f, "{character}: fence standing {from} clamped to {to}")
            }
            Self::EmptyInsuranceRecord { trader_id } => {
                write!(f, "dropped empty insurance record from trader {trader_id}")
            }
        }
    }
}

/// Repairs `profile` in place.
pub fn repair_profile(profile: &mut Profile) -> Vec<RepairEvent> {
    let mut events = repair_character("pmc", &mut profile.characters.pmc);
    if let Some(scav) = profile.characters.scav.as_mut() {
        events.extend(repair_character("scav", scav));
    }

    profile.insurance.retain(|record| {
        if record.items.is_empty() {
            events.push(RepairEvent::EmptyInsuranceRecord {
                trader_id: record.trader_id.clone(),
            });
            false
        } else {
            true
        }
    });

    events
}

fn repair_character(label: &'static str, character: &mut Character) -> Vec<RepairEvent> {
    let mut events = Vec::new();
    remove_duplicate_items(label, character, &mut events);
    remove_unrooted_items(label, character, &mut events);

    let inventory = &character.inventory;
    character.insured_items.retain(|insured| {
        let present = inventory.contains(&insured.item_id);
        if !present {
            events.push(RepairEvent::DanglingInsurance {
                character: label,
                item_id: insured.item_id.clone(),
            });
        }
        present
    });

    if let Some(fence) = character.traders_info.get_mut(&TraderId::fence()) {
        let clamped = FenceStanding::new(fence.standing).value();
        if clamped != fence.standing {
            events.push(RepairEvent::FenceStandingClamped {
                character: label,
                from: fence.standing,
                to: clamped,
            });
            fence.standing = clamped;
        }
    }

    events
}

fn remove_duplicate_items(
    label: &'static str,
    character: &mut Character,
    events: &mut Vec<RepairEvent>,
) {
    let mut seen = HashSet::new();
    character.inventory.items.retain(|item| {
        if seen.insert(item.id.clone()) {
            true
        } else {
            events.push(RepairEvent::DuplicateItem {
                character: label,
                item_id: item.id.clone(),
            });
            false
        }
    });
}

enum Chain {
    Rooted,
    Orphaned,
    Cyclic,
}

/// Removes every item whose parent chain does not end at a parentless item.
fn remove_unrooted_items(
    label: &'static str,
    character: &mut Character,
    events: &mut Vec<RepairEvent>,
) {
    let inventory = &character.inventory;
    let parents: HashMap<&ItemId, Option<&ItemId>> = inventory
        .items
        .iter()
        .map(|item| (&item.id, item.parent_id.as_ref()))
        .collect();

    let mut doomed = HashSet::new();
    for item in &inventory.items {
        let mut visited = HashSet::new();
        let mut current = &item.id;
        let chain = loop {
            if !visited.insert(current) {
                break Chain::Cyclic;
            }
            match parents.get(current) {
                Some(Some(parent)) => current = *parent,
                Some(None) => break Chain::Rooted,
                // Root containers may be referenced without being listed.
                None if inventory.is_root_id(current) => break Chain::Rooted,
                None => break Chain::Orphaned,
            }
        };

        match chain {
            Chain::Rooted => {}
            Chain::Orphaned => {
                doomed.insert(item.id.clone());
                events.push(RepairEvent::OrphanedItem {
                    character: label,
                    item_id: item.id.clone(),
                });
            }
            Chain::Cyclic => {
                doomed.insert(item.id.clone());
                events.push(RepairEvent::CyclicItem {
                    character: label,
                    item_id: item.id.clone(),
                });
            }
        }
    }

    if !doomed.is_empty() {
        character
            .inventory
            .items
            .retain(|item| !doomed.contains(&item.id));
    }
}
