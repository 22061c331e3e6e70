//! Insurance capture and delivery scheduling.
//!
//! Lost insured gear moves through two steps. `store_lost_gear` captures it
//! into a per-session, per-trader bucket held in memory; `send_insured_items`
//! drains the bucket into `InsuranceRecord`s on the profile, which a delivery
//! scheduler elsewhere turns into mail once `scheduled_time` has passed.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use dashmap::DashMap;
use serde_json::Map;

use raidledger_domain::common::{mail_date_parts, unix_seconds};
use raidledger_domain::{
    is_pocket_slot, message_type, Character, InsuranceRecord, Inventory, Item, ItemId, Profile,
    RaidSettings, SessionId, SystemData, TraderId, DEFAULT_INSURANCE_MULTIPLIER, HIDEOUT_SLOT,
    INSURANCE_RETURN_TIME_BONUS,
};

use crate::infrastructure::ports::{
    ClockPort, DialogueKind, ItemCatalog, NotificationPort, NpcMessage, RandomPort, TraderCatalog,
};

const SECONDS_PER_HOUR: i64 = 3600;

/// An insured item on its way back, with the placement it had when lost.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedItem {
    pub item: Item,
    pub original_slot: Option<String>,
    pub original_location: Option<serde_json::Value>,
}

type TraderBuckets = BTreeMap<TraderId, Vec<CapturedItem>>;

pub struct InsuranceLedger {
    traders: Arc<dyn TraderCatalog>,
    items: Arc<dyn ItemCatalog>,
    notifications: Arc<dyn NotificationPort>,
    clock: Arc<dyn ClockPort>,
    random: Arc<dyn RandomPort>,
    settings: Arc<RaidSettings>,
    in_transit: DashMap<SessionId, TraderBuckets>,
}

impl InsuranceLedger {
    pub fn new(
        traders: Arc<dyn TraderCatalog>,
        items: Arc<dyn ItemCatalog>,
        notifications: Arc<dyn NotificationPort>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
        settings: Arc<RaidSettings>,
    ) -> Self {
        Self {
            traders,
            items,
            notifications,
            clock,
            random,
            settings,
            in_transit: DashMap::new(),
        }
    }

    /// Captures every insured pre-raid item that did not come back or is in
    /// `forfeited`, the gear a death is about to take. Returns how many items
    /// were captured.
    pub fn store_lost_gear(
        &self,
        session_id: &SessionId,
        character: &mut Character,
        snapshot: &Inventory,
        pre_raid_gear: &[Item],
        forfeited: &HashSet<ItemId>,
    ) -> usize {
        let lost: Vec<(TraderId, Item)> = character
            .insured_items
            .iter()
            .filter_map(|insured| {
                let item = pre_raid_gear.iter().find(|item| item.id == insured.item_id)?;
                (forfeited.contains(&item.id) || !snapshot.contains(&item.id))
                    .then(|| (insured.trader_id.clone(), item.clone()))
            })
            .collect();

        if lost.is_empty() {
            return 0;
        }
        self.add_gear_to_send(session_id, character, lost)
    }

    /// Puts lost items into the session's trader buckets and drops them from
    /// the character's insured list. Blacklisted slots are skipped entirely.
    pub fn add_gear_to_send(
        &self,
        session_id: &SessionId,
        character: &mut Character,
        gear: Vec<(TraderId, Item)>,
    ) -> usize {
        let equipment = character.inventory.equipment.clone();
        let mut buckets = self.in_transit.entry(session_id.clone()).or_default();
        let mut captured = 0;

        for (trader_id, mut item) in gear {
            if item
                .slot()
                .is_some_and(|slot| self.settings.insurance.is_blacklisted(slot))
            {
                tracing::debug!(
                    session_id = %session_id,
                    item_id = %item.id,
                    slot = ?item.slot_id,
                    "Skipping insured item in blacklisted slot"
                );
                continue;
            }

            let original_slot = item.slot_id.clone();
            let original_location = item.location.clone();
            let orphaned = match item.slot() {
                None => true,
                Some(slot) => is_pocket_slot(slot) || item.has_parent(&equipment),
            };
            if orphaned {
                item.slot_id = Some(HIDEOUT_SLOT.to_string());
                item.location = None;
            }
            item.clear_found_in_raid();

            character.insured_items.retain(|insured| insured.item_id != item.id);
            buckets.entry(trader_id).or_default().push(CapturedItem {
                item,
                original_slot,
                original_location,
            });
            captured += 1;
        }

        tracing::info!(session_id = %session_id, captured, "Captured lost insured gear");
        captured
    }

    /// Schedules delivery of everything captured for the session and tells
    /// the player each trader has started looking. Returns the number of
    /// insurance records appended.
    pub async fn send_insured_items(
        &self,
        session_id: &SessionId,
        profile: &mut Profile,
        location: &str,
    ) -> usize {
        let Some((_, buckets)) = self.in_transit.remove(session_id) else {
            return 0;
        };

        let (date, time) = mail_date_parts(self.clock.now());
        let system_data = SystemData {
            date: Some(date),
            time: Some(time),
            location: Some(location.to_string()),
        };

        let mut scheduled = 0;
        for (trader_id, captured) in buckets {
            if captured.is_empty() {
                continue;
            }

            let scheduled_time = self.insurance_return_time(profile.pmc(), &trader_id);
            let max_storage_time = self
                .traders
                .insurance_terms(&trader_id)
                .map(|terms| i64::from(terms.max_storage_time_hours) * SECONDS_PER_HOUR)
                .unwrap_or(0);

            let start = NpcMessage {
                trader_id: trader_id.clone(),
                message_type: message_type::NPC_TRADER,
                template_id: self.pick_dialogue(&trader_id, DialogueKind::InsuranceStart),
                items: Vec::new(),
                max_storage_seconds: Some(max_storage_time),
                system_data: Some(system_data.clone()),
            };
            if let Err(e) = self.notifications.send_npc_message(session_id, start).await {
                tracing::warn!(
                    session_id = %session_id,
                    trader_id = %trader_id,
                    error = %e,
                    "Failed to send insurance start message"
                );
            }

            let items = restore_placement(captured);
            tracing::info!(
                session_id = %session_id,
                trader_id = %trader_id,
                items = items.len(),
                scheduled_time,
                "Scheduled insurance return"
            );
            profile.insurance.push(InsuranceRecord {
                scheduled_time,
                trader_id: trader_id.clone(),
                max_storage_time,
                system_data: system_data.clone(),
                message_type: message_type::INSURANCE_RETURN,
                message_template_id: self.pick_dialogue(&trader_id, DialogueKind::InsuranceFound),
                items,
                extra: Map::new(),
            });
            scheduled += 1;
        }
        scheduled
    }

    /// Unix seconds at which the trader's parcel may be delivered.
    pub fn insurance_return_time(&self, character: &Character, trader_id: &TraderId) -> i64 {
        let now = unix_seconds(self.clock.now());

        let override_seconds = self.settings.insurance.return_time_override_seconds;
        if override_seconds > 0 {
            return now + override_seconds;
        }

        let Some(terms) = self.traders.insurance_terms(trader_id) else {
            tracing::warn!(trader_id = %trader_id, "Trader has no insurance terms, returning immediately");
            return now;
        };
        let min = terms.min_return_hours.saturating_mul(3600);
        let max = terms.max_return_hours.saturating_mul(3600);
        let drawn = f64::from(self.random.gen_range(min, max));

        let bonus = character.bonus_total(INSURANCE_RETURN_TIME_BONUS).abs();
        now + (drawn * (1.0 - bonus / 100.0)) as i64
    }

    /// Rouble cost of insuring `item` with `trader_id`.
    pub fn get_premium(&self, character: &Character, item: &Item, trader_id: &TraderId) -> i64 {
        let Some(price) = self.items.handbook_price(&item.tpl) else {
            tracing::warn!(item_tpl = %item.tpl, "Item has no handbook price, premium is zero");
            return 0;
        };

        let multiplier = match self.settings.insurance.insurance_multiplier.get(trader_id) {
            Some(multiplier) => *multiplier,
            None => {
                tracing::warn!(
                    trader_id = %trader_id,
                    default = DEFAULT_INSURANCE_MULTIPLIER,
                    "No insurance multiplier configured for trader"
                );
                DEFAULT_INSURANCE_MULTIPLIER
            }
        };

        let loyalty_level = character
            .traders_info
            .get(trader_id)
            .map(|info| info.loyalty_level)
            .filter(|level| *level > 0)
            .unwrap_or(1);
        let coefficient = self
            .traders
            .loyalty_insurance_coefficient(trader_id, loyalty_level);

        let mut premium = price * multiplier;
        if coefficient > 0.0 {
            premium *= 1.0 - coefficient / 100.0;
        }
        premium.round() as i64
    }

    /// Tells the player gear lost on `location` cannot be recovered.
    pub async fn send_lost_insurance_message(&self, session_id: &SessionId, location: &str) {
        let trader_id = self.settings.insurance.fallback_trader.clone();
        let kind = if location.eq_ignore_ascii_case(&self.settings.in_raid.laboratory_location) {
            DialogueKind::InsuranceFailedLabs
        } else {
            DialogueKind::InsuranceFailed
        };
        let message = NpcMessage {
            template_id: self.pick_dialogue(&trader_id, kind),
            trader_id,
            message_type: message_type::NPC_TRADER,
            items: Vec::new(),
            max_storage_seconds: None,
            system_data: Some(SystemData::location(location)),
        };
        if let Err(e) = self.notifications.send_npc_message(session_id, message).await {
            tracing::warn!(session_id = %session_id, error = %e, "Failed to send lost insurance message");
        }
    }

    /// Items captured for the session and not yet scheduled.
    pub fn pending_items(&self, session_id: &SessionId) -> usize {
        self.in_transit
            .get(session_id)
            .map(|buckets| buckets.values().map(Vec::len).sum())
            .unwrap_or(0)
    }

    /// Drops anything captured for the session without scheduling it.
    pub fn discard(&self, session_id: &SessionId) {
        self.in_transit.remove(session_id);
    }

    fn pick_dialogue(&self, trader_id: &TraderId, kind: DialogueKind) -> String {
        let templates = self.traders.dialogue(trader_id, kind);
        if templates.is_empty() {
            tracing::warn!(trader_id = %trader_id, ?kind, "Trader has no dialogue templates");
            return String::new();
        }
        let last = i32::try_from(templates.len() - 1).unwrap_or(i32::MAX);
        let index = usize::try_from(self.random.gen_range(0, last)).unwrap_or(0);
        templates
            .get(index)
            .or_else(|| templates.first())
            .cloned()
            .unwrap_or_default()
    }
}

/// Restores the placement of items whose parent travels with them; the rest
/// arrive loose in the stash.
fn restore_placement(captured: Vec<CapturedItem>) -> Vec<Item> {
    let ids: HashSet<ItemId> = captured.iter().map(|c| c.item.id.clone()).collect();
    captured
        .into_iter()
        .map(|CapturedItem { mut item, original_slot, original_location }| {
            if item.parent_id.as_ref().is_some_and(|parent| ids.contains(parent)) {
                item.slot_id = original_slot;
                item.location = original_location;
            } else {
                item.slot_id = Some(HIDEOUT_SLOT.to_string());
                item.location = None;
            }
            item
        })
        .collect()
}
