//! Character entity - a PMC or Scav body with its inventory and progression

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::entities::{Health, Inventory};
use raidledger_domain::{CharacterId, ItemId, QuestId, TemplateId, TraderId};

/// Bonus type that shortens insurance return times.
pub const INSURANCE_RETURN_TIME_BONUS: &str = "InsuranceReturnTime";
/// Bonus type that changes the scav cooldown.
pub const SCAV_COOLDOWN_TIMER_BONUS: &str = "ScavCooldownTimer";

/// Overall counter decremented when a USEC leaves Lighthouse.
pub const USEC_RAID_REMAIN_KILLS: &str = "UsecRaidRemainKills";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Character {
    #[serde(rename = "_id")]
    pub id: CharacterId,
    /// Account id.
    #[serde(rename = "aid", default)]
    pub aid: Value,
    /// Id reserved for this PMC's scav character.
    #[serde(rename = "savage", default, skip_serializing_if = "Option::is_none")]
    pub savage: Option<CharacterId>,
    pub info: CharacterInfo,
    pub health: Health,
    pub inventory: Inventory,
    #[serde(default)]
    pub skills: Skills,
    #[serde(default)]
    pub stats: Stats,
    #[serde(default)]
    pub encyclopedia: BTreeMap<String, bool>,
    #[serde(default)]
    pub task_condition_counters: BTreeMap<String, Value>,
    #[serde(default)]
    pub insured_items: Vec<InsuredItem>,
    #[serde(default)]
    pub quests: Vec<Quest>,
    #[serde(default)]
    pub traders_info: BTreeMap<TraderId, TraderInfo>,
    #[serde(default)]
    pub bonuses: Vec<Bonus>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CharacterInfo {
    #[serde(default)]
    pub nickname: String,
    /// `Usec`, `Bear` or `Savage`.
    #[serde(default)]
    pub side: String,
    #[serde(default)]
    pub level: i32,
    #[serde(default)]
    pub experience: i64,
    /// Unix seconds before which the scav cannot be played.
    #[serde(default)]
    pub savage_lock_time: f64,
    #[serde(default)]
    pub last_time_played_as_savage: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Skills {
    #[serde(default)]
    pub common: Vec<CommonSkill>,
    #[serde(default)]
    pub mastering: Vec<Value>,
    #[serde(default)]
    pub points: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Skills {
    /// Zeroes the per-raid fatigue counters. Returns how many were non-zero.
    pub fn reset_session_points(&mut self) -> usize {
        let mut reset = 0;
        for skill in &mut self.common {
            if skill.points_earned_during_session != 0.0 {
                skill.points_earned_during_session = 0.0;
                reset += 1;
            }
        }
        reset
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CommonSkill {
    pub id: String,
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub points_earned_during_session: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Stats {
    #[serde(default)]
    pub eft: EftStats,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EftStats {
    #[serde(default)]
    pub total_session_experience: i64,
    #[serde(default)]
    pub victims: Vec<Victim>,
    /// Whoever killed the player, as reported by the client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggressor: Option<Value>,
    #[serde(default)]
    pub carried_quest_items: Vec<TemplateId>,
    #[serde(default)]
    pub overall_counters: Counters,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Counters {
    #[serde(default)]
    pub items: Vec<CounterItem>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CounterItem {
    #[serde(default)]
    pub key: Vec<String>,
    #[serde(default)]
    pub value: f64,
}

impl Counters {
    pub fn find_mut(&mut self, key: &str) -> Option<&mut CounterItem> {
        self.items
            .iter_mut()
            .find(|counter| counter.key.iter().any(|k| k == key))
    }
}

/// A kill recorded during the raid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Victim {
    #[serde(default)]
    pub name: String,
    /// `Savage`, `Usec` or `Bear`.
    #[serde(default)]
    pub side: String,
    /// Bot role, e.g. `assault`, `pmcBot`, `sptUsec`.
    #[serde(default)]
    pub role: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Victim {
    pub fn is_scav(&self) -> bool {
        self.side.eq_ignore_ascii_case("savage")
    }

    /// Whether the victim was a player-controlled-style PMC bot.
    pub fn is_pmc_bot(&self) -> bool {
        let role = self.role.to_lowercase();
        role == "sptbear" || role == "sptusec"
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsuredItem {
    #[serde(rename = "tid")]
    pub trader_id: TraderId,
    #[serde(rename = "itemId")]
    pub item_id: ItemId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestStatus {
    Locked,
    AvailableForStart,
    Started,
    AvailableForFinish,
    Success,
    Fail,
    FailRestartable,
    MarkedAsFailed,
    Expired,
    AvailableAfter,
    #[serde(other)]
    Unknown,
}

impl QuestStatus {
    /// Quests whose progress can still change.
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::AvailableForStart | Self::Success | Self::Expired)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quest {
    pub qid: QuestId,
    pub status: QuestStatus,
    #[serde(default)]
    pub status_timers: Map<String, Value>,
    #[serde(default)]
    pub completed_conditions: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraderInfo {
    #[serde(default)]
    pub loyalty_level: i32,
    #[serde(default)]
    pub standing: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bonus {
    #[serde(rename = "type")]
    pub bonus_type: String,
    #[serde(default)]
    pub value: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Bonus {
    pub fn new(bonus_type: impl Into<String>, value: f64) -> Self {
        Self {
            bonus_type: bonus_type.into(),
            value,
            extra: Map::new(),
        }
    }
}

impl Character {
    pub fn new(id: impl Into<CharacterId>, inventory: Inventory) -> Self {
        Self {
            id: id.into(),
            aid: Value::Null,
            savage: None,
            info: CharacterInfo::default(),
            health: Health::default(),
            inventory,
            skills: Skills::default(),
            stats: Stats::default(),
            encyclopedia: BTreeMap::new(),
            task_condition_counters: BTreeMap::new(),
            insured_items: Vec::new(),
            quests: Vec::new(),
            traders_info: BTreeMap::new(),
            bonuses: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Sum of every bonus of the given type.
    pub fn bonus_total(&self, bonus_type: &str) -> f64 {
        self.bonuses
            .iter()
            .filter(|bonus| bonus.bonus_type == bonus_type)
            .map(|bonus| bonus.value)
            .sum()
    }

    pub fn fence_info(&self) -> Option<&TraderInfo> {
        self.traders_info.get(&TraderId::fence())
    }

    pub fn fence_info_mut(&mut self) -> &mut TraderInfo {
        self.traders_info.entry(TraderId::fence()).or_default()
    }

    pub fn is_insured(&self, item_id: &ItemId) -> bool {
        self.insured_items.iter().any(|insured| &insured.item_id == item_id)
    }

    pub fn active_quest_ids(&self) -> Vec<QuestId> {
        self.quests
            .iter()
            .filter(|quest| quest.status.is_active())
            .map(|quest| quest.qid.clone())
            .collect()
    }

    /// Forgets a completed quest condition. Returns true if it was recorded.
    pub fn remove_completed_condition(&mut self, quest_id: &QuestId, condition_id: &str) -> bool {
        let Some(quest) = self.quests.iter_mut().find(|quest| &quest.qid == quest_id) else {
            return false;
        };
        let before = quest.completed_conditions.len();
        quest.completed_conditions.retain(|c| c != condition_id);
        quest.completed_conditions.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn character() -> Character {
        Character::new(
            "pmc",
            Inventory::with_roots("equip", "stash", "sort", "qraid", "qstash"),
        )
    }

    #[test]
    fn bonus_total_sums_every_matching_bonus() {
        let mut pmc = character();
        pmc.bonuses.push(Bonus::new(SCAV_COOLDOWN_TIMER_BONUS, -10.0));
        pmc.bonuses.push(Bonus::new(SCAV_COOLDOWN_TIMER_BONUS, -5.0));
        assert_eq!(pmc.bonus_total(SCAV_COOLDOWN_TIMER_BONUS), -15.0);
        assert_eq!(pmc.bonus_total(INSURANCE_RETURN_TIME_BONUS), 0.0);
    }

    #[test]
    fn active_quests_exclude_finished_states() {
        let mut pmc = character();
        for (id, status) in [
            ("a", QuestStatus::Started),
            ("b", QuestStatus::Success),
            ("c", QuestStatus::AvailableForFinish),
            ("d", QuestStatus::AvailableForStart),
        ] {
            pmc.quests.push(Quest {
                qid: QuestId::new(id),
                status,
                status_timers: Map::new(),
                completed_conditions: vec![],
                extra: Map::new(),
            });
        }
        assert_eq!(pmc.active_quest_ids(), vec![QuestId::new("a"), QuestId::new("c")]);
    }

    #[test]
    fn pascal_case_fields_deserialize() {
        let raw = r#"{
            "_id": "pmc", "aid": 1, "savage": "scav",
            "Info": {"Nickname": "n", "Side": "Usec", "Level": 12, "Experience": 100},
            "Health": {
                "Hydration": {"Current": 1, "Maximum": 100},
                "Energy": {"Current": 1, "Maximum": 100},
                "Temperature": {"Current": 36, "Maximum": 40},
                "BodyParts": {"Head": {"Health": {"Current": 35, "Maximum": 35}}}
            },
            "Inventory": {"items": [], "equipment": "equip", "fastPanel": {}},
            "InsuredItems": [{"tid": "t", "itemId": "i"}],
            "TradersInfo": {"579dc571d53a0658a154fbec": {"loyaltyLevel": 1, "standing": 2.5}},
            "Hideout": {"Areas": []}
        }"#;
        let pmc: Character = serde_json::from_str(raw).unwrap();
        assert_eq!(pmc.info.level, 12);
        assert_eq!(pmc.savage, Some(CharacterId::new("scav")));
        assert_eq!(pmc.fence_info().map(|f| f.standing), Some(2.5));
        assert!(pmc.is_insured(&ItemId::new("i")));
        assert!(pmc.extra.contains_key("Hideout"));
    }
}
