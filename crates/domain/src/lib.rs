extern crate self as raidledger_domain;

pub mod common;
pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

// Re-export all entities (explicit list in entities/mod.rs)
pub use entities::{
    message_type, repair_profile, Bonus, BodyPart, BodyPartHealth, Character, CharacterInfo,
    CharacterKind, Characters, CommonSkill, CounterItem, Counters, EftStats, Effects, Health,
    InRaid, InsuranceRecord, InsuredItem, Inventory, Item, ItemUpd, Profile, ProfileInfo, Quest,
    QuestStatus, RepairEvent, Resource, Skills, Stats, SystemData, TraderInfo, Victim,
    DEVELOPER_EDITION_PREFIX, INSURANCE_RETURN_TIME_BONUS, NO_LOCATION,
    SCAV_COOLDOWN_TIMER_BONUS, USEC_RAID_REMAIN_KILLS,
};

pub use error::DomainError;

// Re-export ID types
pub use ids::{CharacterId, ItemId, QuestId, SessionId, TemplateId, TraderId};

// Re-export value objects
pub use value_objects::{
    is_pocket_slot, is_special_slot, BotChances, BotGeneration, BotInventoryPool, BotTemplate,
    EquipmentSlot, ExitStatus, FenceStanding, HealthSettings, HealthSync, InRaidSettings,
    InsuranceSettings, ItemCountRange, KarmaModifiers, KarmaTier, LostOnDeathSettings,
    PlayerScavSettings, RaidOutcomeRequest, RaidSettings, SyncedBodyPart, BASE_SCAV_ROLE,
    DEFAULT_INSURANCE_MULTIPLIER, HIDEOUT_SLOT, LABS_ACCESS_CARD_TPL, MAX_FENCE_STANDING,
    MAX_KARMA_LEVEL, MIN_FENCE_STANDING, PLAYER_GEAR_SLOTS, POCKET_SLOTS, SPECIAL_SLOTS,
};
