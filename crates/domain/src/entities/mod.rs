//! Domain entities - Core business objects with identity

mod character;
mod health;
mod insurance;
mod inventory;
mod item;
mod profile;
mod repair;

pub use character::{
    Bonus, Character, CharacterInfo, CommonSkill, CounterItem, Counters, EftStats, InsuredItem,
    Quest, QuestStatus, Skills, Stats, TraderInfo, Victim, INSURANCE_RETURN_TIME_BONUS,
    SCAV_COOLDOWN_TIMER_BONUS, USEC_RAID_REMAIN_KILLS,
};
pub use health::{BodyPart, BodyPartHealth, Effects, Health, Resource};
pub use insurance::{message_type, InsuranceRecord, SystemData};
pub use inventory::Inventory;
pub use item::{Item, ItemUpd};
pub use profile::{
    CharacterKind, Characters, InRaid, Profile, ProfileInfo, DEVELOPER_EDITION_PREFIX,
    NO_LOCATION,
};
pub use repair::{repair_profile, RepairEvent};
