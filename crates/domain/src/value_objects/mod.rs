//! Value objects - Immutable objects defined by their attributes

mod bot_template;
mod equipment_slot;
mod exit_status;
mod fence_standing;
mod raid_outcome;
mod settings;

pub use bot_template::{BotChances, BotGeneration, BotInventoryPool, BotTemplate, ItemCountRange};
pub use equipment_slot::{
    is_pocket_slot, is_special_slot, EquipmentSlot, HIDEOUT_SLOT, PLAYER_GEAR_SLOTS, POCKET_SLOTS,
    SPECIAL_SLOTS,
};
pub use exit_status::ExitStatus;
pub use fence_standing::{FenceStanding, MAX_FENCE_STANDING, MAX_KARMA_LEVEL, MIN_FENCE_STANDING};
pub use raid_outcome::{HealthSync, RaidOutcomeRequest, SyncedBodyPart};
pub use settings::{
    HealthSettings, InRaidSettings, InsuranceSettings, KarmaModifiers, KarmaTier,
    LostOnDeathSettings, PlayerScavSettings, RaidSettings, BASE_SCAV_ROLE,
    DEFAULT_INSURANCE_MULTIPLIER, LABS_ACCESS_CARD_TPL,
};
