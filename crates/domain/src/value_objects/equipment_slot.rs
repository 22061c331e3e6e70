//! Equipment slots on the character's gear root.

use serde::{Deserialize, Serialize};

/// Slot names an item can occupy directly under the equipment root.
///
/// Anything not listed (mod slots, grid slots, `hideout`) is `Unknown` so that
/// configuration keyed by slot never fails to load on new data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EquipmentSlot {
    FirstPrimaryWeapon,
    SecondPrimaryWeapon,
    Holster,
    Scabbard,
    Compass,
    Headwear,
    Earpiece,
    Eyewear,
    FaceCover,
    ArmBand,
    ArmorVest,
    TacticalVest,
    Backpack,
    Pockets,
    SecuredContainer,
    /// Forward compatibility fallback
    #[serde(other)]
    Unknown,
}

impl EquipmentSlot {
    pub fn from_slot_id(slot_id: &str) -> Self {
        match slot_id {
            "FirstPrimaryWeapon" => Self::FirstPrimaryWeapon,
            "SecondPrimaryWeapon" => Self::SecondPrimaryWeapon,
            "Holster" => Self::Holster,
            "Scabbard" => Self::Scabbard,
            "Compass" => Self::Compass,
            "Headwear" => Self::Headwear,
            "Earpiece" => Self::Earpiece,
            "Eyewear" => Self::Eyewear,
            "FaceCover" => Self::FaceCover,
            "ArmBand" => Self::ArmBand,
            "ArmorVest" => Self::ArmorVest,
            "TacticalVest" => Self::TacticalVest,
            "Backpack" => Self::Backpack,
            "Pockets" => Self::Pockets,
            "SecuredContainer" => Self::SecuredContainer,
            _ => Self::Unknown,
        }
    }

    pub fn as_slot_id(&self) -> &'static str {
        match self {
            Self::FirstPrimaryWeapon => "FirstPrimaryWeapon",
            Self::SecondPrimaryWeapon => "SecondPrimaryWeapon",
            Self::Holster => "Holster",
            Self::Scabbard => "Scabbard",
            Self::Compass => "Compass",
            Self::Headwear => "Headwear",
            Self::Earpiece => "Earpiece",
            Self::Eyewear => "Eyewear",
            Self::FaceCover => "FaceCover",
            Self::ArmBand => "ArmBand",
            Self::ArmorVest => "ArmorVest",
            Self::TacticalVest => "TacticalVest",
            Self::Backpack => "Backpack",
            Self::Pockets => "Pockets",
            Self::SecuredContainer => "SecuredContainer",
            Self::Unknown => "Unknown",
        }
    }

    /// Containers whose direct contents count as loose loot.
    pub fn loot_containers() -> [Self; 3] {
        [Self::TacticalVest, Self::Pockets, Self::Backpack]
    }
}

impl std::fmt::Display for EquipmentSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_slot_id())
    }
}

/// Slot id forced onto insurance returns that have no usable parent.
pub const HIDEOUT_SLOT: &str = "hideout";

/// Slot ids of the four pocket grids inside the Pockets item.
pub const POCKET_SLOTS: [&str; 4] = ["pocket1", "pocket2", "pocket3", "pocket4"];

/// Slot ids of the reserved pocket slots whose contents survive death.
pub const SPECIAL_SLOTS: [&str; 3] = ["SpecialSlot1", "SpecialSlot2", "SpecialSlot3"];

/// Slots whose items (and descendants) make up the gear a player carries into a raid.
pub const PLAYER_GEAR_SLOTS: [&str; 20] = [
    "FirstPrimaryWeapon",
    "SecondPrimaryWeapon",
    "Holster",
    "Scabbard",
    "Compass",
    "Headwear",
    "Earpiece",
    "Eyewear",
    "FaceCover",
    "ArmBand",
    "ArmorVest",
    "TacticalVest",
    "Backpack",
    "pocket1",
    "pocket2",
    "pocket3",
    "pocket4",
    "SpecialSlot1",
    "SpecialSlot2",
    "SpecialSlot3",
];

pub fn is_pocket_slot(slot_id: &str) -> bool {
    POCKET_SLOTS.contains(&slot_id)
}

pub fn is_special_slot(slot_id: &str) -> bool {
    slot_id.contains("SpecialSlot")
}
