//! Test fixtures: JSON fixture loading, profile builders and in-memory
//! collaborators.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_fixtures::{profiles, catalogs::FakeItemCatalog};
//!
//! #[test]
//! fn test_pmc_has_gear() {
//!     let profile = profiles::geared("session");
//!     // ... test logic
//! }
//! ```

pub mod catalogs;
pub mod collaborators;

use std::path::PathBuf;

use chrono::{DateTime, TimeZone, Utc};

// =============================================================================
// Fixture Loading
// =============================================================================

/// Load a JSON fixture from test_data/ directory.
///
/// # Panics
///
/// Panics if the fixture file cannot be read or parsed.
pub fn load_fixture<T: serde::de::DeserializeOwned>(path: &str) -> T {
    let fixture_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test_data")
        .join(path);
    let content = std::fs::read_to_string(&fixture_path).unwrap_or_else(|e| {
        panic!(
            "Failed to read fixture '{}': {}",
            fixture_path.display(),
            e
        )
    });
    serde_json::from_str(&content).unwrap_or_else(|e| {
        panic!(
            "Failed to parse fixture '{}': {}",
            fixture_path.display(),
            e
        )
    })
}

/// The instant every fixed-clock test runs at.
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

// =============================================================================
// Profile Fixtures
// =============================================================================

/// Pre-built profiles for testing.
///
/// PMC root containers are `equipment`, `stash`, `sorting`, `quest_raid` and
/// `quest_stash`; the scav's are prefixed with `scav_`.
pub mod profiles {
    use raidledger_domain::{Character, CharacterId, Inventory, Item, Profile, TraderId};

    pub const ROOT_TPL: &str = "55d7217a4bdc2d86028b456d";
    pub const POCKETS_TPL: &str = "557ffd194bdc2d28148b457f";
    pub const VEST_TPL: &str = "5929a2a086f7744f4b234d43";
    pub const HELMET_TPL: &str = "5aa7e4a4e5b5b000137b76f2";
    pub const BACKPACK_TPL: &str = "5ab8ebf186f7742d8b372e80";
    pub const RIFLE_TPL: &str = "5447a9cd4bdc2dbd208b4567";
    pub const SECURE_TPL: &str = "544a11ac4bdc2d470e8b456a";
    pub const AMMO_TPL: &str = "54527a984bdc2d4e668b4567";
    pub const ROUBLES_TPL: &str = "5449016a4bdc2d6f028b456f";
    pub const QUEST_ITEM_TPL: &str = "590c62a386f77412b0130255";
    pub const LOOT_TPL: &str = "57347ca924597744596b4e71";

    /// Root containers only.
    pub fn inventory(prefix: &str) -> Inventory {
        let id = |name: &str| format!("{prefix}{name}");
        let mut inventory = Inventory::with_roots(
            id("equipment"),
            id("stash"),
            id("sorting"),
            id("quest_raid"),
            id("quest_stash"),
        );
        inventory.items = ["equipment", "stash", "sorting", "quest_raid", "quest_stash"]
            .into_iter()
            .map(|root| Item::new(id(root), ROOT_TPL))
            .collect();
        inventory
    }

    /// A level 10 USEC with empty containers and a scav slot reserved.
    pub fn pmc() -> Character {
        let mut pmc = Character::new("pmc", inventory(""));
        pmc.savage = Some(CharacterId::new("scav"));
        pmc.aid = serde_json::Value::from(1001);
        pmc.info.nickname = "Tester".into();
        pmc.info.side = "Usec".into();
        pmc.info.level = 10;
        pmc.info.experience = 25_000;
        pmc.fence_info_mut().loyalty_level = 1;
        pmc
    }

    pub fn scav() -> Character {
        let mut scav = Character::new("scav", inventory("scav_"));
        scav.info.side = "Savage".into();
        scav.info.level = 4;
        scav
    }

    pub fn basic(session: &str) -> Profile {
        Profile::new(session, pmc())
    }

    pub fn with_scav(session: &str) -> Profile {
        let mut profile = basic(session);
        profile.characters.scav = Some(scav());
        profile
    }

    /// Sets the shared fence standing on both characters.
    pub fn set_fence_standing(profile: &mut Profile, standing: f64) {
        profile.pmc_mut().fence_info_mut().standing = standing;
        if let Some(scav) = profile.characters.scav.as_mut() {
            scav.fence_info_mut().standing = standing;
        }
    }

    /// Equips `id` directly under the equipment root.
    pub fn equip(character: &mut Character, id: &str, tpl: &str, slot: &str) {
        let equipment = character.inventory.equipment.clone();
        character
            .inventory
            .items
            .push(Item::new(id, tpl).with_parent(equipment, slot));
    }

    /// Places `id` inside `parent`.
    pub fn put(character: &mut Character, id: &str, tpl: &str, parent: &str, slot: &str) {
        character
            .inventory
            .items
            .push(Item::new(id, tpl).with_parent(parent, slot));
    }

    pub fn insure(character: &mut Character, item_id: &str, trader: TraderId) {
        character.insured_items.push(raidledger_domain::InsuredItem {
            trader_id: trader,
            item_id: item_id.into(),
        });
    }

    /// A PMC wearing a helmet, vest (with ammo), backpack (with loot),
    /// pockets (with a special-slot item), a rifle and a secure container.
    pub fn geared(session: &str) -> Profile {
        let mut profile = with_scav(session);
        let pmc = profile.pmc_mut();
        equip(pmc, "helmet", HELMET_TPL, "Headwear");
        equip(pmc, "vest", VEST_TPL, "TacticalVest");
        put(pmc, "vest_ammo", AMMO_TPL, "vest", "1");
        equip(pmc, "backpack", BACKPACK_TPL, "Backpack");
        put(pmc, "backpack_loot", LOOT_TPL, "backpack", "main");
        equip(pmc, "pockets", POCKETS_TPL, "Pockets");
        put(pmc, "pocket_loot", LOOT_TPL, "pockets", "pocket1");
        put(pmc, "special_item", LOOT_TPL, "pockets", "SpecialSlot1");
        equip(pmc, "rifle", RIFLE_TPL, "FirstPrimaryWeapon");
        equip(pmc, "secure", SECURE_TPL, "SecuredContainer");
        put(pmc, "secure_loot", LOOT_TPL, "secure", "main");
        put(pmc, "stash_money", ROUBLES_TPL, "stash", "hideout");
        profile
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use raidledger_domain::{repair_profile, Profile};

    #[test]
    fn builders_produce_consistent_profiles() {
        for mut profile in [profiles::basic("a"), profiles::with_scav("b"), profiles::geared("c")] {
            assert!(repair_profile(&mut profile).is_empty());
            assert!(profile.pmc().inventory.check_integrity().is_ok());
        }
    }

    #[test]
    fn stored_profile_fixture_parses_and_keeps_unknown_sections() {
        let profile: Profile = load_fixture("profiles/usec_after_raid.json");
        assert_eq!(profile.session_id().as_str(), "6650a1f2c0ffee0000000001");
        assert!(profile.characters.scav.is_some());
        assert!(profile.pmc().extra.contains_key("Hideout"));

        let written = serde_json::to_value(&profile).unwrap();
        assert_eq!(written["characters"]["pmc"]["Hideout"]["Seed"], 1234);
    }
}
