//! Profile - the persisted root document of one session

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::common::serde_helpers::empty_object_as_none;
use crate::entities::{Character, InsuranceRecord};
use raidledger_domain::SessionId;

/// Location marker used when the player is not in a raid.
pub const NO_LOCATION: &str = "none";

/// Account edition prefix that shortens the scav cooldown.
pub const DEVELOPER_EDITION_PREFIX: &str = "spt developer";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub info: ProfileInfo,
    pub characters: Characters,
    #[serde(default)]
    pub insurance: Vec<InsuranceRecord>,
    #[serde(default)]
    pub weaponbuilds: Value,
    #[serde(default)]
    pub inraid: InRaid,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileInfo {
    pub id: SessionId,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub edition: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Characters {
    pub pmc: Character,
    #[serde(default, with = "empty_object_as_none")]
    pub scav: Option<Character>,
}

/// Which character type was last sent into a raid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterKind {
    #[default]
    Pmc,
    Scav,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InRaid {
    pub location: String,
    #[serde(default)]
    pub character: CharacterKind,
}

impl Default for InRaid {
    fn default() -> Self {
        Self {
            location: NO_LOCATION.to_string(),
            character: CharacterKind::Pmc,
        }
    }
}

impl Profile {
    pub fn new(id: impl Into<SessionId>, pmc: Character) -> Self {
        Self {
            info: ProfileInfo {
                id: id.into(),
                username: String::new(),
                edition: String::new(),
                extra: Map::new(),
            },
            characters: Characters { pmc, scav: None },
            insurance: Vec::new(),
            weaponbuilds: Value::Object(Map::new()),
            inraid: InRaid::default(),
            extra: Map::new(),
        }
    }

    pub fn session_id(&self) -> &SessionId {
        &self.info.id
    }

    pub fn pmc(&self) -> &Character {
        &self.characters.pmc
    }

    pub fn pmc_mut(&mut self) -> &mut Character {
        &mut self.characters.pmc
    }

    pub fn character(&self, kind: CharacterKind) -> Option<&Character> {
        match kind {
            CharacterKind::Pmc => Some(&self.characters.pmc),
            CharacterKind::Scav => self.characters.scav.as_ref(),
        }
    }

    pub fn character_mut(&mut self, kind: CharacterKind) -> Option<&mut Character> {
        match kind {
            CharacterKind::Pmc => Some(&mut self.characters.pmc),
            CharacterKind::Scav => self.characters.scav.as_mut(),
        }
    }

    pub fn is_developer_account(&self) -> bool {
        self.info
            .edition
            .to_lowercase()
            .starts_with(DEVELOPER_EDITION_PREFIX)
    }

    /// Lower-cased raid location, or `None` when not in a raid.
    pub fn raid_location(&self) -> Option<String> {
        let location = self.inraid.location.to_lowercase();
        (!location.is_empty() && location != NO_LOCATION).then_some(location)
    }

    pub fn clear_raid_location(&mut self) {
        self.inraid.location = NO_LOCATION.to_string();
    }
}
