use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of a generated identifier, matching the 24-hex-digit ids the game
/// client produces.
const GENERATED_ID_LEN: usize = 24;

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Derive a fresh id from a uuid (callers inject the uuid source).
            /// Keeps the trailing hex digits, which carry the most entropy.
            pub fn from_uuid(uuid: Uuid) -> Self {
                let mut simple = uuid.simple().to_string();
                let tail = simple.split_off(simple.len() - GENERATED_ID_LEN);
                Self(tail)
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self(String::new())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Profile scope
define_id!(SessionId);
define_id!(CharacterId);

// Inventory
define_id!(ItemId);
define_id!(TemplateId);

// Traders and quests
define_id!(TraderId);
define_id!(QuestId);

impl TraderId {
    /// The trader whose standing tracks scav reputation.
    pub fn fence() -> Self {
        Self::new("579dc571d53a0658a154fbec")
    }

    pub fn prapor() -> Self {
        Self::new("54cb50c76803fa8b248b4571")
    }

    pub fn is_fence(&self) -> bool {
        *self == Self::fence()
    }
}
