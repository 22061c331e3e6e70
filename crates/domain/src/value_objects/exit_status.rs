//! How a raid ended for the player.

use serde::{Deserialize, Serialize};

/// Exit status reported by the client when a raid ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExitStatus {
    Survived,
    Killed,
    Left,
    Runner,
    #[serde(rename = "missinginaction")]
    MissingInAction,
    /// Any value the server does not recognise. Treated as a proper exit:
    /// no death penalty, no health reduction.
    #[serde(other)]
    Unknown,
}

impl ExitStatus {
    /// Whether the player counts as dead for inventory and penalty purposes.
    pub fn is_dead(&self) -> bool {
        match self {
            Self::Survived | Self::Runner | Self::Unknown => false,
            Self::Killed | Self::Left | Self::MissingInAction => true,
        }
    }

    /// Fraction of maximum health each body part is set to after this exit.
    pub fn health_multiplier(&self) -> Option<f64> {
        match self {
            Self::Left => Some(0.01),
            Self::MissingInAction => Some(0.30),
            _ => None,
        }
    }

    pub fn is_survived(&self) -> bool {
        matches!(self, Self::Survived)
    }
}

impl std::fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Survived => write!(f, "survived"),
            Self::Killed => write!(f, "killed"),
            Self::Left => write!(f, "left"),
            Self::Runner => write!(f, "runner"),
            Self::MissingInAction => write!(f, "missinginaction"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}
