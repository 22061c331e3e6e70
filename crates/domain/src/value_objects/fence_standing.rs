//! Fence reputation ("karma") bounds and tiering.

use serde::{Deserialize, Serialize};

pub const MIN_FENCE_STANDING: f64 = -7.0;
pub const MAX_FENCE_STANDING: f64 = 15.0;
pub const MAX_KARMA_LEVEL: i32 = 6;

/// Fence standing, always within [-7, 15].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct FenceStanding(f64);

impl FenceStanding {
    pub fn new(value: f64) -> Self {
        let value = if value.is_nan() { 0.0 } else { value };
        Self(value.clamp(MIN_FENCE_STANDING, MAX_FENCE_STANDING))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Sum every delta first, then clamp once.
    pub fn accumulate(start: f64, deltas: impl IntoIterator<Item = f64>) -> Self {
        let total = deltas.into_iter().fold(start, |acc, d| acc + d);
        Self::new(total)
    }

    /// Karma level used to pick the scav loot tier, in `0..=MAX_KARMA_LEVEL`.
    /// Negative standing shares level 0.
    pub fn karma_level(&self) -> i32 {
        (self.0.floor() as i32).clamp(0, MAX_KARMA_LEVEL)
    }
}

impl From<f64> for FenceStanding {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<FenceStanding> for f64 {
    fn from(value: FenceStanding) -> Self {
        value.0
    }
}
