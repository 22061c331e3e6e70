//! Character health: body parts, survival resources and status effects

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BodyPart {
    Head,
    Chest,
    Stomach,
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
}

impl BodyPart {
    pub const ALL: [BodyPart; 7] = [
        BodyPart::Head,
        BodyPart::Chest,
        BodyPart::Stomach,
        BodyPart::LeftArm,
        BodyPart::RightArm,
        BodyPart::LeftLeg,
        BodyPart::RightLeg,
    ];
}

/// A bounded value such as a limb's hit points or the hydration meter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(rename = "Current")]
    pub current: f64,
    #[serde(rename = "Maximum")]
    pub maximum: f64,
}

impl Resource {
    pub fn new(current: f64, maximum: f64) -> Self {
        Self { current, maximum }
    }

    pub fn full(maximum: f64) -> Self {
        Self::new(maximum, maximum)
    }

    pub fn reset(&mut self) {
        self.current = self.maximum;
    }
}

/// Status effects on a limb, keyed by effect type (e.g. `Fracture`).
pub type Effects = BTreeMap<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyPartHealth {
    #[serde(rename = "Health")]
    pub health: Resource,
    #[serde(rename = "Effects", default, skip_serializing_if = "Option::is_none")]
    pub effects: Option<Effects>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BodyPartHealth {
    pub fn full(maximum: f64) -> Self {
        Self {
            health: Resource::full(maximum),
            effects: None,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Health {
    pub hydration: Resource,
    pub energy: Resource,
    pub temperature: Resource,
    pub body_parts: BTreeMap<BodyPart, BodyPartHealth>,
    /// Unix seconds of the last server-side health write.
    #[serde(default)]
    pub update_time: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Health {
    fn default() -> Self {
        let limbs = [
            (BodyPart::Head, 35.0),
            (BodyPart::Chest, 85.0),
            (BodyPart::Stomach, 70.0),
            (BodyPart::LeftArm, 60.0),
            (BodyPart::RightArm, 60.0),
            (BodyPart::LeftLeg, 65.0),
            (BodyPart::RightLeg, 65.0),
        ];
        Self {
            hydration: Resource::full(100.0),
            energy: Resource::full(100.0),
            temperature: Resource::new(36.6, 40.0),
            body_parts: limbs
                .into_iter()
                .map(|(part, max)| (part, BodyPartHealth::full(max)))
                .collect(),
            update_time: 0,
            extra: Map::new(),
        }
    }
}

impl Health {
    /// Sets every limb to `maximum * multiplier`.
    pub fn reduce_to_multiplier(&mut self, multiplier: f64) {
        for part in self.body_parts.values_mut() {
            part.health.current = part.health.maximum * multiplier;
        }
    }

    /// Restores every limb and survival resource to its maximum.
    pub fn reset_to_full(&mut self) {
        for part in self.body_parts.values_mut() {
            part.health.reset();
        }
        self.hydration.reset();
        self.energy.reset();
        self.temperature.reset();
    }

    /// Copies effects reported for each limb without replacing an effect type
    /// the limb already carries. Returns how many effects were added.
    pub fn merge_effects(&mut self, reported: &BTreeMap<BodyPart, BodyPartHealth>) -> usize {
        let mut added = 0;
        for (part, reported_part) in reported {
            let Some(reported_effects) = &reported_part.effects else {
                continue;
            };
            let Some(limb) = self.body_parts.get_mut(part) else {
                continue;
            };
            let existing = limb.effects.get_or_insert_with(Effects::new);
            for (kind, effect) in reported_effects {
                if !existing.contains_key(kind) {
                    existing.insert(kind.clone(), effect.clone());
                    added += 1;
                }
            }
        }
        added
    }
}
