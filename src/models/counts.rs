use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::exercise::Exercise;

/// Cumulative rep counters, one slot per supported exercise. Field names
/// match the persisted counter document, so this struct round-trips the
/// store's JSON as-is. Partial documents load with zeros in the gaps;
/// keys from other writers land in `extra` and ride along on the next
/// save instead of being dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepCounts {
    #[serde(default)]
    pub jumping_jacks: u64,
    #[serde(default)]
    pub squats: u64,
    #[serde(default)]
    pub high_knees: u64,
    /// Counter keys this build does not track, preserved verbatim.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl RepCounts {
    pub fn get(&self, exercise: Exercise) -> u64 {
        match exercise {
            Exercise::JumpingJacks => self.jumping_jacks,
            Exercise::Squats => self.squats,
            Exercise::HighKnees => self.high_knees,
            Exercise::None => 0,
        }
    }

    /// Add completed reps to the exercise's slot. `None` has no slot and
    /// is ignored.
    pub fn add(&mut self, exercise: Exercise, reps: u64) {
        match exercise {
            Exercise::JumpingJacks => self.jumping_jacks += reps,
            Exercise::Squats => self.squats += reps,
            Exercise::HighKnees => self.high_knees += reps,
            Exercise::None => {}
        }
    }

    pub fn total(&self) -> u64 {
        self.jumping_jacks + self.squats + self.high_knees
    }

    /// Zero every counter in the document, carried foreign keys included.
    pub fn reset(&mut self) {
        self.jumping_jacks = 0;
        self.squats = 0;
        self.high_knees = 0;
        for value in self.extra.values_mut() {
            *value = Value::from(0);
        }
    }
}
