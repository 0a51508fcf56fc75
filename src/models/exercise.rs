use serde::{Deserialize, Serialize};

use crate::pose::PoseLandmark;

/// The exercise being tracked. Serialized names are the canonical strings
/// used by the selector and counter documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Exercise {
    JumpingJacks,
    Squats,
    HighKnees,
    /// Detection disabled; frames are accepted but never classified.
    None,
}

const ARM_JOINTS: [PoseLandmark; 6] = [
    PoseLandmark::LeftHip,
    PoseLandmark::RightHip,
    PoseLandmark::LeftShoulder,
    PoseLandmark::RightShoulder,
    PoseLandmark::LeftElbow,
    PoseLandmark::RightElbow,
];

const LEG_JOINTS: [PoseLandmark; 6] = [
    PoseLandmark::LeftHip,
    PoseLandmark::RightHip,
    PoseLandmark::LeftKnee,
    PoseLandmark::RightKnee,
    PoseLandmark::LeftAnkle,
    PoseLandmark::RightAnkle,
];

impl Exercise {
    pub fn as_str(&self) -> &'static str {
        match self {
            Exercise::JumpingJacks => "jumping_jacks",
            Exercise::Squats => "squats",
            Exercise::HighKnees => "high_knees",
            Exercise::None => "none",
        }
    }

    /// Parse a canonical name. Returns `None` for anything unrecognized so
    /// callers can decide between erroring and falling back to a default.
    pub fn from_name(name: &str) -> Option<Exercise> {
        match name {
            "jumping_jacks" => Some(Exercise::JumpingJacks),
            "squats" => Some(Exercise::Squats),
            "high_knees" => Some(Exercise::HighKnees),
            "none" => Some(Exercise::None),
            _ => None,
        }
    }

    /// Joints that must be confidently tracked before a frame can be
    /// classified for this exercise. Empty for `None`.
    pub fn required_joints(&self) -> &'static [PoseLandmark] {
        match self {
            Exercise::JumpingJacks => &ARM_JOINTS,
            Exercise::Squats | Exercise::HighKnees => &LEG_JOINTS,
            Exercise::None => &[],
        }
    }
}
