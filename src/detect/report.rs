use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{Exercise, RepCounts};
use crate::pose::PoseLandmark;

/// One or two reps (same-frame bilateral completion) counted on a single
/// frame.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepEvent {
    pub exercise: Exercise,
    /// Reps completed this frame: 1, or 2 when both legs of a bilateral
    /// exercise finish their cycles together.
    pub reps: u32,
    /// Cumulative count for the exercise after this frame.
    pub total: u64,
    pub completed_at: DateTime<Utc>,
}

/// Throttled advisory that required joints are not confidently tracked.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibilityNotice {
    pub exercise: Exercise,
    /// Joints absent from the snapshot or below the visibility threshold.
    pub missing_joints: Vec<PoseLandmark>,
    /// Consecutive frames skipped for low visibility, including this one.
    pub frames_skipped: u32,
}

/// Outcome of processing one frame.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameReport {
    /// Counters after this frame.
    pub counts: RepCounts,
    /// Present only on frames that completed reps.
    pub rep: Option<RepEvent>,
    /// Present only on frames where the throttle emitted a notice.
    pub visibility: Option<VisibilityNotice>,
}

impl FrameReport {
    pub(crate) fn quiet(counts: RepCounts) -> Self {
        Self {
            counts,
            rep: None,
            visibility: None,
        }
    }
}
