//! Hysteresis state machines that turn per-frame phases into rep edges.

use crate::models::Exercise;

use super::classifier::Phase;

/// Where a tracked body (or single limb) sits within its rep cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CyclePoint {
    /// At the resting posture: arms down, standing, leg down.
    Resting,
    /// Past the engage threshold: arms up, squatting, knee lifted.
    Engaged,
}

/// One two-state hysteresis cycle. A rep fires exactly on the
/// engaged -> resting edge, so every count requires a full excursion
/// through both thresholds; the resting -> engaged edge and all in-band
/// frames advance nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepCycle {
    point: CyclePoint,
}

impl RepCycle {
    pub fn new() -> Self {
        Self {
            point: CyclePoint::Resting,
        }
    }

    /// Feed one classified frame. Returns true exactly when this frame
    /// completes a rep.
    pub fn advance(&mut self, phase: Phase) -> bool {
        match (self.point, phase) {
            (CyclePoint::Resting, Phase::Engaged) => {
                self.point = CyclePoint::Engaged;
                false
            }
            (CyclePoint::Engaged, Phase::Released) => {
                self.point = CyclePoint::Resting;
                true
            }
            // Same-side phases and in-band frames are not edges.
            _ => false,
        }
    }

    pub fn is_engaged(&self) -> bool {
        self.point == CyclePoint::Engaged
    }
}

impl Default for RepCycle {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-exercise detection state, keyed by the active exercise so stale
/// state from another exercise cannot exist. Selector changes rebuild this
/// wholesale via [`ExerciseState::initial`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExerciseState {
    JumpingJack(RepCycle),
    Squat(RepCycle),
    HighKnees { left: RepCycle, right: RepCycle },
    Idle,
}

impl ExerciseState {
    pub fn initial(exercise: Exercise) -> Self {
        match exercise {
            Exercise::JumpingJacks => ExerciseState::JumpingJack(RepCycle::new()),
            Exercise::Squats => ExerciseState::Squat(RepCycle::new()),
            Exercise::HighKnees => ExerciseState::HighKnees {
                left: RepCycle::new(),
                right: RepCycle::new(),
            },
            Exercise::None => ExerciseState::Idle,
        }
    }
}
