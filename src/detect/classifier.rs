//! Pure per-frame classification: joint snapshot in, threshold phase out.
//! No state lives here; the hysteresis machines in [`super::state`] consume
//! these phases.

use crate::pose::{geometry, PoseFrame, PoseLandmark};

use super::config::DetectorConfig;

/// Where one frame's signal sits relative to an exercise's threshold pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Crossed the engage threshold: arms raised, knees bent, knee lifted.
    Engaged,
    /// Crossed the release threshold: back at the resting posture.
    Released,
    /// Inside the hysteresis band; no transition may fire.
    InBand,
}

fn phase_from(signal: f64, engage_below: f64, release_above: f64) -> Phase {
    if signal < engage_below {
        Phase::Engaged
    } else if signal > release_above {
        Phase::Released
    } else {
        Phase::InBand
    }
}

fn joint_angle(
    frame: &PoseFrame,
    a: PoseLandmark,
    b: PoseLandmark,
    c: PoseLandmark,
) -> Option<f64> {
    Some(geometry::angle(frame.get(a)?, frame.get(b)?, frame.get(c)?))
}

/// Shoulder angles (hip-shoulder-elbow) per side. Small angles mean the
/// arms are raised overhead.
pub fn shoulder_angles(frame: &PoseFrame) -> Option<(f64, f64)> {
    let left = joint_angle(
        frame,
        PoseLandmark::LeftHip,
        PoseLandmark::LeftShoulder,
        PoseLandmark::LeftElbow,
    )?;
    let right = joint_angle(
        frame,
        PoseLandmark::RightHip,
        PoseLandmark::RightShoulder,
        PoseLandmark::RightElbow,
    )?;
    Some((left, right))
}

/// Knee angles (hip-knee-ankle) per side. Small angles mean a bent or
/// lifted leg.
pub fn knee_angles(frame: &PoseFrame) -> Option<(f64, f64)> {
    let left = joint_angle(
        frame,
        PoseLandmark::LeftHip,
        PoseLandmark::LeftKnee,
        PoseLandmark::LeftAnkle,
    )?;
    let right = joint_angle(
        frame,
        PoseLandmark::RightHip,
        PoseLandmark::RightKnee,
        PoseLandmark::RightAnkle,
    )?;
    Some((left, right))
}

/// Jumping jack phase: engaged only when both shoulder angles clear the
/// arms-up threshold, released only when both clear the arms-down one.
pub fn jumping_jack_phase(frame: &PoseFrame, config: &DetectorConfig) -> Option<Phase> {
    let (left, right) = shoulder_angles(frame)?;
    let phase = if left < config.arms_up_max_deg && right < config.arms_up_max_deg {
        Phase::Engaged
    } else if left > config.arms_down_min_deg && right > config.arms_down_min_deg {
        Phase::Released
    } else {
        Phase::InBand
    };
    Some(phase)
}

/// Squat phase from the two knee angles averaged; averaging smooths the
/// sides against single-joint jitter.
pub fn squat_phase(frame: &PoseFrame, config: &DetectorConfig) -> Option<Phase> {
    let (left, right) = knee_angles(frame)?;
    let average = (left + right) / 2.0;
    Some(phase_from(
        average,
        config.squat_down_max_deg,
        config.squat_up_min_deg,
    ))
}

/// High knees phases, one per leg. The legs alternate out of phase, so each
/// gets its own independent reading.
pub fn high_knees_phases(
    frame: &PoseFrame,
    config: &DetectorConfig,
) -> Option<(Phase, Phase)> {
    let (left, right) = knee_angles(frame)?;
    Some((
        phase_from(left, config.knee_up_max_deg, config.knee_down_min_deg),
        phase_from(right, config.knee_up_max_deg, config.knee_down_min_deg),
    ))
}
