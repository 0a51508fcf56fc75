//! Synthetic pose frames that hit exact joint angles.

use crate::pose::{Landmark, PoseFrame, PoseLandmark, LANDMARK_COUNT};

pub(crate) fn base_frame() -> PoseFrame {
    PoseFrame::new(vec![Landmark::new(0.5, 0.5); LANDMARK_COUNT])
}

pub(crate) fn set(frame: &mut PoseFrame, joint: PoseLandmark, x: f64, y: f64) {
    frame.landmarks[joint.index()] = Landmark::new(x, y);
}

/// Frame with both shoulder angles (hip-shoulder-elbow) at `deg`. Shoulders
/// sit above the hips; each elbow is rotated off the shoulder->hip ray by
/// the requested angle.
pub(crate) fn arm_frame(deg: f64) -> PoseFrame {
    let mut frame = base_frame();
    let theta = deg.to_radians();
    for (shoulder, hip, elbow, sx) in [
        (
            PoseLandmark::LeftShoulder,
            PoseLandmark::LeftHip,
            PoseLandmark::LeftElbow,
            0.40,
        ),
        (
            PoseLandmark::RightShoulder,
            PoseLandmark::RightHip,
            PoseLandmark::RightElbow,
            0.60,
        ),
    ] {
        set(&mut frame, shoulder, sx, 0.30);
        set(&mut frame, hip, sx, 0.55);
        // shoulder->hip points straight down in image space
        set(
            &mut frame,
            elbow,
            sx + 0.18 * theta.sin(),
            0.30 + 0.18 * theta.cos(),
        );
    }
    frame
}

/// Frame with both knee angles (hip-knee-ankle) at `deg`.
pub(crate) fn leg_frame(deg: f64) -> PoseFrame {
    leg_frame_split(deg, deg)
}

/// Frame with independent left/right knee angles.
pub(crate) fn leg_frame_split(left_deg: f64, right_deg: f64) -> PoseFrame {
    let mut frame = base_frame();
    for (hip, knee, ankle, kx, theta) in [
        (
            PoseLandmark::LeftHip,
            PoseLandmark::LeftKnee,
            PoseLandmark::LeftAnkle,
            0.45,
            left_deg.to_radians(),
        ),
        (
            PoseLandmark::RightHip,
            PoseLandmark::RightKnee,
            PoseLandmark::RightAnkle,
            0.55,
            right_deg.to_radians(),
        ),
    ] {
        set(&mut frame, knee, kx, 0.60);
        set(&mut frame, hip, kx, 0.35);
        // knee->hip points straight up; the ankle swings off that ray
        set(
            &mut frame,
            ankle,
            kx + 0.22 * theta.sin(),
            0.60 - 0.22 * theta.cos(),
        );
    }
    frame
}
