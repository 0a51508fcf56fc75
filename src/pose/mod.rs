pub mod geometry;
pub mod landmark;

pub use landmark::{Landmark, PoseFrame, PoseLandmark, LANDMARK_COUNT};
