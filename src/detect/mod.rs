pub mod classifier;
pub mod config;
pub mod detector;
pub mod report;
pub mod state;

#[cfg(test)]
pub(crate) mod testutil;

pub use classifier::Phase;
pub use config::DetectorConfig;
pub use detector::RepDetector;
pub use report::{FrameReport, RepEvent, VisibilityNotice};
pub use state::{ExerciseState, RepCycle};
