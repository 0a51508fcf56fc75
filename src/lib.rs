pub mod cli;
pub mod detect;
pub mod models;
pub mod pose;
pub mod store;
pub mod tracker;
pub mod utils;

pub use detect::{DetectorConfig, FrameReport, Phase, RepDetector, RepEvent, VisibilityNotice};
pub use models::{Exercise, RepCounts};
pub use pose::{Landmark, PoseFrame, PoseLandmark, LANDMARK_COUNT};
pub use store::{JsonStore, MemoryStore, SqliteStore, TrackerStore, DEFAULT_TARGET};
pub use tracker::{TrackerController, TrackerEvent};
