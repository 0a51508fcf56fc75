pub mod controller;
pub mod loop_worker;

pub use controller::TrackerController;
pub use loop_worker::{tracking_loop, TrackerEvent};
