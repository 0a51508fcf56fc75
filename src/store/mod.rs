use anyhow::Result;

use crate::models::{Exercise, RepCounts};

mod json;
mod memory;
mod sqlite;

pub use json::{JsonStore, COUNTS_FILE, TARGET_FILE};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Selector value a store hands out before anyone has persisted one.
pub const DEFAULT_TARGET: Exercise = Exercise::Squats;

/// Persistence boundary for the two tracker documents: cumulative rep
/// counters and the target-exercise selector.
///
/// Loads create and return defaults when the backing document does not
/// exist yet (all-zero counters, [`DEFAULT_TARGET`] as the selector) and
/// fail only when the backend is present but unreadable. The detector
/// downgrades per-frame load/save failures to warnings, so implementations
/// attach context instead of panicking.
pub trait TrackerStore {
    fn load_counts(&self) -> Result<RepCounts>;
    fn save_counts(&self, counts: &RepCounts) -> Result<()>;
    fn load_target(&self) -> Result<Exercise>;
    fn save_target(&self, target: Exercise) -> Result<()>;
}
