use std::sync::{Arc, Mutex};

use anyhow::Result;

use crate::models::{Exercise, RepCounts};

use super::{TrackerStore, DEFAULT_TARGET};

/// In-memory store for tests and embedding. Clones share state, so a test
/// can hold one handle while the detector owns another.
#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryState>>,
}

struct MemoryState {
    counts: RepCounts,
    target: Exercise,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MemoryState {
                counts: RepCounts::default(),
                target: DEFAULT_TARGET,
            })),
        }
    }

    pub fn with_target(target: Exercise) -> Self {
        let store = Self::new();
        store.inner.lock().unwrap().target = target;
        store
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackerStore for MemoryStore {
    fn load_counts(&self) -> Result<RepCounts> {
        Ok(self.inner.lock().unwrap().counts.clone())
    }

    fn save_counts(&self, counts: &RepCounts) -> Result<()> {
        self.inner.lock().unwrap().counts = counts.clone();
        Ok(())
    }

    fn load_target(&self) -> Result<Exercise> {
        Ok(self.inner.lock().unwrap().target)
    }

    fn save_target(&self, target: Exercise) -> Result<()> {
        self.inner.lock().unwrap().target = target;
        Ok(())
    }
}
