use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::models::{Exercise, RepCounts};

use super::{TrackerStore, DEFAULT_TARGET};

/// Conventional file name for the counter document.
pub const COUNTS_FILE: &str = "rep_counter.json";
/// Conventional file name for the selector document.
pub const TARGET_FILE: &str = "target_exercise.json";

#[derive(Serialize, Deserialize)]
struct TargetDocument {
    target: String,
}

/// File-backed store: two pretty-printed JSON documents. First read of a
/// missing document writes the defaults so external readers always find a
/// well-formed file.
pub struct JsonStore {
    counts_path: PathBuf,
    target_path: PathBuf,
}

impl JsonStore {
    pub fn new(counts_path: PathBuf, target_path: PathBuf) -> Self {
        Self {
            counts_path,
            target_path,
        }
    }

    /// Store rooted in a directory, using the conventional document names.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self::new(dir.join(COUNTS_FILE), dir.join(TARGET_FILE))
    }

    pub fn counts_path(&self) -> &Path {
        &self.counts_path
    }

    pub fn target_path(&self) -> &Path {
        &self.target_path
    }
}

fn write_document(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}

impl TrackerStore for JsonStore {
    fn load_counts(&self) -> Result<RepCounts> {
        if !self.counts_path.exists() {
            let counts = RepCounts::default();
            self.save_counts(&counts)
                .context("failed to create default counter document")?;
            return Ok(counts);
        }

        let contents = fs::read_to_string(&self.counts_path)
            .with_context(|| format!("failed to read {}", self.counts_path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("invalid counter document {}", self.counts_path.display()))
    }

    fn save_counts(&self, counts: &RepCounts) -> Result<()> {
        let serialized = serde_json::to_string_pretty(counts)?;
        write_document(&self.counts_path, &serialized)
    }

    fn load_target(&self) -> Result<Exercise> {
        if !self.target_path.exists() {
            self.save_target(DEFAULT_TARGET)
                .context("failed to create default target document")?;
            return Ok(DEFAULT_TARGET);
        }

        let contents = fs::read_to_string(&self.target_path)
            .with_context(|| format!("failed to read {}", self.target_path.display()))?;
        let document: TargetDocument = serde_json::from_str(&contents)
            .with_context(|| format!("invalid target document {}", self.target_path.display()))?;

        Ok(Exercise::from_name(&document.target).unwrap_or_else(|| {
            warn!(
                "unknown target exercise '{}' in {}, falling back to {}",
                document.target,
                self.target_path.display(),
                DEFAULT_TARGET.as_str()
            );
            DEFAULT_TARGET
        }))
    }

    fn save_target(&self, target: Exercise) -> Result<()> {
        let document = TargetDocument {
            target: target.as_str().to_string(),
        };
        let serialized = serde_json::to_string_pretty(&document)?;
        write_document(&self.target_path, &serialized)
    }
}
