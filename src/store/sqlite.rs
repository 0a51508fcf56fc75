use std::{
    path::Path,
    sync::{Arc, Mutex},
};

use anyhow::{anyhow, bail, Context, Result};
use log::{error, warn};
use rusqlite::{params, Connection, OptionalExtension};

use crate::models::{Exercise, RepCounts};

use super::{TrackerStore, DEFAULT_TARGET};

const CURRENT_SCHEMA_VERSION: i32 = 1;

/// SQLite-backed store. One connection behind a mutex: store traffic is a
/// few small statements per counted rep, well inside a frame period.
/// Clones share the connection.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create database directory {}", parent.display())
                })?;
            }
        }

        let conn = Connection::open(path)
            .with_context(|| format!("failed to open database {}", path.display()))?;
        Self::initialize(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn =
            Connection::open_in_memory().context("failed to open in-memory database")?;
        Self::initialize(conn)
    }

    fn initialize(mut conn: Connection) -> Result<Self> {
        if let Err(err) = conn.pragma_update(None, "journal_mode", "WAL") {
            error!("Failed to enable WAL mode: {err}");
        }

        run_migrations(&mut conn).context("failed to run store migrations")?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }
}

fn run_migrations(conn: &mut Connection) -> Result<()> {
    let version: i32 = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .context("failed to read user_version pragma")?;

    if version > CURRENT_SCHEMA_VERSION {
        bail!(
            "store version ({}) is newer than supported schema ({})",
            version,
            CURRENT_SCHEMA_VERSION
        );
    }

    if version == CURRENT_SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn
        .transaction()
        .context("failed to open migration transaction")?;
    tx.execute_batch(include_str!("schemas/schema_v1.sql"))
        .context("failed to execute schema_v1.sql")?;
    tx.pragma_update(None, "user_version", CURRENT_SCHEMA_VERSION)
        .context("failed to update user_version pragma")?;
    tx.commit().context("failed to commit migrations")?;

    Ok(())
}

fn to_u64(value: i64) -> Result<u64> {
    u64::try_from(value).map_err(|_| anyhow!("count {value} is negative"))
}

fn to_i64(value: u64) -> Result<i64> {
    i64::try_from(value).map_err(|_| anyhow!("count {value} exceeds SQLite INTEGER range"))
}

impl TrackerStore for SqliteStore {
    fn load_counts(&self) -> Result<RepCounts> {
        let conn = self.conn.lock().unwrap();
        let mut statement = conn
            .prepare("SELECT exercise, count FROM rep_counts")
            .context("failed to prepare counter query")?;
        let rows = statement
            .query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
            })
            .context("failed to query counters")?;

        // Absent rows read as zero, which is the all-zero initial state.
        let mut counts = RepCounts::default();
        for row in rows {
            let (name, value) = row.context("failed to read counter row")?;
            match Exercise::from_name(&name) {
                Some(exercise) => counts.add(exercise, to_u64(value)?),
                None => warn!("ignoring unknown counter row '{name}'"),
            }
        }
        Ok(counts)
    }

    fn save_counts(&self, counts: &RepCounts) -> Result<()> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn
            .transaction()
            .context("failed to open counter transaction")?;
        for (exercise, value) in [
            (Exercise::JumpingJacks, counts.jumping_jacks),
            (Exercise::Squats, counts.squats),
            (Exercise::HighKnees, counts.high_knees),
        ] {
            tx.execute(
                "INSERT OR REPLACE INTO rep_counts (exercise, count) VALUES (?1, ?2)",
                params![exercise.as_str(), to_i64(value)?],
            )
            .with_context(|| format!("failed to store counter for {}", exercise.as_str()))?;
        }
        tx.commit().context("failed to commit counters")
    }

    fn load_target(&self) -> Result<Exercise> {
        let conn = self.conn.lock().unwrap();
        let stored: Option<String> = conn
            .query_row("SELECT target FROM target_exercise WHERE id = 1", [], |row| {
                row.get(0)
            })
            .optional()
            .context("failed to query target exercise")?;

        match stored {
            Some(name) => Ok(Exercise::from_name(&name).unwrap_or_else(|| {
                warn!(
                    "unknown target exercise '{name}' in store, falling back to {}",
                    DEFAULT_TARGET.as_str()
                );
                DEFAULT_TARGET
            })),
            None => {
                conn.execute(
                    "INSERT INTO target_exercise (id, target) VALUES (1, ?1)",
                    params![DEFAULT_TARGET.as_str()],
                )
                .context("failed to store default target")?;
                Ok(DEFAULT_TARGET)
            }
        }
    }

    fn save_target(&self, target: Exercise) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT OR REPLACE INTO target_exercise (id, target) VALUES (1, ?1)",
            params![target.as_str()],
        )
        .context("failed to store target exercise")?;
        Ok(())
    }
}
