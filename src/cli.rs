use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tokio::sync::mpsc;

use crate::detect::DetectorConfig;
use crate::models::{Exercise, RepCounts};
use crate::pose::PoseFrame;
use crate::store::{JsonStore, SqliteStore, TrackerStore};
use crate::tracker::{TrackerController, TrackerEvent};

/// CLI arguments parser.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    /// Subcommand to execute.
    pub command: Commands,
}

/// Commands for the CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a recorded landmark log through a tracking session
    Replay(ReplayArgs),
    /// Choose which exercise the detector tracks
    SetTarget(SetTargetArgs),
    /// Show rep counters, optionally resetting them
    Counts(CountsArgs),
}

/// Where the counters and target selector live.
#[derive(Args, Debug)]
pub struct StoreArgs {
    /// Directory for the JSON counter and target documents
    #[arg(long, default_value = ".", conflicts_with = "sqlite")]
    pub store_dir: PathBuf,

    /// Keep counters in a SQLite database instead of JSON documents
    #[arg(long)]
    pub sqlite: Option<PathBuf>,
}

/// Arguments for the replay command.
#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Landmark log to replay, one JSON frame per line
    pub frames: PathBuf,

    #[command(flatten)]
    pub store: StoreArgs,
}

/// Arguments for the set-target command.
#[derive(Args, Debug)]
pub struct SetTargetArgs {
    /// Exercise to track (jumping_jacks, squats, high_knees, or none)
    #[arg(value_parser = parse_exercise)]
    pub exercise: Exercise,

    #[command(flatten)]
    pub store: StoreArgs,
}

/// Arguments for the counts command.
#[derive(Args, Debug)]
pub struct CountsArgs {
    /// Zero the counters after printing them
    #[arg(long, default_value_t = false)]
    pub reset: bool,

    #[command(flatten)]
    pub store: StoreArgs,
}

fn parse_exercise(value: &str) -> Result<Exercise, String> {
    Exercise::from_name(value).ok_or_else(|| {
        format!("unknown exercise '{value}' (expected jumping_jacks, squats, high_knees, or none)")
    })
}

pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Replay(args) => match &args.store.sqlite {
            Some(path) => run_replay(SqliteStore::open(path)?, &args.frames).await,
            None => run_replay(JsonStore::in_dir(&args.store.store_dir), &args.frames).await,
        },
        Commands::SetTarget(args) => match &args.store.sqlite {
            Some(path) => run_set_target(&SqliteStore::open(path)?, args.exercise),
            None => run_set_target(&JsonStore::in_dir(&args.store.store_dir), args.exercise),
        },
        Commands::Counts(args) => match &args.store.sqlite {
            Some(path) => run_counts(&SqliteStore::open(path)?, args.reset),
            None => run_counts(&JsonStore::in_dir(&args.store.store_dir), args.reset),
        },
    }
}

async fn run_replay<S>(store: S, frames_path: &Path) -> Result<()>
where
    S: TrackerStore + Send + 'static,
{
    let frames = read_frames(frames_path)?;

    let mut controller = TrackerController::new();
    let (frame_tx, frame_rx) = mpsc::channel(64);
    let (event_tx, mut event_rx) = mpsc::channel(64);
    controller.start_tracking(store, DetectorConfig::default(), frame_rx, event_tx)?;

    let feeder = tokio::spawn(async move {
        for frame in frames {
            if frame_tx.send(frame).await.is_err() {
                break;
            }
        }
    });

    while let Some(event) = event_rx.recv().await {
        match event {
            TrackerEvent::Rep(rep) => {
                println!("✓ {}: {} reps", rep.exercise.as_str(), rep.total);
            }
            TrackerEvent::Visibility(notice) => {
                let names: Vec<&str> = notice
                    .missing_joints
                    .iter()
                    .map(|joint| joint.name())
                    .collect();
                println!(
                    "⚠ cannot detect {}: missing {}",
                    notice.exercise.as_str(),
                    names.join(", ")
                );
            }
            TrackerEvent::Stopped { counts } => print_counts(&counts),
        }
    }

    feeder.await.context("frame feeder task failed to join")?;
    controller.stop_tracking().await
}

fn read_frames(path: &Path) -> Result<Vec<PoseFrame>> {
    let file = File::open(path)
        .with_context(|| format!("failed to open frame log at {}", path.display()))?;

    let mut frames = Vec::new();
    for (number, line) in BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| format!("failed to read frame log line {}", number + 1))?;
        if line.trim().is_empty() {
            continue;
        }
        let frame: PoseFrame = serde_json::from_str(&line)
            .with_context(|| format!("invalid frame on line {}", number + 1))?;
        frames.push(frame);
    }
    Ok(frames)
}

fn run_set_target<S: TrackerStore>(store: &S, exercise: Exercise) -> Result<()> {
    store.save_target(exercise)?;
    println!("Target exercise set to {}", exercise.as_str());
    Ok(())
}

fn run_counts<S: TrackerStore>(store: &S, reset: bool) -> Result<()> {
    let counts = read_counts(store, reset)?;
    print_counts(&counts);

    if reset {
        println!("Counters reset");
    }
    Ok(())
}

/// Read-and-zero: returns the counters as stored, and with `reset` set
/// writes the same document back with every value zeroed.
fn read_counts<S: TrackerStore>(store: &S, reset: bool) -> Result<RepCounts> {
    let counts = store.load_counts()?;
    if reset {
        let mut zeroed = counts.clone();
        zeroed.reset();
        store.save_counts(&zeroed)?;
    }
    Ok(counts)
}

fn print_counts(counts: &RepCounts) {
    println!("Final counts:");
    println!("Jumping Jacks: {}", counts.jumping_jacks);
    println!("Squats: {}", counts.squats);
    println!("High Knees: {}", counts.high_knees);
}
