//! End-to-end flows over real stores: an on-disk JSON session, a SQLite
//! session that survives reopening, a channel-fed tracking session, and
//! the CLI commands driven through `run`.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use tokio::sync::mpsc;
use uuid::Uuid;

use repsense::cli::{run, Cli};
use repsense::{
    DetectorConfig, Exercise, JsonStore, Landmark, PoseFrame, PoseLandmark, RepDetector,
    SqliteStore, TrackerController, TrackerEvent, TrackerStore, LANDMARK_COUNT,
};

fn temp_dir(prefix: &str) -> PathBuf {
    std::env::temp_dir().join(format!("{prefix}-{}", Uuid::new_v4()))
}

fn base_frame() -> PoseFrame {
    PoseFrame::new(vec![Landmark::new(0.5, 0.5); LANDMARK_COUNT])
}

fn set(frame: &mut PoseFrame, joint: PoseLandmark, x: f64, y: f64) {
    frame.landmarks[joint.index()] = Landmark::new(x, y);
}

/// Frame with both shoulder angles (hip-shoulder-elbow) at `deg`.
fn arm_frame(deg: f64) -> PoseFrame {
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
fn leg_frame(deg: f64) -> PoseFrame {
    let mut frame = base_frame();
    let theta = deg.to_radians();
    for (hip, knee, ankle, kx) in [
        (
            PoseLandmark::LeftHip,
            PoseLandmark::LeftKnee,
            PoseLandmark::LeftAnkle,
            0.45,
        ),
        (
            PoseLandmark::RightHip,
            PoseLandmark::RightKnee,
            PoseLandmark::RightAnkle,
            0.55,
        ),
    ] {
        set(&mut frame, knee, kx, 0.60);
        set(&mut frame, hip, kx, 0.35);
        set(
            &mut frame,
            ankle,
            kx + 0.22 * theta.sin(),
            0.60 - 0.22 * theta.cos(),
        );
    }
    frame
}

#[test]
fn squat_session_persists_one_rep_to_json_documents() {
    let dir = temp_dir("repsense-e2e");
    let store = JsonStore::in_dir(&dir);
    let mut detector = RepDetector::new(store, DetectorConfig::default()).unwrap();

    // Stand, descend through the engage threshold, rise back out. The
    // second deep frame stays inside the same cycle.
    for deg in [170.0, 115.0, 110.0, 165.0, 170.0] {
        detector.process_frame(&leg_frame(deg));
    }

    let raw = fs::read_to_string(dir.join("rep_counter.json")).unwrap();
    let counts: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(counts["squats"], 1);
    assert_eq!(counts["jumping_jacks"], 0);
    assert_eq!(counts["high_knees"], 0);

    // First load created the selector document with the default target.
    let target = fs::read_to_string(dir.join("target_exercise.json")).unwrap();
    assert!(target.contains(r#""target": "squats""#));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn sqlite_counts_survive_reopening_the_database() {
    let dir = temp_dir("repsense-sqlite");
    let db_path = dir.join("reps.db");

    {
        let store = SqliteStore::open(&db_path).unwrap();
        store.save_target(Exercise::JumpingJacks).unwrap();
        let mut detector = RepDetector::new(store, DetectorConfig::default()).unwrap();
        for deg in [150.0, 90.0, 150.0] {
            detector.process_frame(&arm_frame(deg));
        }
    }

    let reopened = SqliteStore::open(&db_path).unwrap();
    assert_eq!(reopened.load_counts().unwrap().jumping_jacks, 1);
    assert_eq!(reopened.load_target().unwrap(), Exercise::JumpingJacks);

    let _ = fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn tracked_session_emits_reps_then_final_counts() {
    let dir = temp_dir("repsense-session");
    let store = JsonStore::in_dir(&dir);

    let mut controller = TrackerController::new();
    let (frame_tx, frame_rx) = mpsc::channel(8);
    let (event_tx, mut event_rx) = mpsc::channel(8);
    controller
        .start_tracking(store, DetectorConfig::default(), frame_rx, event_tx)
        .unwrap();

    for deg in [170.0, 115.0, 110.0, 165.0] {
        frame_tx.send(leg_frame(deg)).await.unwrap();
    }
    drop(frame_tx);

    let mut reps = 0;
    let mut stopped = None;
    while let Some(event) = event_rx.recv().await {
        match event {
            TrackerEvent::Rep(rep) => {
                assert_eq!(rep.exercise, Exercise::Squats);
                reps += rep.reps;
            }
            TrackerEvent::Visibility(notice) => panic!("unexpected notice: {notice:?}"),
            TrackerEvent::Stopped { counts } => stopped = Some(counts),
        }
    }
    controller.stop_tracking().await.unwrap();

    assert_eq!(reps, 1);
    assert_eq!(stopped.expect("stopped event").squats, 1);

    let _ = fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn replay_command_counts_recorded_frames() {
    let dir = temp_dir("repsense-replay");
    fs::create_dir_all(&dir).unwrap();

    let log_path = dir.join("workout.jsonl");
    let lines: Vec<String> = [170.0, 115.0, 110.0, 165.0, 170.0]
        .iter()
        .map(|deg| serde_json::to_string(&leg_frame(*deg)).unwrap())
        .collect();
    fs::write(&log_path, lines.join("\n")).unwrap();

    let cli = Cli::parse_from([
        "repsense",
        "replay",
        log_path.to_str().unwrap(),
        "--store-dir",
        dir.to_str().unwrap(),
    ]);
    run(cli).await.unwrap();

    let raw = fs::read_to_string(dir.join("rep_counter.json")).unwrap();
    let counts: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(counts["squats"], 1);

    let _ = fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn counts_reset_zeroes_the_stored_document() {
    let dir = temp_dir("repsense-counts");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("rep_counter.json"),
        r#"{"jumping_jacks": 2, "squats": 1, "high_knees": 0, "planks": 9}"#,
    )
    .unwrap();

    let cli = Cli::parse_from([
        "repsense",
        "counts",
        "--reset",
        "--store-dir",
        dir.to_str().unwrap(),
    ]);
    run(cli).await.unwrap();

    let raw = fs::read_to_string(dir.join("rep_counter.json")).unwrap();
    let counts: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(counts["jumping_jacks"], 0);
    assert_eq!(counts["squats"], 0);
    assert_eq!(counts["high_knees"], 0);
    // A key from another writer stays in the document, zeroed with the rest.
    assert_eq!(counts["planks"], 0);

    let _ = fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn set_target_command_writes_the_selector_document() {
    let dir = temp_dir("repsense-target");

    let cli = Cli::parse_from([
        "repsense",
        "set-target",
        "high_knees",
        "--store-dir",
        dir.to_str().unwrap(),
    ]);
    run(cli).await.unwrap();

    let raw = fs::read_to_string(dir.join("target_exercise.json")).unwrap();
    assert!(raw.contains(r#""target": "high_knees""#));

    let _ = fs::remove_dir_all(&dir);
}
