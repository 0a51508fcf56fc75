use anyhow::{Context, Result};
use chrono::Utc;

use crate::models::{Exercise, RepCounts};
use crate::pose::{PoseFrame, PoseLandmark};
use crate::store::TrackerStore;

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::{log_info, log_warn};

use super::classifier;
use super::config::DetectorConfig;
use super::report::{FrameReport, RepEvent, VisibilityNotice};
use super::state::ExerciseState;

/// The frame controller. Owns the active exercise, its hysteresis state,
/// the cooldown and reload counters, and a handle to the backing store.
///
/// `process_frame` never fails: store trouble mid-stream is logged and the
/// in-memory counters stay authoritative until the next successful write.
pub struct RepDetector<S> {
    store: S,
    config: DetectorConfig,
    target: Exercise,
    state: ExerciseState,
    counts: RepCounts,
    /// Set when a counter write failed, cleared by the next successful one.
    /// While set, the pre-increment reload is skipped so a stale read
    /// cannot clobber unsaved reps; the write is retried on the next rep.
    counts_dirty: bool,
    cooldown_frames: u32,
    reload_counter: u32,
    low_visibility_frames: u32,
}

impl<S: TrackerStore> RepDetector<S> {
    /// Load the selector and counters (creating store defaults if missing)
    /// and start with fresh per-exercise state. Store failures here are
    /// fatal; a detector without a selector has nothing to track.
    pub fn new(store: S, config: DetectorConfig) -> Result<Self> {
        let target = store
            .load_target()
            .context("failed to load target exercise")?;
        let counts = store.load_counts().context("failed to load rep counters")?;

        log_info!("tracking target exercise: {}", target.as_str());

        Ok(Self {
            store,
            config,
            target,
            state: ExerciseState::initial(target),
            counts,
            counts_dirty: false,
            cooldown_frames: 0,
            reload_counter: 0,
            low_visibility_frames: 0,
        })
    }

    pub fn target(&self) -> Exercise {
        self.target
    }

    pub fn counts(&self) -> &RepCounts {
        &self.counts
    }

    /// Process one joint snapshot. Per-frame order: cooldown, periodic
    /// selector reload, required-joint gate, visibility gate, then the
    /// classifier + state machine, then rep bookkeeping.
    pub fn process_frame(&mut self, frame: &PoseFrame) -> FrameReport {
        if self.cooldown_frames > 0 {
            self.cooldown_frames -= 1;
            return FrameReport::quiet(self.counts.clone());
        }

        self.reload_counter += 1;
        if self.reload_counter >= self.config.reload_interval_frames {
            self.reload_target();
            self.reload_counter = 0;
        }

        let required = self.target.required_joints();
        if required.is_empty() {
            return FrameReport::quiet(self.counts.clone());
        }

        let occluded = frame.occluded_joints(required, self.config.min_visibility);
        if !occluded.is_empty() {
            return self.skip_low_visibility_frame(occluded);
        }
        self.low_visibility_frames = 0;

        let reps = self.advance_state(frame);
        if reps == 0 {
            return FrameReport::quiet(self.counts.clone());
        }

        let event = self.record_reps(reps);
        FrameReport {
            counts: self.counts.clone(),
            rep: Some(event),
            visibility: None,
        }
    }

    /// Re-read the selector from the store. A changed selector resets all
    /// per-exercise state so a half-finished cycle cannot leak into the
    /// new exercise; a failed read keeps the previous selector.
    fn reload_target(&mut self) {
        match self.store.load_target() {
            Ok(target) if target != self.target => {
                log_info!(
                    "target switched: {} -> {}",
                    self.target.as_str(),
                    target.as_str()
                );
                self.target = target;
                self.state = ExerciseState::initial(target);
            }
            Ok(_) => {}
            Err(err) => log_warn!(
                "failed to reload target exercise, keeping {}: {err:?}",
                self.target.as_str()
            ),
        }
    }

    fn skip_low_visibility_frame(&mut self, occluded: Vec<PoseLandmark>) -> FrameReport {
        self.low_visibility_frames += 1;

        let mut report = FrameReport::quiet(self.counts.clone());
        if self.low_visibility_frames >= self.config.visibility_notice_interval_frames {
            let names: Vec<&str> = occluded.iter().map(|joint| joint.name()).collect();
            log_warn!(
                "cannot detect {}: missing joints {}",
                self.target.as_str(),
                names.join(", ")
            );
            report.visibility = Some(VisibilityNotice {
                exercise: self.target,
                missing_joints: occluded,
                frames_skipped: self.low_visibility_frames,
            });
            self.low_visibility_frames = 0;
        }
        report
    }

    fn advance_state(&mut self, frame: &PoseFrame) -> u32 {
        let config = &self.config;
        match &mut self.state {
            ExerciseState::JumpingJack(cycle) => {
                match classifier::jumping_jack_phase(frame, config) {
                    Some(phase) => u32::from(cycle.advance(phase)),
                    None => 0,
                }
            }
            ExerciseState::Squat(cycle) => match classifier::squat_phase(frame, config) {
                Some(phase) => u32::from(cycle.advance(phase)),
                None => 0,
            },
            ExerciseState::HighKnees { left, right } => {
                match classifier::high_knees_phases(frame, config) {
                    // Both legs may finish a cycle on the same frame; each
                    // lift counts.
                    Some((left_phase, right_phase)) => {
                        u32::from(left.advance(left_phase)) + u32::from(right.advance(right_phase))
                    }
                    None => 0,
                }
            }
            ExerciseState::Idle => 0,
        }
    }

    fn record_reps(&mut self, reps: u32) -> RepEvent {
        // Pick up an external reset that happened between frames. Skipped
        // while a save is owed (see `counts_dirty`).
        if !self.counts_dirty {
            match self.store.load_counts() {
                Ok(counts) => self.counts = counts,
                Err(err) => {
                    log_warn!("failed to reload counters before increment: {err:?}")
                }
            }
        }

        self.counts.add(self.target, u64::from(reps));
        self.cooldown_frames = self.config.cooldown_for(self.target);

        match self.store.save_counts(&self.counts) {
            Ok(()) => self.counts_dirty = false,
            Err(err) => {
                self.counts_dirty = true;
                log_warn!("failed to save counters, will retry on next rep: {err:?}");
            }
        }

        let total = self.counts.get(self.target);
        log_info!("{}: {} reps", self.target.as_str(), total);

        RepEvent {
            exercise: self.target,
            reps,
            total,
            completed_at: Utc::now(),
        }
    }
}
