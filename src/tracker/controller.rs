use anyhow::{bail, Context, Result};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::detect::{DetectorConfig, RepDetector};
use crate::pose::PoseFrame;
use crate::store::TrackerStore;

use super::loop_worker::{tracking_loop, TrackerEvent};

/// Owns the lifecycle of one tracking session at a time: spawns the loop
/// task on start, cancels and joins it on stop.
pub struct TrackerController {
    handle: Option<JoinHandle<()>>,
    cancel_token: Option<CancellationToken>,
}

impl TrackerController {
    pub fn new() -> Self {
        Self {
            handle: None,
            cancel_token: None,
        }
    }

    /// Build a detector over `store` and start consuming `frames`,
    /// emitting on `events`. Returns the new session id.
    pub fn start_tracking<S>(
        &mut self,
        store: S,
        config: DetectorConfig,
        frames: mpsc::Receiver<PoseFrame>,
        events: mpsc::Sender<TrackerEvent>,
    ) -> Result<String>
    where
        S: TrackerStore + Send + 'static,
    {
        if self.handle.is_some() {
            bail!("tracking already active");
        }

        let detector =
            RepDetector::new(store, config).context("failed to initialize rep detector")?;

        let session_id = Uuid::new_v4().to_string();
        let cancel_token = CancellationToken::new();
        let token_clone = cancel_token.clone();

        let handle = tokio::spawn(tracking_loop(
            session_id.clone(),
            detector,
            frames,
            events,
            token_clone,
        ));

        self.handle = Some(handle);
        self.cancel_token = Some(cancel_token);
        Ok(session_id)
    }

    pub fn is_active(&self) -> bool {
        self.handle.is_some()
    }

    pub async fn stop_tracking(&mut self) -> Result<()> {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }

        if let Some(handle) = self.handle.take() {
            handle
                .await
                .context("tracking loop task failed to join")
                .map(|_| ())
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Exercise;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn start_twice_is_rejected_until_stopped() {
        let mut controller = TrackerController::new();

        let (_, frame_rx) = mpsc::channel::<PoseFrame>(4);
        let (event_tx, _event_rx) = mpsc::channel(4);
        let store = MemoryStore::with_target(Exercise::Squats);
        let session_id = controller
            .start_tracking(store.clone(), DetectorConfig::default(), frame_rx, event_tx)
            .unwrap();
        assert!(!session_id.is_empty());
        assert!(controller.is_active());

        let (_, frame_rx) = mpsc::channel::<PoseFrame>(4);
        let (event_tx, _event_rx) = mpsc::channel(4);
        let err = controller
            .start_tracking(store.clone(), DetectorConfig::default(), frame_rx, event_tx)
            .unwrap_err();
        assert!(err.to_string().contains("already active"));

        controller.stop_tracking().await.unwrap();
        assert!(!controller.is_active());

        let (_, frame_rx) = mpsc::channel::<PoseFrame>(4);
        let (event_tx, _event_rx) = mpsc::channel(4);
        controller
            .start_tracking(store, DetectorConfig::default(), frame_rx, event_tx)
            .unwrap();
        controller.stop_tracking().await.unwrap();
    }

    #[tokio::test]
    async fn stop_without_start_is_a_no_op() {
        let mut controller = TrackerController::new();
        controller.stop_tracking().await.unwrap();
    }

    #[tokio::test]
    async fn dropping_the_frame_sender_ends_the_session() {
        let mut controller = TrackerController::new();

        let (frame_tx, frame_rx) = mpsc::channel::<PoseFrame>(4);
        let (event_tx, mut event_rx) = mpsc::channel(4);
        controller
            .start_tracking(
                MemoryStore::with_target(Exercise::Squats),
                DetectorConfig::default(),
                frame_rx,
                event_tx,
            )
            .unwrap();

        drop(frame_tx);
        match event_rx.recv().await {
            Some(TrackerEvent::Stopped { counts }) => assert_eq!(counts.total(), 0),
            other => panic!("expected stopped event, got {other:?}"),
        }
        controller.stop_tracking().await.unwrap();
    }
}
