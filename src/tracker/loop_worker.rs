use serde::Serialize;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::detect::{RepDetector, RepEvent, VisibilityNotice};
use crate::models::RepCounts;
use crate::pose::PoseFrame;
use crate::store::TrackerStore;

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

// Import the logging macros (exported at crate root)
use crate::{log_error, log_info};

/// What a tracking session emits while it runs. `Stopped` is always the
/// final event, whatever ended the session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TrackerEvent {
    Rep(RepEvent),
    Visibility(VisibilityNotice),
    Stopped { counts: RepCounts },
}

/// Drive a detector from a frame channel until the source closes or the
/// session is cancelled. Quiet frames produce no events.
pub async fn tracking_loop<S: TrackerStore>(
    session_id: String,
    mut detector: RepDetector<S>,
    mut frames: mpsc::Receiver<PoseFrame>,
    events: mpsc::Sender<TrackerEvent>,
    cancel_token: CancellationToken,
) {
    log_info!(
        "tracking session {} started ({})",
        session_id,
        detector.target().as_str()
    );

    loop {
        tokio::select! {
            maybe_frame = frames.recv() => {
                let Some(frame) = maybe_frame else {
                    log_info!("frame source closed for session {}", session_id);
                    break;
                };

                let report = detector.process_frame(&frame);

                if let Some(rep) = report.rep {
                    if events.send(TrackerEvent::Rep(rep)).await.is_err() {
                        log_error!("event receiver dropped, stopping session {}", session_id);
                        break;
                    }
                }
                if let Some(notice) = report.visibility {
                    if events.send(TrackerEvent::Visibility(notice)).await.is_err() {
                        log_error!("event receiver dropped, stopping session {}", session_id);
                        break;
                    }
                }
            }
            _ = cancel_token.cancelled() => {
                log_info!("tracking session {} shutting down", session_id);
                break;
            }
        }
    }

    let counts = detector.counts().clone();
    log_info!(
        "session {} final counts: jumping jacks {}, squats {}, high knees {}",
        session_id,
        counts.jumping_jacks,
        counts.squats,
        counts.high_knees
    );
    let _ = events.send(TrackerEvent::Stopped { counts }).await;
}
