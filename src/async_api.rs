use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::input::InputEventKind;
use crate::tracker::JankTracker;
use crate::trace::TraceSink;
use crate::viewport::ViewportSource;
use crate::TrackerConfig;
use std::sync::mpsc::{self, Sender};
use std::sync::Arc;
use std::thread;
use tokio::sync::oneshot;

enum Command {
    // Fire-and-forget notifications, mirroring the synchronous contract.
    ObjectMoved(Rect, Rect, bool, bool),
    LayerMoved(Rect, Rect),
    Input(InputEventKind),

    FinishFrame(oneshot::Sender<()>),
    Scores(oneshot::Sender<ScoreSnapshot>),
    Dispose(oneshot::Sender<()>),
    Close(oneshot::Sender<()>),
}

/// Point-in-time copy of a tracker's cumulative outputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreSnapshot {
    pub score: f64,
    pub weighted_score: f64,
    pub max_distance: f32,
    pub frame_count: u64,
    pub suppression_active: bool,
}

/// An async-friendly tracker abstraction backed by a dedicated worker thread.
///
/// The worker thread owns a synchronous [`JankTracker`] (which is strictly
/// single-owner) and executes commands sent from async tasks, so callers get
/// an async interface without the tracker itself ever being shared across
/// threads. Notifications are fire-and-forget; frame finishes and queries
/// await the worker's acknowledgment, which also preserves the per-frame
/// call ordering.
#[derive(Clone)]
pub struct TrackerHandle {
    cmd_tx: Sender<Command>,
}

impl TrackerHandle {
    /// Spawn a worker thread owning a new tracker.
    pub async fn new(
        config: TrackerConfig,
        viewport: Arc<dyn ViewportSource>,
        trace: Arc<dyn TraceSink>,
    ) -> Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();
        let (init_tx, init_rx): (oneshot::Sender<Result<()>>, oneshot::Receiver<Result<()>>) =
            oneshot::channel();

        thread::spawn(move || {
            // Initialize the tracker on the worker thread
            let clock = Arc::new(crate::time::SystemClock::new());
            let mut tracker =
                match JankTracker::with_collaborators(config, viewport, trace, clock) {
                    Ok(t) => t,
                    Err(err) => {
                        let _ = init_tx.send(Err(err));
                        return;
                    }
                };

            let _ = init_tx.send(Ok(()));

            // Command loop
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    Command::ObjectMoved(old, new, visible, clipped) => {
                        tracker.notify_object_moved(old, new, visible, clipped);
                    }
                    Command::LayerMoved(old, new) => {
                        tracker.notify_layer_moved(old, new);
                    }
                    Command::Input(kind) => {
                        tracker.notify_input(kind);
                    }
                    Command::FinishFrame(resp) => {
                        tracker.finish_frame();
                        let _ = resp.send(());
                    }
                    Command::Scores(resp) => {
                        let _ = resp.send(ScoreSnapshot {
                            score: tracker.score(),
                            weighted_score: tracker.weighted_score(),
                            max_distance: tracker.max_distance(),
                            frame_count: tracker.frame_count(),
                            suppression_active: tracker.is_active(),
                        });
                    }
                    Command::Dispose(resp) => {
                        tracker.dispose();
                        let _ = resp.send(());
                    }
                    Command::Close(resp) => {
                        tracker.dispose();
                        let _ = resp.send(());
                        break;
                    }
                }
            }
        });

        // Wait for the worker to report initialization success or failure
        let init_res = init_rx
            .await
            .map_err(|e| Error::Worker(format!("init canceled: {}", e)))?;
        init_res?;

        Ok(Self { cmd_tx })
    }

    /// Report an object move. Fire-and-forget; a dead worker drops it, which
    /// matches the lossy-diagnostics model of the synchronous API.
    pub fn notify_object_moved(&self, old: Rect, new: Rect, visible: bool, clipped_away: bool) {
        let _ = self
            .cmd_tx
            .send(Command::ObjectMoved(old, new, visible, clipped_away));
    }

    /// Report a composited layer move. Fire-and-forget.
    pub fn notify_layer_moved(&self, old: Rect, new: Rect) {
        let _ = self.cmd_tx.send(Command::LayerMoved(old, new));
    }

    /// Report dispatched user input. Fire-and-forget.
    pub fn notify_input(&self, kind: InputEventKind) {
        let _ = self.cmd_tx.send(Command::Input(kind));
    }

    /// Score the frame that just finished and wait until the worker has
    /// processed every notification sent before this call.
    pub async fn finish_frame(&self) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::FinishFrame(tx))
            .map_err(|e| Error::Worker(format!("finish_frame rejected: {}", e)))?;
        rx.await
            .map_err(|e| Error::Worker(format!("finish_frame canceled: {}", e)))
    }

    /// Read the cumulative scores.
    pub async fn scores(&self) -> Result<ScoreSnapshot> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Scores(tx))
            .map_err(|e| Error::Worker(format!("scores rejected: {}", e)))?;
        rx.await
            .map_err(|e| Error::Worker(format!("scores canceled: {}", e)))
    }

    /// Dispose the tracker but keep the worker alive for score queries.
    pub async fn dispose(&self) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Dispose(tx))
            .map_err(|e| Error::Worker(format!("dispose rejected: {}", e)))?;
        rx.await
            .map_err(|e| Error::Worker(format!("dispose canceled: {}", e)))
    }

    /// Shut down the worker thread. The tracker is disposed first.
    pub async fn close(self) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Close(tx))
            .map_err(|e| Error::Worker(format!("close rejected: {}", e)))?;
        rx.await
            .map_err(|e| Error::Worker(format!("close canceled: {}", e)))
    }
}
