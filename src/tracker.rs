//! The jank tracker: movement accumulation and end-of-frame scoring
//!
//! The layout/paint side reports every on-screen rectangle that changed
//! position since the previous paint pass; the tracker unions the affected
//! areas into a per-frame region and, at `finish_frame`, converts that
//! region into a score contribution normalized by viewport size, scaled by
//! how far things moved, weighted by subframe visibility, and gated by the
//! post-input suppression window.

use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::input::{InputEventKind, InputSuppression};
use crate::region::{new_region, Region};
use crate::time::{Clock, SystemClock};
use crate::trace::{FrameTrace, NoopTraceSink, TraceSink};
use crate::viewport::ViewportSource;
use crate::TrackerConfig;
use std::sync::Arc;
use std::time::Duration;

/// Tracks visual instability for one rendered frame/document.
///
/// Strictly single-owner: all notifications and `finish_frame` calls for a
/// tracker happen in one ordered sequence on the owning thread. The tracker
/// never retains the rectangles it is told about.
pub struct JankTracker {
    config: TrackerConfig,
    viewport: Arc<dyn ViewportSource>,
    trace: Arc<dyn TraceSink>,
    clock: Arc<dyn Clock>,

    region: Box<dyn Region>,
    suppression: InputSuppression,

    // Cumulative outputs; each is monotonically non-decreasing.
    score: f64,
    weighted_score: f64,
    max_distance: f32,

    frame_max_distance: f32,
    frame_index: u64,
    disposed: bool,
}

impl JankTracker {
    /// Create a tracker with default collaborators: no trace collection and
    /// the system clock.
    pub fn new(config: TrackerConfig, viewport: Arc<dyn ViewportSource>) -> Result<Self> {
        Self::with_collaborators(
            config,
            viewport,
            Arc::new(NoopTraceSink::new()),
            Arc::new(SystemClock::new()),
        )
    }

    /// Create a tracker with explicit trace sink and clock.
    pub fn with_collaborators(
        config: TrackerConfig,
        viewport: Arc<dyn ViewportSource>,
        trace: Arc<dyn TraceSink>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        config.validate()?;
        let region = new_region(config.region_impl);
        let suppression =
            InputSuppression::new(Duration::from_millis(config.input_suppression_window_ms));
        Ok(JankTracker {
            config,
            viewport,
            trace,
            clock,
            region,
            suppression,
            score: 0.0,
            weighted_score: 0.0,
            max_distance: 0.0,
            frame_max_distance: 0.0,
            frame_index: 0,
            disposed: false,
        })
    }

    /// Report that a layout object paints at a different position than in the
    /// previous frame. Invisible or fully clipped objects are ignored, as is
    /// sub-threshold jitter.
    pub fn notify_object_moved(
        &mut self,
        old_rect: Rect,
        new_rect: Rect,
        visible: bool,
        clipped_away: bool,
    ) {
        if !visible || clipped_away {
            return;
        }
        self.accumulate(old_rect, new_rect);
    }

    /// Report that a whole layer moved without per-object invalidation
    /// (composited translation). Same accumulation semantics as an object
    /// move; only the caller computes the rects differently.
    pub fn notify_layer_moved(&mut self, old_layer_rect: Rect, new_layer_rect: Rect) {
        self.accumulate(old_layer_rect, new_layer_rect);
    }

    fn accumulate(&mut self, old_rect: Rect, new_rect: Rect) {
        if self.disposed {
            log::debug!("movement after dispose ignored");
            return;
        }
        // Appearing or disappearing content is not a shift.
        if old_rect.is_empty() || new_rect.is_empty() {
            return;
        }

        let dx = (new_rect.left - old_rect.left).abs();
        let dy = (new_rect.top - old_rect.top).abs();
        if dx.max(dy) < self.config.movement_threshold_px {
            return;
        }

        let distance = (dx * dx + dy * dy).sqrt();
        if distance > self.frame_max_distance {
            self.frame_max_distance = distance;
        }

        // Old and new positions both contribute: the union of the pair is
        // exactly the screen area the user saw change.
        self.region.unite(old_rect);
        self.region.unite(new_rect);
    }

    /// Report dispatched user input. Only kinds that commonly cause an
    /// expected layout response start (or restart) the suppression window.
    pub fn notify_input(&mut self, kind: InputEventKind) {
        if self.disposed {
            log::debug!("input after dispose ignored");
            return;
        }
        if kind.expects_layout_response() {
            self.suppression.notify(self.clock.now());
        }
    }

    /// Score the frame that just finished painting and reset per-frame state.
    ///
    /// Always emits one trace record, suppressed or not, and always advances
    /// the frame counter; a frame with no accumulated movement contributes an
    /// exact zero. Max displacement is raised even for suppressed frames,
    /// since only the score contribution is gated.
    pub fn finish_frame(&mut self) {
        if self.disposed {
            log::debug!("finish_frame after dispose ignored");
            return;
        }

        let suppressed = self.suppression.is_active(self.clock.now());
        let viewport_area = self.viewport.viewport().area();
        let region_area = self.region.area();

        let jank_fraction = if viewport_area > 0.0 && region_area > 0.0 {
            region_area / viewport_area
        } else {
            0.0
        };
        let distance_fraction = (self.frame_max_distance as f64
            / self.config.distance_normalization_px as f64)
            .min(1.0);
        let raw = jank_fraction * distance_fraction;
        let weight = self.viewport.subframe_visible_ratio().clamp(0.0, 1.0);

        let (score_delta, weighted_score_delta) = if suppressed {
            if raw > 0.0 {
                log::debug!(
                    "frame {}: contribution {} discarded inside input window",
                    self.frame_index,
                    raw
                );
            }
            (0.0, 0.0)
        } else {
            (raw, raw * weight)
        };

        self.score += score_delta;
        self.weighted_score += weighted_score_delta;
        if self.frame_max_distance > self.max_distance {
            self.max_distance = self.frame_max_distance;
        }

        self.trace.record_frame(&FrameTrace {
            frame_index: self.frame_index,
            region_area,
            viewport_area,
            jank_fraction,
            distance_fraction,
            weight,
            score_delta,
            weighted_score_delta,
            suppressed,
        });

        self.region.clear();
        self.frame_max_distance = 0.0;
        self.frame_index += 1;
    }

    /// Cumulative unweighted jank score.
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Cumulative jank score with each frame's contribution weighted by the
    /// subframe visibility ratio in effect at the time.
    pub fn weighted_score(&self) -> f64 {
        self.weighted_score
    }

    /// The largest displacement any object has moved in any frame.
    pub fn max_distance(&self) -> f32 {
        self.max_distance
    }

    /// Whether the post-input suppression window is currently open.
    pub fn is_active(&self) -> bool {
        self.suppression.is_active(self.clock.now())
    }

    /// Number of frames scored so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_index
    }

    /// Stop the suppression window and freeze the tracker. Scores stay
    /// queryable; further notifications and finishes are ignored and no more
    /// trace records are emitted.
    pub fn dispose(&mut self) {
        self.suppression.stop();
        self.disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl std::fmt::Debug for JankTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JankTracker")
            .field("score", &self.score)
            .field("weighted_score", &self.weighted_score)
            .field("max_distance", &self.max_distance)
            .field("frame_index", &self.frame_index)
            .field("disposed", &self.disposed)
            .finish()
    }
}

impl TrackerConfig {
    pub(crate) fn validate(&self) -> Result<()> {
        if !self.movement_threshold_px.is_finite() || self.movement_threshold_px < 0.0 {
            return Err(Error::Config(format!(
                "movement_threshold_px must be finite and non-negative, got {}",
                self.movement_threshold_px
            )));
        }
        if !self.distance_normalization_px.is_finite() || self.distance_normalization_px <= 0.0 {
            return Err(Error::Config(format!(
                "distance_normalization_px must be finite and positive, got {}",
                self.distance_normalization_px
            )));
        }
        if self.input_suppression_window_ms == 0 {
            return Err(Error::Config(
                "input_suppression_window_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
