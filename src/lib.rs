//! RFox Jank Tracker
//!
//! A layout-instability scoring engine for rendering pipelines. The
//! layout/paint side reports rectangles that changed position between paint
//! passes; this crate unions the affected screen area per frame and folds it
//! into a cumulative "jank" score, ignoring movement inside a short window
//! after qualifying user input (a page reacting to a tap is not jank).
//!
//! # Features
//!
//! - **Swappable region backends**: a disjoint-rectangle region for the
//!   sparse common case and a scanline region for dense frames, behind one
//!   trait and one configuration switch
//! - **Collaborator surfaces**: viewport, telemetry, and clock are traits so
//!   hosts and tests can inject their own
//! - **Async facade** (feature `async-api`): worker-thread backed handle for
//!   async hosts
//!
//! # Example
//!
//! ```
//! use rfjank::{JankTracker, Rect, TrackerConfig, Viewport};
//! use rfjank::viewport::FixedViewport;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let viewport = Arc::new(FixedViewport::new(Viewport { width: 1000, height: 1000 }));
//! let mut tracker = JankTracker::new(TrackerConfig::default(), viewport)?;
//!
//! // A 100x100 element shifted 50px down between paint passes.
//! tracker.notify_object_moved(
//!     Rect::new(0.0, 0.0, 100.0, 100.0),
//!     Rect::new(0.0, 50.0, 100.0, 150.0),
//!     true,
//!     false,
//! );
//! tracker.finish_frame();
//! assert!(tracker.score() > 0.0);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub use error::{Error, Result};

pub mod geometry;
pub mod input;
pub mod region;
pub mod time;
pub mod trace;
pub mod tracker;
pub mod viewport;

// Async-friendly tracker handle (worker-thread backed abstraction)
#[cfg(feature = "async-api")]
pub mod async_api;

pub use geometry::Rect;
pub use input::InputEventKind;
pub use region::RegionImpl;
pub use trace::{FrameTrace, TraceSink};
pub use tracker::JankTracker;
pub use viewport::ViewportSource;

// Re-export the handle at the crate root for ergonomic use
#[cfg(feature = "async-api")]
pub use async_api::TrackerHandle;

use std::sync::Arc;

/// Configuration for the jank tracker
///
/// The thresholds are tuned constants, not physical quantities; the defaults
/// match the behavior described in the module docs and can be overridden per
/// tracker.
///
/// # Examples
///
/// ```
/// let cfg = rfjank::TrackerConfig::default();
/// assert_eq!(cfg.movement_threshold_px, 3.0);
/// ```
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Moves whose Chebyshev corner displacement is below this many pixels
    /// are treated as sub-pixel jitter and ignored
    pub movement_threshold_px: f32,
    /// Displacement at which the distance fraction saturates at 1.0
    pub distance_normalization_px: f32,
    /// Duration of the post-input suppression window in milliseconds
    pub input_suppression_window_ms: u64,
    /// Which region implementation accumulates the per-frame moved area
    pub region_impl: RegionImpl,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            movement_threshold_px: 3.0,
            distance_normalization_px: 600.0,
            input_suppression_window_ms: 500,
            region_impl: RegionImpl::Basic,
        }
    }
}

/// Viewport dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Area in px², as f64 for the normalization math.
    pub fn area(&self) -> f64 {
        self.width as f64 * self.height as f64
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

/// Create a tracker with default collaborators (no trace collection, system
/// clock). Convenience over [`JankTracker::new`].
pub fn new_tracker(
    config: TrackerConfig,
    viewport: Arc<dyn ViewportSource>,
) -> Result<JankTracker> {
    JankTracker::new(config, viewport)
}
