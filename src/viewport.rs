//! Viewport collaborator surface
//!
//! The tracker normalizes janked area against the viewport and weights
//! subframe contributions by how much of the top-level viewport the frame
//! visibly occupies. Both values come from the host through this trait and
//! are queried fresh each frame, never cached across frames.

use crate::Viewport;
use std::sync::Mutex;

pub trait ViewportSource: Send + Sync {
    /// Current viewport dimensions for the tracked frame.
    fn viewport(&self) -> Viewport;

    /// Fraction of the top-level viewport this frame visibly occupies right
    /// now. 1.0 for the top-level frame itself. Consumers clamp to [0, 1].
    fn subframe_visible_ratio(&self) -> f64 {
        1.0
    }
}

/// Mutex-backed source with setters; doubles as the test implementation and
/// as a reasonable host adapter for embedders with externally-driven resize.
pub struct FixedViewport {
    state: Mutex<(Viewport, f64)>,
}

impl FixedViewport {
    pub fn new(viewport: Viewport) -> Self {
        FixedViewport {
            state: Mutex::new((viewport, 1.0)),
        }
    }

    /// Source for an embedded frame occupying `ratio` of the top-level
    /// viewport.
    pub fn with_subframe_ratio(viewport: Viewport, ratio: f64) -> Self {
        FixedViewport {
            state: Mutex::new((viewport, ratio)),
        }
    }

    pub fn set_viewport(&self, viewport: Viewport) {
        let mut g = self.state.lock().unwrap();
        g.0 = viewport;
    }

    pub fn set_subframe_ratio(&self, ratio: f64) {
        let mut g = self.state.lock().unwrap();
        g.1 = ratio;
    }
}

impl Default for FixedViewport {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}

impl ViewportSource for FixedViewport {
    fn viewport(&self) -> Viewport {
        self.state.lock().unwrap().0
    }

    fn subframe_visible_ratio(&self) -> f64 {
        self.state.lock().unwrap().1
    }
}
