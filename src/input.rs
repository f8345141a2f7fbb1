//! Input classification and the post-input suppression window
//!
//! Layout that moves right after the user pressed something is usually the
//! page responding to that press, not instability. The tracker therefore
//! discards frame contributions inside a short window after qualifying
//! input. The window restarts on every qualifying event (refresh, not
//! additive) and expiry is observed lazily through [`InputSuppression::is_active`]
//! rather than a scheduled callback.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Classified user-input event kinds as dispatched by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputEventKind {
    MouseDown,
    MouseUp,
    MouseMove,
    PointerDown,
    PointerUp,
    PointerMove,
    KeyDown,
    KeyUp,
    Tap,
    Wheel,
}

impl InputEventKind {
    /// True for kinds that commonly cause an expected layout response
    /// (activation and key input). Hover movement, key release, and wheel
    /// scrolling don't qualify; a page shifting under those is still jank.
    pub fn expects_layout_response(self) -> bool {
        matches!(
            self,
            InputEventKind::MouseDown
                | InputEventKind::MouseUp
                | InputEventKind::PointerDown
                | InputEventKind::PointerUp
                | InputEventKind::KeyDown
                | InputEventKind::Tap
        )
    }
}

/// Idle / Suppressing state machine for the post-input window.
///
/// `is_active` is a pure read: repeated queries at the same instant give the
/// same answer, and expiry becomes visible simply by the deadline passing.
#[derive(Debug)]
pub struct InputSuppression {
    window: Duration,
    active_until: Option<Instant>,
}

impl InputSuppression {
    pub fn new(window: Duration) -> Self {
        InputSuppression {
            window,
            active_until: None,
        }
    }

    /// Start (or restart) the window: the countdown runs from `now`
    /// regardless of any previous deadline.
    pub fn notify(&mut self, now: Instant) {
        self.active_until = Some(now + self.window);
    }

    pub fn is_active(&self, now: Instant) -> bool {
        match self.active_until {
            Some(deadline) => now < deadline,
            None => false,
        }
    }

    /// Cancel any pending window; used on dispose.
    pub fn stop(&mut self) {
        self.active_until = None;
    }
}
