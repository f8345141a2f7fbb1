//! Per-frame diagnostic records and the telemetry sink surface
//!
//! One record is pushed per finished frame, suppressed or not, so a
//! suppressed-but-nonzero frame stays distinguishable from a truly empty one
//! in diagnostics. Delivery is fire-and-forget: sinks must not fail the
//! caller, and a lost record never affects score correctness.

use serde::{Deserialize, Serialize};
use std::io::Write;
use std::sync::Mutex;

/// Diagnostic payload for one finished frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameTrace {
    /// Zero-based index of the finished frame.
    pub frame_index: u64,
    /// Union area of everything that moved this frame, in px².
    pub region_area: f64,
    /// Viewport area used for normalization, in px².
    pub viewport_area: f64,
    /// `region_area / viewport_area` (0 when either is 0).
    pub jank_fraction: f64,
    /// Max displacement this frame over the normalization distance, capped at 1.
    pub distance_fraction: f64,
    /// Subframe visibility weight actually applied, already clamped to [0, 1].
    pub weight: f64,
    /// Amount added to the cumulative score (0 when suppressed).
    pub score_delta: f64,
    /// Amount added to the weighted score (0 when suppressed).
    pub weighted_score_delta: f64,
    /// Whether the post-input window discarded this frame's contribution.
    pub suppressed: bool,
}

/// Push interface for per-frame diagnostics.
pub trait TraceSink: Send + Sync {
    fn record_frame(&self, frame: &FrameTrace);
}

/// Discards every record; the default when the host doesn't collect traces.
pub struct NoopTraceSink;

impl NoopTraceSink {
    pub fn new() -> Self {
        NoopTraceSink
    }
}

impl Default for NoopTraceSink {
    fn default() -> Self {
        Self::new()
    }
}

impl TraceSink for NoopTraceSink {
    fn record_frame(&self, _frame: &FrameTrace) {}
}

/// Buffers records in memory; used by tests to assert on emissions.
#[derive(Default)]
pub struct MemoryTraceSink {
    frames: Mutex<Vec<FrameTrace>>,
}

impl MemoryTraceSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> Vec<FrameTrace> {
        self.frames.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.frames.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TraceSink for MemoryTraceSink {
    fn record_frame(&self, frame: &FrameTrace) {
        self.frames.lock().unwrap().push(frame.clone());
    }
}

/// Writes one JSON object per line to the wrapped writer. Serialization or
/// write failures drop the record silently; diagnostics never fail scoring.
pub struct JsonLinesTraceSink<W: Write + Send> {
    out: Mutex<W>,
}

impl<W: Write + Send> JsonLinesTraceSink<W> {
    pub fn new(out: W) -> Self {
        JsonLinesTraceSink {
            out: Mutex::new(out),
        }
    }
}

impl<W: Write + Send> TraceSink for JsonLinesTraceSink<W> {
    fn record_frame(&self, frame: &FrameTrace) {
        if let Ok(js) = serde_json::to_string(frame) {
            if let Ok(mut out) = self.out.lock() {
                let _ = writeln!(out, "{}", js);
            }
        }
    }
}
