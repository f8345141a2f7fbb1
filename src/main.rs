use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rfjank::time::ManualClock;
use rfjank::trace::{JsonLinesTraceSink, NoopTraceSink, TraceSink};
use rfjank::viewport::FixedViewport;
use rfjank::{InputEventKind, JankTracker, Rect, RegionImpl, TrackerConfig, Viewport};
use serde::Deserialize;
use std::io::{BufRead, BufReader};
use std::sync::Arc;
use std::time::Duration;

/// One recorded pipeline event, one JSON object per line.
#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ReplayEvent {
    ObjectMoved {
        old: Rect,
        new: Rect,
        #[serde(default = "default_visible")]
        visible: bool,
        #[serde(default)]
        clipped: bool,
        #[serde(default)]
        at_ms: u64,
    },
    LayerMoved {
        old: Rect,
        new: Rect,
        #[serde(default)]
        at_ms: u64,
    },
    Input {
        kind: InputEventKind,
        #[serde(default)]
        at_ms: u64,
    },
    FinishFrame {
        #[serde(default)]
        at_ms: u64,
    },
}

fn default_visible() -> bool {
    true
}

impl ReplayEvent {
    fn at_ms(&self) -> u64 {
        match self {
            ReplayEvent::ObjectMoved { at_ms, .. }
            | ReplayEvent::LayerMoved { at_ms, .. }
            | ReplayEvent::Input { at_ms, .. }
            | ReplayEvent::FinishFrame { at_ms } => *at_ms,
        }
    }
}

#[derive(Parser)]
#[command(name = "rfjank", about = "Replay recorded movement traces through the jank tracker")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a recorded JSON-lines movement trace
    Replay {
        /// Path to the trace file (one JSON event per line)
        path: String,
        /// Viewport width in px
        #[arg(long, default_value_t = 1280)]
        width: u32,
        /// Viewport height in px
        #[arg(long, default_value_t = 720)]
        height: u32,
        /// Emit one JSON record per finished frame on stdout
        #[arg(long)]
        frames: bool,
        /// Accumulate with the scanline region instead of the basic one
        #[arg(long)]
        scanline: bool,
    },
}

fn replay(path: &str, width: u32, height: u32, frames: bool, scanline: bool) -> Result<()> {
    let file = std::fs::File::open(path).with_context(|| format!("open trace {}", path))?;

    let config = TrackerConfig {
        region_impl: if scanline {
            RegionImpl::Scanline
        } else {
            RegionImpl::Basic
        },
        ..Default::default()
    };
    let viewport = Arc::new(FixedViewport::new(Viewport { width, height }));
    let clock = Arc::new(ManualClock::new());
    let trace: Arc<dyn TraceSink> = if frames {
        Arc::new(JsonLinesTraceSink::new(std::io::stdout()))
    } else {
        Arc::new(NoopTraceSink::new())
    };

    let mut tracker =
        JankTracker::with_collaborators(config, viewport, trace, clock.clone())?;

    let mut last_ms = 0u64;
    for line in BufReader::new(file).lines() {
        let line = line.context("read trace line")?;
        if line.trim().is_empty() {
            continue;
        }
        let event = match serde_json::from_str::<ReplayEvent>(&line) {
            Ok(ev) => ev,
            Err(_) => continue, // skip malformed lines
        };

        let at_ms = event.at_ms();
        if at_ms > last_ms {
            clock.advance(Duration::from_millis(at_ms - last_ms));
            last_ms = at_ms;
        }

        match event {
            ReplayEvent::ObjectMoved {
                old,
                new,
                visible,
                clipped,
                ..
            } => tracker.notify_object_moved(old, new, visible, clipped),
            ReplayEvent::LayerMoved { old, new, .. } => tracker.notify_layer_moved(old, new),
            ReplayEvent::Input { kind, .. } => tracker.notify_input(kind),
            ReplayEvent::FinishFrame { .. } => tracker.finish_frame(),
        }
    }

    println!("frames:         {}", tracker.frame_count());
    println!("score:          {}", tracker.score());
    println!("weighted score: {}", tracker.weighted_score());
    println!("max distance:   {}", tracker.max_distance());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Replay {
            path,
            width,
            height,
            frames,
            scanline,
        } => replay(&path, width, height, frames, scanline),
    }
}
