//! Integration tests for the post-input suppression window

use rfjank::time::ManualClock;
use rfjank::trace::MemoryTraceSink;
use rfjank::viewport::FixedViewport;
use rfjank::{InputEventKind, JankTracker, Rect, TrackerConfig, Viewport};
use std::sync::Arc;
use std::time::Duration;

struct Fixture {
    tracker: JankTracker,
    clock: Arc<ManualClock>,
    sink: Arc<MemoryTraceSink>,
}

fn fixture() -> Fixture {
    let clock = Arc::new(ManualClock::new());
    let sink = Arc::new(MemoryTraceSink::new());
    let viewport = Arc::new(FixedViewport::new(Viewport {
        width: 1000,
        height: 1000,
    }));
    let tracker = JankTracker::with_collaborators(
        TrackerConfig::default(),
        viewport,
        sink.clone(),
        clock.clone(),
    )
    .unwrap();
    Fixture {
        tracker,
        clock,
        sink,
    }
}

fn shift(tracker: &mut JankTracker) {
    tracker.notify_object_moved(
        Rect::new(0.0, 0.0, 100.0, 100.0),
        Rect::new(0.0, 50.0, 100.0, 150.0),
        true,
        false,
    );
}

#[test]
fn movement_after_input_is_not_scored_but_distance_is_tracked() {
    let mut f = fixture();
    f.tracker.notify_input(InputEventKind::Tap);
    assert!(f.tracker.is_active());

    shift(&mut f.tracker);
    f.tracker.finish_frame();

    assert_eq!(f.tracker.score(), 0.0);
    assert_eq!(f.tracker.weighted_score(), 0.0);
    assert_eq!(f.tracker.max_distance(), 50.0);
}

#[test]
fn suppressed_frames_are_traced_and_distinguishable() {
    let mut f = fixture();
    f.tracker.notify_input(InputEventKind::MouseDown);
    shift(&mut f.tracker);
    f.tracker.finish_frame();

    let frames = f.sink.frames();
    assert_eq!(frames.len(), 1);
    assert!(frames[0].suppressed);
    // The discarded movement is still visible in the diagnostics, which is
    // how a suppressed-but-nonzero frame differs from an empty one.
    assert!(frames[0].jank_fraction > 0.0);
    assert_eq!(frames[0].score_delta, 0.0);
    assert_eq!(frames[0].weighted_score_delta, 0.0);
}

#[test]
fn scoring_resumes_after_the_window_expires() {
    let mut f = fixture();
    f.tracker.notify_input(InputEventKind::KeyDown);

    f.clock.advance(Duration::from_millis(499));
    assert!(f.tracker.is_active());

    f.clock.advance(Duration::from_millis(2));
    assert!(!f.tracker.is_active());

    shift(&mut f.tracker);
    f.tracker.finish_frame();
    assert!(f.tracker.score() > 0.0);
}

#[test]
fn repeated_input_refreshes_the_window() {
    let mut f = fixture();
    f.tracker.notify_input(InputEventKind::MouseDown);
    f.clock.advance(Duration::from_millis(300));
    f.tracker.notify_input(InputEventKind::MouseUp);

    // 600ms after the first event but only 300ms after the refresh.
    f.clock.advance(Duration::from_millis(300));
    assert!(f.tracker.is_active());
    shift(&mut f.tracker);
    f.tracker.finish_frame();
    assert_eq!(f.tracker.score(), 0.0);

    // The refresh replaced the deadline rather than extending it twice over.
    f.clock.advance(Duration::from_millis(201));
    assert!(!f.tracker.is_active());
}

#[test]
fn non_qualifying_input_does_not_suppress() {
    let mut f = fixture();
    f.tracker.notify_input(InputEventKind::MouseMove);
    f.tracker.notify_input(InputEventKind::Wheel);
    f.tracker.notify_input(InputEventKind::KeyUp);
    assert!(!f.tracker.is_active());

    shift(&mut f.tracker);
    f.tracker.finish_frame();
    assert!(f.tracker.score() > 0.0);
}

#[test]
fn is_active_is_a_stable_read_within_a_frame() {
    let mut f = fixture();
    f.tracker.notify_input(InputEventKind::PointerDown);
    let first = f.tracker.is_active();
    for _ in 0..10 {
        assert_eq!(f.tracker.is_active(), first);
    }
}

#[test]
fn scoring_before_any_input_is_unaffected() {
    let mut f = fixture();
    shift(&mut f.tracker);
    f.tracker.finish_frame();
    assert!(f.tracker.score() > 0.0);
}
