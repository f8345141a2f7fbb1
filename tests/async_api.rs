#![cfg(feature = "async-api")]

//! Round-trip tests for the worker-backed async facade

use rfjank::trace::{MemoryTraceSink, NoopTraceSink};
use rfjank::viewport::FixedViewport;
use rfjank::{InputEventKind, Rect, TrackerConfig, TrackerHandle, Viewport};
use std::sync::Arc;

fn viewport_1000() -> Arc<FixedViewport> {
    Arc::new(FixedViewport::new(Viewport {
        width: 1000,
        height: 1000,
    }))
}

#[tokio::test]
async fn notifications_are_ordered_before_finish() {
    let handle = TrackerHandle::new(
        TrackerConfig::default(),
        viewport_1000(),
        Arc::new(NoopTraceSink::new()),
    )
    .await
    .unwrap();

    handle.notify_object_moved(
        Rect::new(0.0, 0.0, 100.0, 100.0),
        Rect::new(0.0, 50.0, 100.0, 150.0),
        true,
        false,
    );
    handle.finish_frame().await.unwrap();

    let scores = handle.scores().await.unwrap();
    assert!(scores.score > 0.0);
    assert_eq!(scores.max_distance, 50.0);
    assert_eq!(scores.frame_count, 1);
    assert!(!scores.suppression_active);

    handle.close().await.unwrap();
}

#[tokio::test]
async fn input_suppression_works_through_the_facade() {
    let handle = TrackerHandle::new(
        TrackerConfig::default(),
        viewport_1000(),
        Arc::new(NoopTraceSink::new()),
    )
    .await
    .unwrap();

    handle.notify_input(InputEventKind::Tap);
    handle.notify_object_moved(
        Rect::new(0.0, 0.0, 100.0, 100.0),
        Rect::new(0.0, 50.0, 100.0, 150.0),
        true,
        false,
    );
    handle.finish_frame().await.unwrap();

    let scores = handle.scores().await.unwrap();
    assert_eq!(scores.score, 0.0);
    assert_eq!(scores.max_distance, 50.0);

    handle.close().await.unwrap();
}

#[tokio::test]
async fn dispose_keeps_scores_queryable() {
    let sink = Arc::new(MemoryTraceSink::new());
    let handle = TrackerHandle::new(TrackerConfig::default(), viewport_1000(), sink.clone())
        .await
        .unwrap();

    handle.notify_layer_moved(
        Rect::new(0.0, 0.0, 200.0, 200.0),
        Rect::new(0.0, 100.0, 200.0, 300.0),
    );
    handle.finish_frame().await.unwrap();
    let before = handle.scores().await.unwrap();

    handle.dispose().await.unwrap();
    handle.notify_layer_moved(
        Rect::new(0.0, 0.0, 200.0, 200.0),
        Rect::new(0.0, 100.0, 200.0, 300.0),
    );
    handle.finish_frame().await.unwrap();

    let after = handle.scores().await.unwrap();
    assert_eq!(after, before);
    assert_eq!(sink.len(), 1);

    handle.close().await.unwrap();
}

#[tokio::test]
async fn invalid_config_fails_initialization() {
    let bad = TrackerConfig {
        distance_normalization_px: -1.0,
        ..Default::default()
    };
    let res = TrackerHandle::new(bad, viewport_1000(), Arc::new(NoopTraceSink::new())).await;
    assert!(res.is_err());
}

#[tokio::test]
async fn handles_are_cloneable() {
    let handle = TrackerHandle::new(
        TrackerConfig::default(),
        viewport_1000(),
        Arc::new(NoopTraceSink::new()),
    )
    .await
    .unwrap();

    let clone = handle.clone();
    clone.notify_object_moved(
        Rect::new(0.0, 0.0, 50.0, 50.0),
        Rect::new(0.0, 25.0, 50.0, 75.0),
        true,
        false,
    );
    handle.finish_frame().await.unwrap();
    assert!(handle.scores().await.unwrap().score > 0.0);

    handle.close().await.unwrap();
}
