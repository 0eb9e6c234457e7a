use lesson_core::model::LessonId;
use serde_json::json;

use super::test_harness::{ViewKind, setup_view_harness, setup_view_harness_for_lesson};

#[tokio::test(flavor = "current_thread")]
async fn lesson_view_smoke_renders_bundled_lesson() {
    let mut harness = setup_view_harness(ViewKind::Lesson).await;
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Welcome to Language Models"), "missing heading in {html}");
    assert!(html.contains("Terms and conditions agreements"), "missing choice in {html}");
    assert!(html.contains("lesson-block-5"), "missing last block in {html}");
    assert!(html.contains("0%"), "missing progress in {html}");
    assert!(html.contains("Continue"), "missing continue in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn lesson_view_smoke_renders_missing_lesson() {
    let mut harness = setup_view_harness_for_lesson(ViewKind::Lesson, LessonId::new(404));
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(
        html.contains("This lesson could not be found."),
        "missing error in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn events_view_smoke_renders_log() {
    let mut harness = setup_view_harness(ViewKind::Events).await;
    harness
        .events
        .record("block_appended", json!({ "blockId": "6" }))
        .await
        .expect("record");

    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Event Logs"), "missing title in {html}");
    assert!(html.contains("block_appended"), "missing event in {html}");
}
