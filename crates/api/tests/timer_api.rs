//! HTTP-level integration tests for the timer endpoints.
//!
//! The background ticker is not running here; tests drive the shared timer
//! directly through `AppState` to simulate elapsed seconds.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, create_task, get, post_empty, put_json};
use serde_json::json;

#[tokio::test]
async fn initial_snapshot_is_idle_work() {
    let (app, _) = build_test_app();
    let response = get(&app, "/api/timer").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["phase"], "work");
    assert_eq!(json["label"], "Work Time");
    assert_eq!(json["isRunning"], false);
    assert_eq!(json["isBreak"], false);
    assert_eq!(json["timeLeftSeconds"], 1500);
    assert_eq!(json["minutes"], 25);
    assert_eq!(json["seconds"], 0);
    assert_eq!(json["workMinutes"], 25);
    assert_eq!(json["breakMinutes"], 5);
    assert_eq!(json["progress"], 0.0);
    assert!(json["taskId"].is_null());
}

#[tokio::test]
async fn toggle_starts_and_pauses() {
    let (app, _) = build_test_app();

    let json = body_json(post_empty(&app, "/api/timer/toggle").await).await;
    assert_eq!(json["isRunning"], true);

    let json = body_json(post_empty(&app, "/api/timer/toggle").await).await;
    assert_eq!(json["isRunning"], false);
    assert_eq!(json["timeLeftSeconds"], 1500);
}

#[tokio::test]
async fn full_work_phase_rolls_into_running_break() {
    let (app, state) = build_test_app();
    post_empty(&app, "/api/timer/toggle").await;

    let mut flips = 0;
    for _ in 0..1500 {
        if state.timer.tick().await.is_some() {
            flips += 1;
        }
    }
    assert_eq!(flips, 1);

    let json = body_json(get(&app, "/api/timer").await).await;
    assert_eq!(json["phase"], "break");
    assert_eq!(json["label"], "Break Time");
    assert_eq!(json["isRunning"], true);
    assert_eq!(json["timeLeftSeconds"], 300);
}

#[tokio::test]
async fn reset_returns_to_idle_work() {
    let (app, state) = build_test_app();
    post_empty(&app, "/api/timer/toggle").await;
    for _ in 0..1510 {
        state.timer.tick().await;
    }

    let json = body_json(post_empty(&app, "/api/timer/reset").await).await;
    assert_eq!(json["phase"], "work");
    assert_eq!(json["isRunning"], false);
    assert_eq!(json["timeLeftSeconds"], 1500);
}

#[tokio::test]
async fn bind_task_uses_custom_duration() {
    let (app, _) = build_test_app();
    create_task(&app, json!({"title": "Long focus", "customTimerDuration": 50})).await;

    let response = put_json(&app, "/api/timer/task", json!({"taskId": 1})).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["taskId"], 1);
    assert_eq!(json["workMinutes"], 50);
    assert_eq!(json["timeLeftSeconds"], 3000);

    // Reset keeps the bound task's duration.
    let json = body_json(post_empty(&app, "/api/timer/reset").await).await;
    assert_eq!(json["timeLeftSeconds"], 3000);
}

#[tokio::test]
async fn bind_task_without_override_uses_default() {
    let (app, _) = build_test_app();
    create_task(&app, json!({"title": "Normal"})).await;

    let json = body_json(put_json(&app, "/api/timer/task", json!({"taskId": 1})).await).await;
    assert_eq!(json["workMinutes"], 25);
}

#[tokio::test]
async fn duration_is_read_once_when_binding() {
    let (app, _) = build_test_app();
    create_task(&app, json!({"title": "Focus", "customTimerDuration": 40})).await;
    put_json(&app, "/api/timer/task", json!({"taskId": 1})).await;

    common::patch_json(&app, "/api/tasks/1", json!({"customTimerDuration": 10})).await;

    let json = body_json(get(&app, "/api/timer").await).await;
    assert_eq!(json["workMinutes"], 40);
}

#[tokio::test]
async fn unbinding_restores_default_duration() {
    let (app, _) = build_test_app();
    create_task(&app, json!({"title": "Focus", "customTimerDuration": 40})).await;
    put_json(&app, "/api/timer/task", json!({"taskId": 1})).await;

    let json = body_json(put_json(&app, "/api/timer/task", json!({"taskId": null})).await).await;
    assert!(json["taskId"].is_null());
    assert_eq!(json["workMinutes"], 25);
}

#[tokio::test]
async fn bind_unknown_task_returns_404_and_keeps_timer() {
    let (app, _) = build_test_app();
    post_empty(&app, "/api/timer/toggle").await;

    let response = put_json(&app, "/api/timer/task", json!({"taskId": 77})).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(get(&app, "/api/timer").await).await;
    assert_eq!(json["isRunning"], true);
    assert!(json["taskId"].is_null());
}
