//! Handlers for the interval timer.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use tasktimer_core::types::DbId;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::state::AppState;

/// Request body for `PUT /timer/task`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BindTimerTask {
    /// Task to time, or `null` to fall back to the default duration.
    pub task_id: Option<DbId>,
}

/// GET /timer
pub async fn get_timer(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.timer.snapshot().await)
}

/// POST /timer/toggle
///
/// Start or pause the countdown without changing phase or time left.
pub async fn toggle_timer(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.timer.toggle().await;

    tracing::info!(
        is_running = snapshot.is_running,
        phase = ?snapshot.phase,
        time_left_seconds = snapshot.time_left_seconds,
        "Timer toggled"
    );

    Json(snapshot)
}

/// POST /timer/reset
///
/// Return to an idle work phase with the full work duration.
pub async fn reset_timer(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.timer.reset().await;

    tracing::info!(work_minutes = snapshot.work_minutes, "Timer reset");

    Json(snapshot)
}

/// PUT /timer/task
///
/// Bind the timer to a task. The task's custom duration (if any) is read
/// once here; later edits to the task do not affect the running timer.
pub async fn bind_task(
    State(state): State<AppState>,
    AppJson(input): AppJson<BindTimerTask>,
) -> AppResult<impl IntoResponse> {
    let custom_minutes = match input.task_id {
        Some(id) => state.tasks.read().await.get(id)?.custom_timer_duration,
        None => None,
    };

    let snapshot = state.timer.bind_task(input.task_id, custom_minutes).await;

    tracing::info!(
        task_id = ?input.task_id,
        work_minutes = snapshot.work_minutes,
        "Timer bound to task"
    );

    Ok(Json(snapshot))
}
