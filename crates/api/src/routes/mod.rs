pub mod health;
pub mod tasks;
pub mod timer;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /tasks                          list (?q, priority, category), create
/// /tasks/{id}                     get, update (PATCH), delete
/// /tasks/{id}/sessions            record a completed session (POST)
///
/// /timer                          current snapshot
/// /timer/toggle                   start / pause (POST)
/// /timer/reset                    back to idle work phase (POST)
/// /timer/task                     bind the timer to a task (PUT)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/tasks", tasks::router())
        .nest("/timer", timer::router())
}
