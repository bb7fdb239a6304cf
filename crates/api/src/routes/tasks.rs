//! Route definitions for tasks.
//!
//! Mounted at `/tasks` by `api_routes()`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::tasks;
use crate::state::AppState;

/// Task routes.
///
/// ```text
/// GET    /                   -> list_tasks (?q, priority, category)
/// POST   /                   -> create_task
/// GET    /{id}               -> get_task
/// PATCH  /{id}               -> update_task
/// DELETE /{id}               -> delete_task
/// POST   /{id}/sessions      -> record_session
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(tasks::list_tasks).post(tasks::create_task))
        .route(
            "/{id}",
            get(tasks::get_task)
                .patch(tasks::update_task)
                .delete(tasks::delete_task),
        )
        .route("/{id}/sessions", post(tasks::record_session))
}
