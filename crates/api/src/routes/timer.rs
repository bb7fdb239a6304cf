//! Route definitions for the interval timer.
//!
//! Mounted at `/timer` by `api_routes()`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::timer;
use crate::state::AppState;

/// Timer routes.
///
/// ```text
/// GET    /                   -> get_timer
/// POST   /toggle             -> toggle_timer
/// POST   /reset              -> reset_timer
/// PUT    /task               -> bind_task
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(timer::get_timer))
        .route("/toggle", post(timer::toggle_timer))
        .route("/reset", post(timer::reset_timer))
        .route("/task", put(timer::bind_task))
}
