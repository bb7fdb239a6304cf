//! Handlers for task CRUD.
//!
//! Every handler takes the repository lock once and releases it before
//! building the response.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use tasktimer_core::error::CoreError;
use tasktimer_core::tasks::Priority;
use tasktimer_core::types::DbId;
use tasktimer_db::models::task::{CreateTask, TaskFilter, UpdateTask};

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameter structs
// ---------------------------------------------------------------------------

/// Query parameters for listing tasks. All optional.
#[derive(Debug, Default, Deserialize)]
pub struct TaskListParams {
    /// Case-insensitive search over title and description.
    pub q: Option<String>,
    /// `low`, `medium`, `high`, or `all`.
    pub priority: Option<String>,
    /// Comma-separated categories; a task matches if it has any of them.
    pub category: Option<String>,
}

impl TaskListParams {
    pub fn into_filter(self) -> Result<TaskFilter, CoreError> {
        let query = self
            .q
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty());

        let priority = match self.priority.as_deref().map(str::trim) {
            None | Some("") | Some("all") => None,
            Some(p) => Some(p.parse::<Priority>()?),
        };

        let categories = self
            .category
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(|c| c.trim().to_string())
                    .filter(|c| !c.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(TaskFilter {
            query,
            priority,
            categories,
        })
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /tasks?q=&priority=&category=
///
/// List tasks in insertion order, optionally filtered.
pub async fn list_tasks(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<TaskListParams>,
) -> AppResult<impl IntoResponse> {
    let filter = params.into_filter()?;
    let tasks = state.tasks.read().await.list();

    Ok(Json(filter.apply(tasks)))
}

/// POST /tasks
///
/// Create a new task.
pub async fn create_task(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateTask>,
) -> AppResult<impl IntoResponse> {
    let task = state.tasks.write().await.create(input)?;

    tracing::info!(
        task_id = task.id,
        priority = %task.priority,
        "Task created"
    );

    Ok((StatusCode::CREATED, Json(task)))
}

/// GET /tasks/{id}
///
/// Get a single task by ID.
pub async fn get_task(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let task = state.tasks.read().await.get(id)?;

    Ok(Json(task))
}

/// PATCH /tasks/{id}
///
/// Merge the supplied fields into a task.
pub async fn update_task(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateTask>,
) -> AppResult<impl IntoResponse> {
    let task = state.tasks.write().await.update(id, input)?;

    tracing::info!(task_id = id, completed = task.completed, "Task updated");

    Ok(Json(task))
}

/// DELETE /tasks/{id}
///
/// Remove a task.
pub async fn delete_task(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    state.tasks.write().await.delete(id)?;

    tracing::info!(task_id = id, "Task deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /tasks/{id}/sessions
///
/// Count one more completed timer session against a task.
pub async fn record_session(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let task = state.tasks.write().await.increment_session(id)?;

    tracing::info!(
        task_id = id,
        current_session = task.current_session,
        "Task session recorded"
    );

    Ok(Json(task))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_params_build_an_empty_filter() {
        let filter = TaskListParams::default().into_filter().unwrap();
        assert!(filter.is_empty());
    }

    #[test]
    fn all_priority_means_no_priority_filter() {
        let params = TaskListParams {
            priority: Some("all".to_string()),
            q: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(params.into_filter().unwrap().is_empty());
    }

    #[test]
    fn categories_are_split_on_commas() {
        let params = TaskListParams {
            category: Some("work, home,,".to_string()),
            priority: Some("high".to_string()),
            ..Default::default()
        };
        let filter = params.into_filter().unwrap();
        assert_eq!(filter.categories, vec!["work", "home"]);
        assert_eq!(filter.priority, Some(Priority::High));
    }

    #[test]
    fn unknown_priority_is_rejected() {
        let params = TaskListParams {
            priority: Some("urgent".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            params.into_filter(),
            Err(CoreError::Validation(_))
        ));
    }
}
