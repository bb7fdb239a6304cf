//! Task model.

use std::borrow::Cow;

use serde::{Deserialize, Deserializer, Serialize};
use tasktimer_core::tasks::{validate_timer_minutes, validate_title, Priority};
use tasktimer_core::types::DbId;
use validator::{Validate, ValidationError};

/// A stored task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub categories: Vec<String>,
    pub completed: bool,
    /// Number of timer sessions attributed to this task.
    pub current_session: u32,
    /// Work duration override in minutes.
    pub custom_timer_duration: Option<u32>,
    pub notes: Vec<String>,
}

/// DTO for creating a new task.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_create_task"))]
pub struct CreateTask {
    pub title: String,
    pub description: Option<String>,
    /// Defaults to [`Priority::Medium`] when omitted.
    pub priority: Option<Priority>,
    #[serde(default)]
    pub categories: Vec<String>,
    pub custom_timer_duration: Option<u32>,
    #[serde(default)]
    pub notes: Vec<String>,
}

impl CreateTask {
    /// A create request carrying only a title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}

/// DTO for updating a task. Absent fields are left unchanged.
///
/// `description` and `custom_timer_duration` use `Option<Option<T>>` so an
/// explicit `null` clears the value.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_update_task"))]
pub struct UpdateTask {
    pub completed: Option<bool>,
    pub current_session: Option<u32>,
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    pub priority: Option<Priority>,
    pub categories: Option<Vec<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub custom_timer_duration: Option<Option<u32>>,
    pub notes: Option<Vec<String>>,
}

impl UpdateTask {
    /// Merge the supplied fields into `task`, field by field.
    pub fn apply_to(self, task: &mut Task) {
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
        if let Some(current_session) = self.current_session {
            task.current_session = current_session;
        }
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(description) = self.description {
            task.description = description;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(categories) = self.categories {
            task.categories = categories;
        }
        if let Some(custom_timer_duration) = self.custom_timer_duration {
            task.custom_timer_duration = custom_timer_duration;
        }
        if let Some(notes) = self.notes {
            task.notes = notes;
        }
    }
}

/// Distinguish an absent field (`None`) from an explicit `null` (`Some(None)`).
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn validation_error(code: &'static str, message: String) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Owned(message))
}

fn validate_create_task(input: &CreateTask) -> Result<(), ValidationError> {
    validate_title(&input.title).map_err(|m| validation_error("title", m))?;
    if let Some(minutes) = input.custom_timer_duration {
        validate_timer_minutes(minutes).map_err(|m| validation_error("custom_timer_duration", m))?;
    }
    Ok(())
}

fn validate_update_task(input: &UpdateTask) -> Result<(), ValidationError> {
    if let Some(title) = &input.title {
        validate_title(title).map_err(|m| validation_error("title", m))?;
    }
    if let Some(Some(minutes)) = input.custom_timer_duration {
        validate_timer_minutes(minutes).map_err(|m| validation_error("custom_timer_duration", m))?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Narrowing applied over the full task list. Every set criterion must match.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    /// Case-insensitive substring of the title or description.
    pub query: Option<String>,
    pub priority: Option<Priority>,
    /// A task matches if it carries any of these categories.
    pub categories: Vec<String>,
}

impl TaskFilter {
    pub fn is_empty(&self) -> bool {
        self.query.is_none() && self.priority.is_none() && self.categories.is_empty()
    }

    pub fn matches(&self, task: &Task) -> bool {
        if let Some(query) = &self.query {
            let query = query.to_lowercase();
            let in_title = task.title.to_lowercase().contains(&query);
            let in_description = task
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&query));
            if !in_title && !in_description {
                return false;
            }
        }

        if self.priority.is_some_and(|p| p != task.priority) {
            return false;
        }

        if !self.categories.is_empty()
            && !task.categories.iter().any(|c| self.categories.contains(c))
        {
            return false;
        }

        true
    }

    /// Keep the matching tasks, preserving order.
    pub fn apply(&self, tasks: Vec<Task>) -> Vec<Task> {
        if self.is_empty() {
            return tasks;
        }
        tasks.into_iter().filter(|t| self.matches(t)).collect()
    }
}
