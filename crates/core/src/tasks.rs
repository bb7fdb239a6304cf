//! Task constants, priority levels, and field validation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length of a task title in characters.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Smallest accepted custom work duration, in minutes.
pub const MIN_TIMER_MINUTES: u32 = 1;

/// Largest accepted custom work duration, in minutes.
pub const MAX_TIMER_MINUTES: u32 = 240;

/// Entity name used in `NotFound` errors for tasks.
pub const TASK_ENTITY: &str = "Task";

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

/// How urgent a task is. Serialized as `"low"`, `"medium"` or `"high"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// All priorities, lowest first.
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Priority::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid priority '{s}'. Must be one of: low, medium, high"
                ))
            })
    }
}

// ---------------------------------------------------------------------------
// Validation functions
// ---------------------------------------------------------------------------

/// Validate a task title: must contain a non-whitespace character and fit
/// within [`MAX_TITLE_LENGTH`].
pub fn validate_title(title: &str) -> Result<(), String> {
    if title.trim().is_empty() {
        return Err("Task title cannot be empty".to_string());
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(format!(
            "Task title exceeds maximum length of {MAX_TITLE_LENGTH} characters"
        ));
    }
    Ok(())
}

/// Validate a custom work duration in minutes.
pub fn validate_timer_minutes(minutes: u32) -> Result<(), String> {
    if (MIN_TIMER_MINUTES..=MAX_TIMER_MINUTES).contains(&minutes) {
        Ok(())
    } else {
        Err(format!(
            "Custom timer duration must be between {MIN_TIMER_MINUTES} and {MAX_TIMER_MINUTES} minutes, got {minutes}"
        ))
    }
}
