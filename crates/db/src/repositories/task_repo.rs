//! Repository for tasks.

use std::collections::BTreeMap;

use tasktimer_core::error::CoreError;
use tasktimer_core::tasks::TASK_ENTITY;
use tasktimer_core::types::DbId;
use validator::{Validate, ValidationErrors};

use crate::models::task::{CreateTask, Task, UpdateTask};

/// Owns every task for the lifetime of the process.
///
/// Ids come from a counter owned by the instance: they start at 1, only
/// ever increase, and are never handed out twice, even after a delete.
/// Because ids are monotonic, the `BTreeMap` key order is insertion order.
///
/// All methods run to completion synchronously. Callers that share a repo
/// across tasks must serialize writers themselves (the API keeps it behind
/// an `RwLock`).
#[derive(Debug)]
pub struct TaskRepo {
    tasks: BTreeMap<DbId, Task>,
    next_id: DbId,
}

impl TaskRepo {
    /// Create an empty repository whose first task gets id 1.
    pub fn new() -> Self {
        Self {
            tasks: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// List every task in insertion order.
    pub fn list(&self) -> Vec<Task> {
        self.tasks.values().cloned().collect()
    }

    /// Find a task by id.
    pub fn get(&self, id: DbId) -> Result<Task, CoreError> {
        self.tasks.get(&id).cloned().ok_or_else(|| not_found(id))
    }

    /// Insert a new task, returning the stored copy.
    ///
    /// The new task is not completed, has no sessions, and takes
    /// `Priority::Medium` unless the input names another priority.
    pub fn create(&mut self, input: CreateTask) -> Result<Task, CoreError> {
        input.validate().map_err(validation_failed)?;

        let id = self.next_id;
        self.next_id += 1;

        let task = Task {
            id,
            title: input.title,
            description: input.description,
            priority: input.priority.unwrap_or_default(),
            categories: input.categories,
            completed: false,
            current_session: 0,
            custom_timer_duration: input.custom_timer_duration,
            notes: input.notes,
        };
        self.tasks.insert(id, task.clone());

        tracing::debug!(task_id = id, "Task inserted");
        Ok(task)
    }

    /// Merge the supplied fields into an existing task.
    ///
    /// The whole update is validated before anything is written, so either
    /// every field lands or none does.
    pub fn update(&mut self, id: DbId, input: UpdateTask) -> Result<Task, CoreError> {
        input.validate().map_err(validation_failed)?;

        let task = self.tasks.get_mut(&id).ok_or_else(|| not_found(id))?;
        input.apply_to(task);

        tracing::debug!(task_id = id, "Task updated");
        Ok(task.clone())
    }

    /// Attribute one more completed timer session to a task.
    pub fn increment_session(&mut self, id: DbId) -> Result<Task, CoreError> {
        let task = self.tasks.get_mut(&id).ok_or_else(|| not_found(id))?;
        task.current_session = task.current_session.saturating_add(1);

        tracing::debug!(
            task_id = id,
            current_session = task.current_session,
            "Task session recorded"
        );
        Ok(task.clone())
    }

    /// Remove a task.
    pub fn delete(&mut self, id: DbId) -> Result<(), CoreError> {
        self.tasks.remove(&id).ok_or_else(|| not_found(id))?;

        tracing::debug!(task_id = id, "Task removed");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl Default for TaskRepo {
    fn default() -> Self {
        Self::new()
    }
}

fn not_found(id: DbId) -> CoreError {
    CoreError::NotFound {
        entity: TASK_ENTITY,
        id,
    }
}

/// Flatten validator errors into a single human-readable message.
fn validation_failed(errors: ValidationErrors) -> CoreError {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("Invalid value for {field}"),
            })
        })
        .collect();
    messages.sort();

    if messages.is_empty() {
        CoreError::Validation("Invalid task data".to_string())
    } else {
        CoreError::Validation(messages.join("; "))
    }
}
