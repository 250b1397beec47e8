//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical record persisted in the task snapshot.
//! - Validate user-entered fields before a task enters the store.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - Field values are never mutated once a task is appended to the store.
//! - `is_completed` is carried for snapshot compatibility only; no store
//!   operation reads or writes it.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for one task.
pub type TaskId = Uuid;

/// Validation failures for task construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    /// `id` must not be nil.
    NilId,
    /// `title` is empty after trimming.
    EmptyTitle,
    /// `description` is empty after trimming.
    EmptyDescription,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "id must not be nil"),
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::EmptyDescription => write!(f, "description must not be empty"),
        }
    }
}

impl Error for TaskValidationError {}

/// One to-do item.
///
/// Serialized field names match the snapshot layout written by the mobile
/// app (`id`, `title`, `description`, `isCompleted`). Snapshots from the
/// iOS build spell the flag `IsCompleted`; both are accepted on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    #[serde(rename = "isCompleted", alias = "IsCompleted", default)]
    pub is_completed: bool,
}

impl Task {
    /// Creates a task with a freshly generated id.
    ///
    /// # Errors
    /// - Returns `EmptyTitle` / `EmptyDescription` when a field is blank.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, TaskValidationError> {
        Self::with_id(Uuid::new_v4(), title, description)
    }

    /// Creates a task with a caller-provided id.
    ///
    /// Used by import paths and tests where identity already exists.
    pub fn with_id(
        id: TaskId,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, TaskValidationError> {
        let task = Self {
            id,
            title: title.into(),
            description: description.into(),
            is_completed: false,
        };
        task.validate()?;
        Ok(task)
    }

    /// Validates id and field invariants.
    ///
    /// Title is checked before description, so `("", "")` reports
    /// `EmptyTitle`.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.id.is_nil() {
            return Err(TaskValidationError::NilId);
        }
        if self.title.trim().is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        if self.description.trim().is_empty() {
            return Err(TaskValidationError::EmptyDescription);
        }
        Ok(())
    }
}
