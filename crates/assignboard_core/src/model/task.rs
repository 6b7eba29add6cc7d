//! To-do task record and task input errors.
//!
//! # Invariants
//! - `id` is a time-ordered UUID and is never reused.
//! - `text` is stored trimmed and non-empty.
//! - `created_at` is Unix epoch milliseconds and never changes after creation.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque task identifier; creation order is recoverable from UUID v7 bits.
pub type TaskId = Uuid;

/// One to-do entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

impl Task {
    /// Creates an incomplete task with a fresh identifier.
    pub fn new(text: impl Into<String>, created_at: i64) -> Self {
        Self {
            id: Uuid::now_v7(),
            text: text.into(),
            completed: false,
            created_at,
        }
    }

    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }

    /// Returns whether this task counts toward the duplicate check.
    pub fn is_active(&self) -> bool {
        !self.completed
    }
}

/// Rejection reasons for a new task's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskInputError {
    Empty,
    TooLong { max: usize },
    Duplicate,
}

impl Display for TaskInputError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "Task cannot be empty."),
            Self::TooLong { max } => write!(f, "Task text is too long (max {max} characters)."),
            Self::Duplicate => write!(f, "This task already exists."),
        }
    }
}

impl Error for TaskInputError {}
