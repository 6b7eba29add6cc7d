//! Draft text and transient error for the "add task" input.
//!
//! # Invariants
//! - At most one error message is held at a time.
//! - The error clears on the next keystroke whose trimmed text is non-empty.
//! - A successful submit clears both draft and error.

use crate::model::task::{TaskId, TaskInputError};
use crate::repo::task_repo::TaskRepository;
use crate::service::task_store::TaskStore;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskInput {
    draft: String,
    error: Option<TaskInputError>,
}

impl TaskInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn error(&self) -> Option<&TaskInputError> {
        self.error.as_ref()
    }

    /// Message to render under the input, if any.
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }

    pub fn on_input(&mut self, text: &str) {
        self.draft = text.to_string();
        if self.error.is_some() && !text.trim().is_empty() {
            self.error = None;
        }
    }

    /// Adds the current draft to `store`.
    pub fn submit<R: TaskRepository>(&mut self, store: &mut TaskStore<R>) -> Option<TaskId> {
        match store.add(&self.draft) {
            Ok(id) => {
                self.draft.clear();
                self.error = None;
                Some(id)
            }
            Err(err) => {
                self.error = Some(err);
                None
            }
        }
    }
}
