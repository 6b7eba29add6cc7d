//! To-do collection use-case service.
//!
//! # Responsibility
//! - Own the ordered task collection for one to-do page instance.
//! - Validate new task text and apply add/toggle/remove/clear mutations.
//! - Persist the full collection and notify observers after each mutation.
//!
//! # Invariants
//! - Collection order is most-recent-first; `add` prepends.
//! - No two incomplete tasks share the same case-insensitive text, across
//!   both `add` and reopening via `toggle`.
//! - Persistence failures are logged and never fail a mutation.

use crate::clock::{Clock, SystemClock};
use crate::config::{AppConfig, DEFAULT_TASK_MAX_LEN};
use crate::model::task::{Task, TaskId, TaskInputError};
use crate::repo::task_repo::TaskRepository;
use crate::view::task_view::{derive_view, TaskFilter, TaskSort};
use log::{error, info, warn};

/// Callback invoked with the full collection after every mutation.
pub type TaskObserver = Box<dyn FnMut(&[Task]) + Send>;

/// In-memory task collection backed by a repository.
pub struct TaskStore<R: TaskRepository> {
    tasks: Vec<Task>,
    repo: R,
    clock: Box<dyn Clock + Send>,
    max_len: usize,
    observers: Vec<TaskObserver>,
}

impl<R: TaskRepository> TaskStore<R> {
    /// Loads the persisted collection using the system clock and default limits.
    pub fn open(repo: R) -> Self {
        Self::open_with(repo, Box::new(SystemClock), DEFAULT_TASK_MAX_LEN)
    }

    pub fn from_config(repo: R, config: &AppConfig) -> Self {
        Self::open_with(repo, Box::new(SystemClock), config.task_max_len)
    }

    /// Loads the persisted collection once.
    ///
    /// Missing or unreadable data yields an empty collection.
    pub fn open_with(repo: R, clock: Box<dyn Clock + Send>, max_len: usize) -> Self {
        let tasks = match repo.load() {
            Ok(tasks) => {
                info!(
                    "event=tasks_load module=todo status=ok count={}",
                    tasks.len()
                );
                tasks
            }
            Err(err) => {
                warn!("event=tasks_load module=todo status=degraded fallback=empty error={err}");
                Vec::new()
            }
        };
        Self {
            tasks,
            repo,
            clock,
            max_len,
            observers: Vec::new(),
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Number of incomplete tasks ("items left").
    pub fn active_count(&self) -> usize {
        self.tasks.iter().filter(|task| task.is_active()).count()
    }

    pub fn has_completed(&self) -> bool {
        self.tasks.iter().any(|task| task.completed)
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Returns the trimmed text when it may be added.
    ///
    /// Checks run empty, then too long, then duplicate.
    pub fn check_text(&self, text: &str) -> Result<String, TaskInputError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(TaskInputError::Empty);
        }
        if trimmed.chars().count() > self.max_len {
            return Err(TaskInputError::TooLong { max: self.max_len });
        }
        let folded = trimmed.to_lowercase();
        let duplicate = self
            .tasks
            .iter()
            .any(|task| task.is_active() && task.text.to_lowercase() == folded);
        if duplicate {
            return Err(TaskInputError::Duplicate);
        }
        Ok(trimmed.to_string())
    }

    /// Prepends a new incomplete task.
    pub fn add(&mut self, text: &str) -> Result<TaskId, TaskInputError> {
        let text = self.check_text(text)?;
        let task = Task::new(text, self.clock.now_epoch_ms());
        let id = task.id;
        self.tasks.insert(0, task);
        self.commit("add", true);
        Ok(id)
    }

    /// Flips completion of `id`. Returns whether the flag changed.
    ///
    /// Reopening a completed task is refused while an incomplete task with
    /// the same case-insensitive text exists.
    pub fn toggle(&mut self, id: TaskId) -> bool {
        let position = self.tasks.iter().position(|task| task.id == id);
        let changed = match position {
            Some(index) if self.reopen_blocked(index) => {
                warn!("event=task_toggle module=todo status=rejected reason=duplicate");
                false
            }
            Some(index) => {
                self.tasks[index].toggle();
                true
            }
            None => false,
        };
        self.commit("toggle", changed);
        changed
    }

    /// Deletes `id`. Returns whether a task matched.
    pub fn remove(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        let removed = self.tasks.len() != before;
        self.commit("remove", removed);
        removed
    }

    /// Drops every completed task. Returns how many were removed.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(Task::is_active);
        let removed = before - self.tasks.len();
        self.commit("clear_completed", removed > 0);
        removed
    }

    /// Registers a callback run after every mutation that changed the collection.
    pub fn subscribe(&mut self, observer: impl FnMut(&[Task]) + Send + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Filtered, sorted projection of the current collection.
    pub fn view(&self, filter: TaskFilter, sort: TaskSort) -> Vec<&Task> {
        derive_view(&self.tasks, filter, sort)
    }

    fn reopen_blocked(&self, index: usize) -> bool {
        let candidate = &self.tasks[index];
        if candidate.is_active() {
            return false;
        }
        let folded = candidate.text.to_lowercase();
        self.tasks
            .iter()
            .any(|task| task.is_active() && task.text.to_lowercase() == folded)
    }

    /// Persists the collection; observers only hear about real changes.
    fn commit(&mut self, action: &'static str, changed: bool) {
        match self.repo.save(&self.tasks) {
            Ok(()) => info!(
                "event=tasks_save module=todo status=ok action={action} changed={changed} count={}",
                self.tasks.len()
            ),
            Err(err) => error!(
                "event=tasks_save module=todo status=error action={action} error={err}"
            ),
        }
        if !changed {
            return;
        }
        for observer in &mut self.observers {
            observer(&self.tasks);
        }
    }
}
