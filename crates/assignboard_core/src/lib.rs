//! Core logic for the Assignboard registration and to-do client.
//! This crate is the single source of truth for form and task invariants.

pub mod clock;
pub mod config;
pub mod db;
pub mod form;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod shell;
pub mod validate;
pub mod view;

pub use clock::{Clock, SystemClock};
pub use config::{AppConfig, ConfigError, Country, CountryCatalog};
pub use form::deferred::{CancelHandle, OneShot};
pub use form::state::{FormState, SubmitOutcome, SubmitSink};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::form::{ErrorMap, FormField, FormRecord, TouchedSet};
pub use model::task::{Task, TaskId, TaskInputError};
pub use repo::kv_store::{
    KeyValueStore, MemoryKvStore, SqliteKvStore, StorageError, StorageResult,
};
pub use repo::task_repo::{KvTaskRepository, TaskRepository};
pub use service::task_input::TaskInput;
pub use service::task_store::{TaskObserver, TaskStore};
pub use shell::{Page, Shell};
pub use validate::field::FieldValidator;
pub use view::task_view::{compare_text, derive_view, TaskFilter, TaskSort};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
