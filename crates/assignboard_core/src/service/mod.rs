//! To-do use-case services.
//!
//! # Responsibility
//! - Orchestrate task mutations over repository persistence.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod task_input;
pub mod task_store;
