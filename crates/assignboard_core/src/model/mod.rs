//! Domain records for the registration and to-do pages.
//!
//! # Responsibility
//! - Define the data shapes shared by validation, state and storage code.
//!
//! # Invariants
//! - Form records are transient; only tasks are persisted.

pub mod form;
pub mod task;
