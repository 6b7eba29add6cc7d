//! Persistence collaborators for the to-do page.
//!
//! # Responsibility
//! - Define the durable key-value contract and its implementations.
//! - Serialize the full task collection under one namespace key.
//!
//! # Invariants
//! - The task collection is always written whole, never patched.
//! - A missing key reads as "no tasks", not as an error.

pub mod kv_store;
pub mod task_repo;
