//! Derived, render-ready projections.
//!
//! # Invariants
//! - Views are recomputed from source data and never stored.

pub mod task_view;
