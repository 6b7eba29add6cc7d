//! Registration field validation.
//!
//! # Responsibility
//! - Hold the pure rule set applied to each registration field.
//!
//! # Invariants
//! - Validators are deterministic and side-effect free; callers own the
//!   error/touched bookkeeping.

pub mod field;
