//! Registration form orchestration.
//!
//! # Responsibility
//! - Drive field values, touched flags and errors through UI transitions.
//! - Provide the cancellable one-shot timer used by the autofill check.
//!
//! # See also
//! - `crate::validate::field` for the rules applied on each transition.

pub mod deferred;
pub mod state;
