//! Flutter-facing bindings for `assignboard_core`.

pub mod api;
