//! Flutter-facing bindings for the time calculator core.

pub mod api;
