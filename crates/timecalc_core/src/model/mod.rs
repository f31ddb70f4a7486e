//! Domain model for the duration calculator and timed todos.
//!
//! # Responsibility
//! - Define the value types every feature computes with.
//! - Keep arithmetic and parsing rules in one place for all callers.
//!
//! # Invariants
//! - Model values are immutable once built; operations return new values.
//! - Every todo is identified by a stable `TodoId`.

pub mod calculator;
pub mod duration;
pub mod timed;
pub mod todo;
