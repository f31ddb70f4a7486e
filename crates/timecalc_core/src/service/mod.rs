//! Core use-case services.
//!
//! # Responsibility
//! - Own feature state for one application session.
//! - Keep UI/FFI layers decoupled from model and storage details.

pub mod calculator_service;
pub mod todo_store;
