//! Repository layer abstractions and storage implementations.
//!
//! # Responsibility
//! - Define storage contracts used by the todo service.
//! - Isolate collection details from use-case orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`, `DuplicateId`);
//!   services decide whether a miss is an error.

pub mod todo_repo;
