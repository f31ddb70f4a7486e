//! Todo item domain model.
//!
//! # Responsibility
//! - Define the todo entity shown by list and detail projections.
//!
//! # Invariants
//! - `id` is stable and never reused for another item.
//! - `is_completed` stays `false`; finishing a todo removes it from the store.

use crate::model::duration::Duration;
use crate::model::timed::Timed;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a todo item.
pub type TodoId = Uuid;

/// Todo entry: a description timed with the effort it takes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: TodoId,
    pub timed_description: Timed<String>,
    /// Dormant flag; nothing in core sets it.
    pub is_completed: bool,
}

impl TodoItem {
    /// Creates a new item with a generated stable ID.
    pub fn new(description: impl Into<String>, duration: Duration) -> Self {
        Self {
            id: Uuid::new_v4(),
            timed_description: Timed::new(duration, description.into()),
            is_completed: false,
        }
    }

    pub fn description(&self) -> &str {
        &self.timed_description.value
    }

    pub fn duration(&self) -> Duration {
        self.timed_description.duration
    }
}
