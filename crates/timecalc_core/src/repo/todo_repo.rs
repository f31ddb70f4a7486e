//! Todo repository contract and in-memory implementation.
//!
//! # Responsibility
//! - Keep todo items in insertion order for the current process.
//! - Report semantic misses (`NotFound`) and identity clashes to services.
//!
//! # Invariants
//! - Item ids are unique within one repository.
//! - Replacing an item's timed description keeps its position and id.

use crate::model::timed::Timed;
use crate::model::todo::{TodoId, TodoItem};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for todo storage operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    NotFound(TodoId),
    DuplicateId(TodoId),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "todo not found: {id}"),
            Self::DuplicateId(id) => write!(f, "todo id already exists: {id}"),
        }
    }
}

impl Error for RepoError {}

/// Storage interface for ordered todo items.
pub trait TodoRepository {
    fn insert_todo(&mut self, item: TodoItem) -> RepoResult<TodoId>;
    fn replace_timed_description(&mut self, id: TodoId, timed: Timed<String>) -> RepoResult<()>;
    fn remove_todo(&mut self, id: TodoId) -> RepoResult<TodoItem>;
    /// Removes every item whose id is in `ids`, returning them in store order.
    fn remove_todos(&mut self, ids: &HashSet<TodoId>) -> Vec<TodoItem>;
    fn get_todo(&self, id: TodoId) -> Option<&TodoItem>;
    fn list_todos(&self) -> &[TodoItem];
}

/// Process-lifetime todo storage backed by a `Vec`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTodoRepository {
    items: Vec<TodoItem>,
}

impl InMemoryTodoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, id: TodoId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }
}

impl TodoRepository for InMemoryTodoRepository {
    fn insert_todo(&mut self, item: TodoItem) -> RepoResult<TodoId> {
        if self.position(item.id).is_some() {
            return Err(RepoError::DuplicateId(item.id));
        }
        let id = item.id;
        self.items.push(item);
        Ok(id)
    }

    fn replace_timed_description(&mut self, id: TodoId, timed: Timed<String>) -> RepoResult<()> {
        let index = self.position(id).ok_or(RepoError::NotFound(id))?;
        self.items[index].timed_description = timed;
        Ok(())
    }

    fn remove_todo(&mut self, id: TodoId) -> RepoResult<TodoItem> {
        let index = self.position(id).ok_or(RepoError::NotFound(id))?;
        Ok(self.items.remove(index))
    }

    fn remove_todos(&mut self, ids: &HashSet<TodoId>) -> Vec<TodoItem> {
        let (removed, kept): (Vec<TodoItem>, Vec<TodoItem>) = std::mem::take(&mut self.items)
            .into_iter()
            .partition(|item| ids.contains(&item.id));
        self.items = kept;
        removed
    }

    fn get_todo(&self, id: TodoId) -> Option<&TodoItem> {
        self.items.iter().find(|item| item.id == id)
    }

    fn list_todos(&self) -> &[TodoItem] {
        &self.items
    }
}
