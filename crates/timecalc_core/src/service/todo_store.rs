//! Todo list use-case service.
//!
//! # Responsibility
//! - Provide create/update/delete/select/bulk-complete entry points for the
//!   todo screens.
//! - Publish a `TodoSnapshot` to subscribers after every effective change.
//!
//! # Invariants
//! - Selected ids are always a subset of stored ids.
//! - Finishing removes the selected items and clears the whole selection.
//! - Lookup misses are reported as `false`/`None`, never as errors.

use crate::model::duration::Duration;
use crate::model::timed::Timed;
use crate::model::todo::{TodoId, TodoItem};
use crate::navigation::DetailTarget;
use crate::observe::{StateCell, SubscriptionId};
use crate::repo::todo_repo::{InMemoryTodoRepository, RepoError, RepoResult, TodoRepository};
use log::{debug, info};
use std::collections::HashSet;
use std::fmt::{Display, Formatter};

/// Immutable view of the store published to subscribers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoSnapshot {
    pub todos: Vec<TodoItem>,
    pub selected_ids: HashSet<TodoId>,
    pub completion_message: Option<String>,
}

/// Result of finishing several todos together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionSummary {
    pub total: Duration,
    /// Descriptions in store order.
    pub descriptions: Vec<String>,
}

impl CompletionSummary {
    fn from_timed(combined: Timed<Vec<String>>) -> Self {
        Self {
            total: combined.duration,
            descriptions: combined.value,
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl Display for CompletionSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Completed tasks (Total: {}):\n\n", self.total)?;
        for (index, description) in self.descriptions.iter().enumerate() {
            writeln!(f, "{}. {description}", index + 1)?;
        }
        Ok(())
    }
}

/// What `save_todo` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Created(TodoId),
    Updated(TodoId),
    /// Description was blank after trimming; nothing changed.
    RejectedBlankDescription,
}

/// In-memory todo list with selection and bulk completion.
pub struct TodoStore<R: TodoRepository = InMemoryTodoRepository> {
    repo: R,
    selected: HashSet<TodoId>,
    completion: Option<CompletionSummary>,
    state: StateCell<TodoSnapshot>,
}

impl TodoStore<InMemoryTodoRepository> {
    pub fn in_memory() -> Self {
        Self::new(InMemoryTodoRepository::new())
    }

    /// Store pre-filled with the starter items shown on first launch.
    pub fn with_sample_todos() -> RepoResult<Self> {
        let mut store = Self::in_memory();
        for (description, days, hours, minutes) in [
            ("Study for exam", 0, 5, 30),
            ("Grocery shopping", 0, 1, 15),
            ("Complete Android Lab 3", 3, 2, 0),
        ] {
            let duration = Duration::new(days, hours, minutes).unwrap_or(Duration::ZERO);
            store.create_todo(description, duration)?;
        }
        Ok(store)
    }
}

impl<R: TodoRepository> TodoStore<R> {
    /// Creates a store over the provided repository and publishes its content.
    pub fn new(repo: R) -> Self {
        let mut store = Self {
            repo,
            selected: HashSet::new(),
            completion: None,
            state: StateCell::default(),
        };
        store.publish();
        store
    }

    /// Items in insertion order.
    pub fn todos(&self) -> &[TodoItem] {
        self.repo.list_todos()
    }

    pub fn selected_ids(&self) -> &HashSet<TodoId> {
        &self.selected
    }

    pub fn is_selected(&self, id: TodoId) -> bool {
        self.selected.contains(&id)
    }

    pub fn completion_summary(&self) -> Option<&CompletionSummary> {
        self.completion.as_ref()
    }

    pub fn completion_message(&self) -> Option<String> {
        self.completion.as_ref().map(CompletionSummary::message)
    }

    pub fn snapshot(&self) -> &TodoSnapshot {
        self.state.get()
    }

    pub fn subscribe(
        &mut self,
        subscriber: impl FnMut(&TodoSnapshot) + Send + 'static,
    ) -> SubscriptionId {
        self.state.subscribe(subscriber)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.state.unsubscribe(id)
    }

    /// Appends a new todo with a fresh id.
    ///
    /// The in-memory repository never fails here; other repositories may
    /// report `DuplicateId`.
    pub fn create_todo(
        &mut self,
        description: impl Into<String>,
        duration: Duration,
    ) -> RepoResult<TodoId> {
        let id = self.repo.insert_todo(TodoItem::new(description, duration))?;
        info!("event=todo_create module=todo_store status=ok id={id}");
        self.publish();
        Ok(id)
    }

    /// Replaces the description and duration of an existing todo in place.
    ///
    /// Returns `false` when `id` is unknown.
    pub fn update_todo(
        &mut self,
        id: TodoId,
        description: impl Into<String>,
        duration: Duration,
    ) -> bool {
        let timed = Timed::new(duration, description.into());
        match self.repo.replace_timed_description(id, timed) {
            Ok(()) => {
                info!("event=todo_update module=todo_store status=ok id={id}");
                self.publish();
                true
            }
            Err(err) => {
                debug!("event=todo_update module=todo_store status=skipped reason={err}");
                false
            }
        }
    }

    /// Removes a todo and drops it from the selection.
    ///
    /// Returns `false` when `id` is unknown.
    pub fn delete_todo(&mut self, id: TodoId) -> bool {
        match self.repo.remove_todo(id) {
            Ok(_) => {
                self.selected.remove(&id);
                info!("event=todo_delete module=todo_store status=ok id={id}");
                self.publish();
                true
            }
            Err(err) => {
                debug!("event=todo_delete module=todo_store status=skipped reason={err}");
                false
            }
        }
    }

    /// Flips selection for a stored todo; returns whether it is now selected.
    ///
    /// Ids that are not stored are ignored.
    pub fn toggle_selection(&mut self, id: TodoId) -> bool {
        if self.repo.get_todo(id).is_none() {
            debug!(
                "event=todo_select module=todo_store status=skipped reason={}",
                RepoError::NotFound(id)
            );
            return false;
        }
        let selected = if self.selected.remove(&id) {
            false
        } else {
            self.selected.insert(id);
            true
        };
        self.publish();
        selected
    }

    /// Completes every selected todo at once.
    ///
    /// Combines the selected items' timed descriptions in store order, keeps
    /// the summary as the pending completion message, removes the items and
    /// clears the selection. Returns `None` when nothing is selected.
    pub fn finish_selected(&mut self) -> Option<CompletionSummary> {
        if self.selected.is_empty() {
            return None;
        }

        let finished = self.repo.remove_todos(&self.selected);
        self.selected.clear();
        let combined = Timed::combine(finished.into_iter().map(|item| item.timed_description));
        let summary = CompletionSummary::from_timed(combined);

        info!(
            "event=todo_finish module=todo_store status=ok count={} total_minutes={}",
            summary.descriptions.len(),
            summary.total.total_minutes()
        );
        self.completion = Some(summary.clone());
        self.publish();
        Some(summary)
    }

    pub fn clear_completion_message(&mut self) {
        if self.completion.take().is_some() {
            self.publish();
        }
    }

    pub fn get_by_id(&self, id: TodoId) -> Option<&TodoItem> {
        self.repo.get_todo(id)
    }

    /// Saves the detail form.
    ///
    /// # Contract
    /// - Blank descriptions (after trim) are rejected without changes.
    /// - `Existing(id)` with a stored id updates that todo.
    /// - `New`, or an id that is no longer stored, creates a new todo.
    pub fn save_todo(
        &mut self,
        target: DetailTarget,
        description: &str,
        duration: Duration,
    ) -> RepoResult<SaveOutcome> {
        if description.trim().is_empty() {
            return Ok(SaveOutcome::RejectedBlankDescription);
        }

        if let DetailTarget::Existing(id) = target {
            if self.update_todo(id, description, duration) {
                return Ok(SaveOutcome::Updated(id));
            }
        }
        self.create_todo(description, duration)
            .map(SaveOutcome::Created)
    }

    fn publish(&mut self) {
        let snapshot = TodoSnapshot {
            todos: self.repo.list_todos().to_vec(),
            selected_ids: self.selected.clone(),
            completion_message: self.completion_message(),
        };
        self.state.set(snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::{CompletionSummary, SaveOutcome, TodoStore};
    use crate::model::duration::Duration;
    use crate::navigation::DetailTarget;
    use uuid::Uuid;

    fn d(days: i64, hours: i64, minutes: i64) -> Duration {
        Duration::new(days, hours, minutes).expect("non-negative components")
    }

    #[test]
    fn summary_message_lists_numbered_descriptions() {
        let summary = CompletionSummary {
            total: d(0, 6, 45),
            descriptions: vec!["Study".to_string(), "Groceries".to_string()],
        };
        assert_eq!(
            summary.message(),
            "Completed tasks (Total: 6h 45m):\n\n1. Study\n2. Groceries\n"
        );
    }

    #[test]
    fn sample_store_has_three_items() {
        let store = TodoStore::with_sample_todos().unwrap();
        let names = store
            .todos()
            .iter()
            .map(|item| item.description().to_string())
            .collect::<Vec<_>>();
        assert_eq!(
            names,
            vec!["Study for exam", "Grocery shopping", "Complete Android Lab 3"]
        );
        assert_eq!(store.todos()[2].duration().format(), "3d 2h");
    }

    #[test]
    fn toggle_ignores_unknown_ids() {
        let mut store = TodoStore::in_memory();
        assert!(!store.toggle_selection(Uuid::new_v4()));
        assert!(store.selected_ids().is_empty());
    }

    #[test]
    fn finish_with_empty_selection_is_noop() {
        let mut store = TodoStore::in_memory();
        store.create_todo("a", d(0, 1, 0)).unwrap();
        assert_eq!(store.finish_selected(), None);
        assert_eq!(store.todos().len(), 1);
        assert_eq!(store.completion_message(), None);
    }

    #[test]
    fn save_todo_updates_or_creates() {
        let mut store = TodoStore::in_memory();
        let created = store
            .save_todo(DetailTarget::New, "Write report", d(0, 2, 0))
            .unwrap();
        let SaveOutcome::Created(id) = created else {
            panic!("expected create, got {created:?}");
        };

        let updated = store
            .save_todo(DetailTarget::Existing(id), "Write summary", d(0, 3, 0))
            .unwrap();
        assert_eq!(updated, SaveOutcome::Updated(id));
        assert_eq!(store.get_by_id(id).unwrap().description(), "Write summary");

        let stale = store
            .save_todo(DetailTarget::Existing(Uuid::new_v4()), "Other", Duration::ZERO)
            .unwrap();
        assert!(matches!(stale, SaveOutcome::Created(_)));
        assert_eq!(store.todos().len(), 2);

        let blank = store.save_todo(DetailTarget::New, "   ", Duration::ZERO).unwrap();
        assert_eq!(blank, SaveOutcome::RejectedBlankDescription);
        assert_eq!(store.todos().len(), 2);
    }
}
