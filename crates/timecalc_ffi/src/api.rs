//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose calculator and todo use-cases to Dart via FRB.
//! - Own the single `AppSession` for the process.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Ids cross the boundary as UUID strings; unknown or unparseable ids are
//!   lookup misses, never errors.

use log::warn;
use once_cell::sync::Lazy;
use std::sync::{Mutex, MutexGuard};
use timecalc_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    AppSession, CalculatorView, CoreConfig, DetailTarget, Duration, Key, SaveOutcome, TodoItem,
};
use uuid::Uuid;

static SESSION: Lazy<Mutex<AppSession>> = Lazy::new(|| Mutex::new(build_session()));

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Keypad view returned after each calculator call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculatorResponse {
    /// Main display line.
    pub display: String,
    /// Running total line; empty when no `+` is pending.
    pub secondary: String,
    /// `false` when the label was not a keypad button.
    pub accepted: bool,
}

impl CalculatorResponse {
    fn from_view(view: &CalculatorView, accepted: bool) -> Self {
        Self {
            display: view.display.clone(),
            secondary: view.secondary.clone(),
            accepted,
        }
    }
}

/// Todo row for list and detail screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoEntry {
    pub id: String,
    pub description: String,
    /// Formatted duration, e.g. `5h 30m`.
    pub duration_label: String,
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub selected: bool,
}

/// Result of saving the detail form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoActionResponse {
    pub ok: bool,
    pub todo_id: Option<String>,
    pub message: String,
}

impl TodoActionResponse {
    fn success(message: impl Into<String>, id: Uuid) -> Self {
        Self {
            ok: true,
            todo_id: Some(id.to_string()),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            todo_id: None,
            message: message.into(),
        }
    }
}

/// Presses one keypad button by label (`0-9`, `d`, `h`, `m`, `+`, `=`, `C`).
///
/// # FFI contract
/// - Unknown labels leave state unchanged and return `accepted = false`.
#[flutter_rust_bridge::frb(sync)]
pub fn calculator_press(label: String) -> CalculatorResponse {
    let mut session = lock_session();
    match Key::from_label(&label) {
        Some(key) => CalculatorResponse::from_view(session.calculator.press(key), true),
        None => CalculatorResponse::from_view(session.calculator.view(), false),
    }
}

/// Returns the current keypad view without changing it.
#[flutter_rust_bridge::frb(sync)]
pub fn calculator_view() -> CalculatorResponse {
    let session = lock_session();
    CalculatorResponse::from_view(session.calculator.view(), true)
}

/// Lists todos in insertion order.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_list() -> Vec<TodoEntry> {
    let session = lock_session();
    session
        .todos
        .todos()
        .iter()
        .map(|item| to_todo_entry(item, session.todos.is_selected(item.id)))
        .collect()
}

/// Gets one todo by id string; `None` for unknown or unparseable ids.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_get(id: String) -> Option<TodoEntry> {
    let id = parse_id(&id)?;
    let session = lock_session();
    session
        .todos
        .get_by_id(id)
        .map(|item| to_todo_entry(item, session.todos.is_selected(id)))
}

/// Saves the detail form.
///
/// Input semantics:
/// - `id_arg`: `"new"` or a todo id; unparseable or unknown ids create.
/// - `days`/`hours`/`minutes`: text fields; non-numbers count as 0 and a
///   negative field resets the duration to zero.
///
/// # FFI contract
/// - Blank description returns `ok = false` and changes nothing.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_save(
    id_arg: String,
    description: String,
    days: String,
    hours: String,
    minutes: String,
) -> TodoActionResponse {
    let target = DetailTarget::from_arg(&id_arg);
    let duration = Duration::from_form_fields(&days, &hours, &minutes);
    let mut session = lock_session();
    match session.todos.save_todo(target, &description, duration) {
        Ok(SaveOutcome::Created(id)) => TodoActionResponse::success("Todo created.", id),
        Ok(SaveOutcome::Updated(id)) => TodoActionResponse::success("Todo updated.", id),
        Ok(SaveOutcome::RejectedBlankDescription) => {
            TodoActionResponse::failure("Description must not be blank.")
        }
        Err(err) => TodoActionResponse::failure(format!("todo_save failed: {err}")),
    }
}

/// Deletes a todo; returns `false` when nothing was removed.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_delete(id: String) -> bool {
    match parse_id(&id) {
        Some(id) => lock_session().todos.delete_todo(id),
        None => false,
    }
}

/// Toggles selection and returns the selected ids afterwards.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_toggle_selection(id: String) -> Vec<String> {
    let mut session = lock_session();
    if let Some(id) = parse_id(&id) {
        session.todos.toggle_selection(id);
    }
    session
        .todos
        .todos()
        .iter()
        .filter(|item| session.todos.is_selected(item.id))
        .map(|item| item.id.to_string())
        .collect()
}

/// Finishes selected todos; returns the completion message, if any.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_finish_selected() -> Option<String> {
    lock_session()
        .todos
        .finish_selected()
        .map(|summary| summary.message())
}

/// Returns the pending completion message.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_completion_message() -> Option<String> {
    lock_session().todos.completion_message()
}

/// Dismisses the pending completion message.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_clear_completion_message() {
    lock_session().todos.clear_completion_message();
}

/// Navigates to a route path (`calculator`, `todos_list`, `todo_detail/{id|new}`).
///
/// # FFI contract
/// - Returns empty string on success and error message on failure.
/// - Unknown paths keep the current route.
#[flutter_rust_bridge::frb(sync)]
pub fn navigate(path: String) -> String {
    match lock_session().navigate_path(&path) {
        Ok(_) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Returns the current route path.
#[flutter_rust_bridge::frb(sync)]
pub fn current_route() -> String {
    lock_session().route.path()
}

/// Normalized preview of the detail form's duration fields.
#[flutter_rust_bridge::frb(sync)]
pub fn duration_preview(days: String, hours: String, minutes: String) -> String {
    Duration::from_form_fields(&days, &hours, &minutes)
        .normalize()
        .format()
}

fn build_session() -> AppSession {
    let config = CoreConfig::from_env().unwrap_or_else(|err| {
        warn!("event=ffi_session module=ffi status=degraded reason=config error={err}");
        CoreConfig::default()
    });
    AppSession::from_config(&config).unwrap_or_default()
}

fn lock_session() -> MutexGuard<'static, AppSession> {
    SESSION
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok()
}

fn to_todo_entry(item: &TodoItem, selected: bool) -> TodoEntry {
    let duration = item.duration();
    TodoEntry {
        id: item.id.to_string(),
        description: item.description().to_string(),
        duration_label: duration.format(),
        days: duration.days(),
        hours: duration.hours(),
        minutes: duration.minutes(),
        selected,
    }
}
