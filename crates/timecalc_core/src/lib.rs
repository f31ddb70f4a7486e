//! Core domain logic for the time calculator app.
//! This crate is the single source of truth for duration arithmetic and
//! todo/calculator state.

pub mod config;
pub mod logging;
pub mod model;
pub mod navigation;
pub mod observe;
pub mod repo;
pub mod service;
pub mod session;

pub use config::{CoreConfig, CoreConfigError};
pub use logging::{default_log_level, init_from_config, init_logging, logging_status};
pub use model::calculator::{CalculatorMode, CalculatorState, CalculatorView, Key, ERROR_DISPLAY};
pub use model::duration::{Duration, DurationError, TimeUnit};
pub use model::timed::Timed;
pub use model::todo::{TodoId, TodoItem};
pub use navigation::{DetailTarget, Route, RouteError};
pub use observe::{StateCell, SubscriptionId};
pub use repo::todo_repo::{InMemoryTodoRepository, RepoError, RepoResult, TodoRepository};
pub use service::calculator_service::CalculatorService;
pub use service::todo_store::{CompletionSummary, SaveOutcome, TodoSnapshot, TodoStore};
pub use session::AppSession;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
