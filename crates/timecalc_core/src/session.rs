//! Application session wiring.
//!
//! # Responsibility
//! - Build the calculator service and todo store a session owns.
//! - Apply `CoreConfig` (logging, starter todos) once at startup.

use crate::config::CoreConfig;
use crate::logging::init_from_config;
use crate::navigation::{Route, RouteError};
use crate::repo::todo_repo::RepoResult;
use crate::service::calculator_service::CalculatorService;
use crate::service::todo_store::TodoStore;
use log::{debug, info, warn};

/// Feature services owned by one running application.
pub struct AppSession {
    pub calculator: CalculatorService,
    pub todos: TodoStore,
    pub route: Route,
}

impl Default for AppSession {
    fn default() -> Self {
        Self {
            calculator: CalculatorService::new(),
            todos: TodoStore::in_memory(),
            route: Route::default(),
        }
    }
}

impl AppSession {
    /// Builds a session from config.
    ///
    /// A logging setup failure is reported through `log` and does not stop
    /// the session.
    pub fn from_config(config: &CoreConfig) -> RepoResult<Self> {
        if let Err(err) = init_from_config(config) {
            warn!("event=session_start module=session status=degraded reason=logging error={err}");
        }

        let todos = if config.seed_sample_todos {
            TodoStore::with_sample_todos()?
        } else {
            TodoStore::in_memory()
        };
        info!(
            "event=session_start module=session status=ok todo_count={}",
            todos.todos().len()
        );

        Ok(Self {
            calculator: CalculatorService::new(),
            todos,
            route: Route::default(),
        })
    }

    pub fn navigate(&mut self, route: Route) {
        debug!("event=navigate module=session route={}", route.path());
        self.route = route;
    }

    /// Navigates to a route path such as `todo_detail/new`.
    ///
    /// # Errors
    /// - `UnknownRoute` when the path names no screen; the current route is kept.
    pub fn navigate_path(&mut self, path: &str) -> Result<Route, RouteError> {
        let route = Route::from_path(path)?;
        self.navigate(route);
        Ok(route)
    }
}
