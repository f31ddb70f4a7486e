//! Typed navigation targets shared with the presentation layer.
//!
//! # Responsibility
//! - Replace string routes with a tagged union carrying typed payloads.
//! - Resolve opaque detail arguments into "create new" or "edit existing".
//!
//! # Invariants
//! - `"new"`, unparseable tokens and the nil UUID resolve to `DetailTarget::New`.
//! - `Route::from_path(route.path())` returns `route`.

use crate::model::todo::TodoId;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const CALCULATOR_PATH: &str = "calculator";
const TODO_LIST_PATH: &str = "todos_list";
const TODO_DETAIL_PREFIX: &str = "todo_detail/";
const NEW_TODO_ARG: &str = "new";

/// Which todo the detail screen edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetailTarget {
    New,
    Existing(TodoId),
}

impl DetailTarget {
    /// Resolves an opaque detail argument; anything not a usable id means `New`.
    pub fn from_arg(arg: &str) -> Self {
        match Uuid::parse_str(arg.trim()) {
            Ok(id) if !id.is_nil() => Self::Existing(id),
            _ => Self::New,
        }
    }

    pub fn as_arg(&self) -> String {
        match self {
            Self::New => NEW_TODO_ARG.to_string(),
            Self::Existing(id) => id.to_string(),
        }
    }
}

/// Screen the application can navigate to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Route {
    /// Start destination.
    #[default]
    Calculator,
    TodoList,
    TodoDetail(DetailTarget),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    UnknownRoute(String),
}

impl Display for RouteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownRoute(path) => write!(f, "unknown route: `{path}`"),
        }
    }
}

impl Error for RouteError {}

impl Route {
    pub fn todo_detail(arg: &str) -> Self {
        Self::TodoDetail(DetailTarget::from_arg(arg))
    }

    pub fn path(&self) -> String {
        match self {
            Self::Calculator => CALCULATOR_PATH.to_string(),
            Self::TodoList => TODO_LIST_PATH.to_string(),
            Self::TodoDetail(target) => format!("{TODO_DETAIL_PREFIX}{}", target.as_arg()),
        }
    }

    /// Parses a route path produced by [`Route::path`].
    ///
    /// # Errors
    /// - `UnknownRoute` when the path names no screen.
    pub fn from_path(path: &str) -> Result<Self, RouteError> {
        let trimmed = path.trim().trim_start_matches('/');
        match trimmed {
            CALCULATOR_PATH => Ok(Self::Calculator),
            TODO_LIST_PATH => Ok(Self::TodoList),
            other => other
                .strip_prefix(TODO_DETAIL_PREFIX)
                .map(Self::todo_detail)
                .ok_or_else(|| RouteError::UnknownRoute(path.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DetailTarget, Route, RouteError};
    use uuid::Uuid;

    #[test]
    fn detail_arg_falls_back_to_new() {
        assert_eq!(DetailTarget::from_arg("new"), DetailTarget::New);
        assert_eq!(DetailTarget::from_arg("not-a-uuid"), DetailTarget::New);
        assert_eq!(DetailTarget::from_arg(&Uuid::nil().to_string()), DetailTarget::New);

        let id = Uuid::new_v4();
        assert_eq!(
            DetailTarget::from_arg(&id.to_string()),
            DetailTarget::Existing(id)
        );
    }

    #[test]
    fn paths_round_trip() {
        let id = Uuid::new_v4();
        for route in [
            Route::Calculator,
            Route::TodoList,
            Route::TodoDetail(DetailTarget::New),
            Route::TodoDetail(DetailTarget::Existing(id)),
        ] {
            assert_eq!(Route::from_path(&route.path()), Ok(route));
        }
        assert_eq!(Route::TodoList.path(), "todos_list");
        assert_eq!(Route::todo_detail("new").path(), "todo_detail/new");
    }

    #[test]
    fn unknown_path_is_rejected() {
        assert_eq!(
            Route::from_path("settings"),
            Err(RouteError::UnknownRoute("settings".to_string()))
        );
        assert_eq!(Route::default(), Route::Calculator);
    }
}
