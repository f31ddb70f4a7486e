//! Environment-driven core configuration.
//!
//! # Responsibility
//! - Collect the few knobs the host can set before a session starts.
//! - Validate values early so session setup never sees bad input.
//!
//! # Invariants
//! - Unset variables fall back to build-mode defaults.
//! - `log_dir`, when set, is an absolute path.

use crate::logging::{default_log_level, normalize_level};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_LOG_LEVEL: &str = "TIMECALC_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "TIMECALC_LOG_DIR";
pub const ENV_SEED_SAMPLES: &str = "TIMECALC_SEED_SAMPLES";

/// Invalid configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreConfigError {
    InvalidLogLevel(String),
    RelativeLogDir(String),
    InvalidFlag { key: &'static str, value: String },
}

impl Display for CoreConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLogLevel(message) => write!(f, "{message}"),
            Self::RelativeLogDir(value) => {
                write!(f, "{ENV_LOG_DIR} must be an absolute path, got `{value}`")
            }
            Self::InvalidFlag { key, value } => {
                write!(f, "{key} expects 1|true|yes|on or 0|false|no|off, got `{value}`")
            }
        }
    }
}

impl Error for CoreConfigError {}

/// Settings applied when an application session starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub log_level: &'static str,
    /// Rolling log directory; `None` leaves logging uninitialized.
    pub log_dir: Option<PathBuf>,
    /// Pre-fills the todo list with starter items.
    pub seed_sample_todos: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_dir: None,
            seed_sample_todos: true,
        }
    }
}

impl CoreConfig {
    /// Reads configuration from process environment variables.
    pub fn from_env() -> Result<Self, CoreConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through an injectable variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CoreConfigError> {
        let mut config = Self::default();
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        if let Some(level) = read(ENV_LOG_LEVEL) {
            config.log_level = normalize_level(&level).map_err(CoreConfigError::InvalidLogLevel)?;
        }
        if let Some(dir) = read(ENV_LOG_DIR) {
            let path = PathBuf::from(&dir);
            if !path.is_absolute() {
                return Err(CoreConfigError::RelativeLogDir(dir));
            }
            config.log_dir = Some(path);
        }
        if let Some(flag) = read(ENV_SEED_SAMPLES) {
            config.seed_sample_todos = parse_flag(ENV_SEED_SAMPLES, &flag)?;
        }

        Ok(config)
    }
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, CoreConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(CoreConfigError::InvalidFlag {
            key,
            value: value.to_string(),
        }),
    }
}
