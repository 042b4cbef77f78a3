//! Configuration management for todo-sync.
//!
//! Loads configuration from environment variables with sensible defaults.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;
use todo_sync_auth::AuthConfig;
use todo_sync_auth::config::DEFAULT_AUTH_BASE_URL;
use todo_sync_runtime::DEFAULT_BROADCAST_CAPACITY;
use todo_sync_todos::TodoConfig;
use todo_sync_todos::config::DEFAULT_TODOS_BASE_URL;

/// Base URL of the REST auth service.
pub const AUTH_URL_VAR: &str = "TODO_SYNC_AUTH_URL";
/// Base URL of the REST todo collection.
pub const TODOS_URL_VAR: &str = "TODO_SYNC_TODOS_URL";
/// Directory holding the durable session file.
pub const STORAGE_DIR_VAR: &str = "TODO_SYNC_STORAGE_DIR";
/// Log filter directive.
pub const LOG_LEVEL_VAR: &str = "RUST_LOG";
/// Capacity of each store's action broadcast channel.
pub const BROADCAST_CAPACITY_VAR: &str = "TODO_SYNC_BROADCAST_CAPACITY";

/// Default session storage directory, relative to the working directory.
pub const DEFAULT_STORAGE_DIR: &str = ".todo-sync";
/// Default log filter.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Configuration error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A variable is set but cannot be parsed
    #[error("Invalid value for {var}: {value:?}")]
    InvalidValue {
        /// Variable name
        var: &'static str,
        /// Raw value
        value: String,
    },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// REST auth service
    pub auth: AuthConfig,
    /// REST todo service
    pub todos: TodoConfig,
    /// Directory of the durable session file
    pub storage_dir: PathBuf,
    /// Log filter (trace, debug, info, warn, error or a full directive)
    pub log_level: String,
    /// Action broadcast capacity for both stores
    pub broadcast_capacity: usize,
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// Missing variables fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a numeric variable is set but
    /// not a number.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a numeric variable is set but
    /// not a number.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |var: &str, default: &str| {
            lookup(var)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Ok(Self {
            auth: AuthConfig::new(text(AUTH_URL_VAR, DEFAULT_AUTH_BASE_URL)),
            todos: TodoConfig::new(text(TODOS_URL_VAR, DEFAULT_TODOS_BASE_URL)),
            storage_dir: PathBuf::from(text(STORAGE_DIR_VAR, DEFAULT_STORAGE_DIR)),
            log_level: text(LOG_LEVEL_VAR, DEFAULT_LOG_LEVEL),
            broadcast_capacity: parse(
                BROADCAST_CAPACITY_VAR,
                lookup(BROADCAST_CAPACITY_VAR),
                DEFAULT_BROADCAST_CAPACITY,
            )?,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            auth: AuthConfig::default(),
            todos: TodoConfig::default(),
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            broadcast_capacity: DEFAULT_BROADCAST_CAPACITY,
        }
    }
}

fn parse<T: FromStr>(var: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { var, value }),
    }
}
