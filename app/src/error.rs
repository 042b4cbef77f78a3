//! Errors raised while assembling the application.

use crate::config::ConfigError;
use thiserror::Error;
use todo_sync_core::api::ApiError;
use todo_sync_runtime::error::StoreError;

/// Application error
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An HTTP client could not be built
    #[error("HTTP client setup failed: {0}")]
    Client(#[from] ApiError),

    /// A store rejected an action
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The tracing subscriber could not be installed
    #[error("Logging setup failed: {0}")]
    Logging(String),
}
