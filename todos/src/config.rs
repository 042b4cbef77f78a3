//! Todo service configuration.

use reqwest::Url;
use std::time::Duration;
use todo_sync_core::api::ApiError;

/// Base URL of the reference todo service.
pub const DEFAULT_TODOS_BASE_URL: &str = "https://dummyjson.com/todos";

/// Owner id attached to every created todo.
pub const DEFAULT_USER_ID: u64 = 1;

/// REST todo service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoConfig {
    /// Base URL of the collection, e.g. `https://dummyjson.com/todos`.
    pub base_url: String,

    /// Owner id sent as `userId` when creating a todo.
    ///
    /// Default: 1
    pub user_id: u64,

    /// Connect timeout for the HTTP client.
    ///
    /// Requests themselves are never timed out. Default: 10 seconds
    pub connect_timeout: Duration,
}

impl TodoConfig {
    /// Create a new todo service configuration.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            user_id: DEFAULT_USER_ID,
            connect_timeout: Duration::from_secs(10),
        }
    }

    /// Set the owner id attached to created todos.
    #[must_use]
    pub const fn with_user_id(mut self, user_id: u64) -> Self {
        self.user_id = user_id;
        self
    }

    /// Set the HTTP connect timeout.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// URL of the collection itself.
    #[must_use]
    pub fn collection_url(&self) -> String {
        self.base_url.trim_end_matches('/').to_string()
    }

    /// URL below the collection, e.g. `item_url("5")` or `item_url("add")`.
    ///
    /// `segment` is percent-encoded as a single path segment.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the base URL cannot carry a path.
    pub fn item_url(&self, segment: &str) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.collection_url())
            .map_err(|e| ApiError::Transport(format!("Invalid todo service URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| ApiError::Transport("Todo service URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .push(segment);
        Ok(url)
    }
}

impl Default for TodoConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TODOS_BASE_URL)
    }
}
