//! Authentication configuration.
//!
//! Configuration values are provided by the application, not hardcoded in
//! the client.

use std::time::Duration;

/// Base URL of the reference auth service.
pub const DEFAULT_AUTH_BASE_URL: &str = "https://todo-crud-apis-with-auth.onrender.com/api/v1/auth";

/// REST auth service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    /// Base URL of the auth endpoints.
    ///
    /// Requests go to `{base_url}/register` and `{base_url}/login`.
    pub base_url: String,

    /// Connect timeout for the HTTP client.
    ///
    /// Requests themselves are never timed out. Default: 10 seconds
    pub connect_timeout: Duration,
}

impl AuthConfig {
    /// Create a new auth configuration.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the auth endpoints
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            connect_timeout: Duration::from_secs(10),
        }
    }

    /// Set the HTTP connect timeout.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Full URL of an endpoint below the base URL.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self::new(DEFAULT_AUTH_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_reference_service() {
        let config = AuthConfig::default();
        assert_eq!(config.base_url, DEFAULT_AUTH_BASE_URL);
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
    }

    #[test]
    fn endpoint_joins_without_double_slash() {
        let config = AuthConfig::new("http://localhost:4000/auth/")
            .with_connect_timeout(Duration::from_secs(1));
        assert_eq!(config.endpoint("/login"), "http://localhost:4000/auth/login");
        assert_eq!(config.endpoint("register"), "http://localhost:4000/auth/register");
    }
}
