//! REST auth service client.

use crate::config::AuthConfig;
use crate::providers::auth_api::{AuthApi, LoginRequest, RegisterRequest};
use crate::state::User;
use reqwest::Client;
use serde::Serialize;
use todo_sync_core::api::ApiError;

/// [`AuthApi`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpAuthApi {
    client: Client,
    config: AuthConfig,
}

impl HttpAuthApi {
    /// Create a client for the configured service.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the TLS backend cannot be initialized.
    pub fn new(config: AuthConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self::with_client(client, config))
    }

    /// Create a client that reuses an existing connection pool.
    #[must_use]
    pub const fn with_client(client: Client, config: AuthConfig) -> Self {
        Self { client, config }
    }

    /// Configuration this client was built with.
    #[must_use]
    pub const fn config(&self) -> &AuthConfig {
        &self.config
    }

    async fn post_for_user<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<User, ApiError> {
        let url = self.config.endpoint(path);
        tracing::debug!(%url, "Sending auth request");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(%url, error = %e, "Auth request could not be sent");
                ApiError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%url, status = status.as_u16(), "Auth service rejected request");
            return Err(ApiError::rejected(status.as_u16(), &body));
        }

        response
            .json::<User>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

impl AuthApi for HttpAuthApi {
    async fn register(&self, request: &RegisterRequest) -> Result<User, ApiError> {
        self.post_for_user("register", request).await
    }

    async fn login(&self, request: &LoginRequest) -> Result<User, ApiError> {
        self.post_for_user("login", request).await
    }
}
