//! Remote todo service.
//!
//! ```text
//! GET    {base}        → {"todos": [...]}
//! POST   {base}/add    {"todo", "completed": false, "userId"} → record
//! PATCH  {base}/{id}   {"todo"?, "completed"?}                → record
//! DELETE {base}/{id}   → body ignored
//! ```

use crate::config::TodoConfig;
use crate::types::{Todo, TodoPatch};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::future::Future;
use todo_sync_core::api::ApiError;

/// Remote todo service.
///
/// # Errors
///
/// Every operation returns [`ApiError::Rejected`] for a non-success status,
/// [`ApiError::Transport`] when the exchange fails and [`ApiError::Decode`]
/// when the body cannot be parsed.
pub trait TodoApi: Send + Sync {
    /// Fetch the whole collection in server order.
    fn list(&self) -> impl Future<Output = Result<Vec<Todo>, ApiError>> + Send;

    /// Create a todo that is not completed.
    fn create(&self, text: &str) -> impl Future<Output = Result<Todo, ApiError>> + Send;

    /// Apply a partial update and return the resulting record.
    fn update(
        &self,
        id: &str,
        patch: &TodoPatch,
    ) -> impl Future<Output = Result<Todo, ApiError>> + Send;

    /// Delete a todo.
    fn delete(&self, id: &str) -> impl Future<Output = Result<(), ApiError>> + Send;
}

/// Body of `POST {base}/add`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTodo<'a> {
    /// Description.
    pub todo: &'a str,
    /// Always `false` for new todos.
    pub completed: bool,
    /// Owner id.
    pub user_id: u64,
}

#[derive(Deserialize)]
struct TodoList {
    todos: Vec<Todo>,
}

/// [`TodoApi`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTodoApi {
    client: Client,
    config: TodoConfig,
}

impl HttpTodoApi {
    /// Create a client for the configured service.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the TLS backend cannot be initialized.
    pub fn new(config: TodoConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self::with_client(client, config))
    }

    /// Create a client that reuses an existing connection pool.
    #[must_use]
    pub const fn with_client(client: Client, config: TodoConfig) -> Self {
        Self { client, config }
    }

    /// Configuration this client was built with.
    #[must_use]
    pub const fn config(&self) -> &TodoConfig {
        &self.config
    }

    async fn execute(
        request: reqwest::RequestBuilder,
        operation: &'static str,
    ) -> Result<Response, ApiError> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!(operation, error = %e, "Todo request could not be sent");
            ApiError::Transport(e.to_string())
        })?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(operation, status = status.as_u16(), "Todo request succeeded");
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::warn!(operation, status = status.as_u16(), "Todo service rejected request");
        Err(ApiError::rejected(status.as_u16(), &body))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

impl TodoApi for HttpTodoApi {
    async fn list(&self) -> Result<Vec<Todo>, ApiError> {
        let request = self.client.get(self.config.collection_url());
        let response = Self::execute(request, "list").await?;
        Ok(Self::decode::<TodoList>(response).await?.todos)
    }

    async fn create(&self, text: &str) -> Result<Todo, ApiError> {
        let body = NewTodo {
            todo: text,
            completed: false,
            user_id: self.config.user_id,
        };
        let request = self.client.post(self.config.item_url("add")?).json(&body);
        Self::decode(Self::execute(request, "create").await?).await
    }

    async fn update(&self, id: &str, patch: &TodoPatch) -> Result<Todo, ApiError> {
        let request = self.client.patch(self.config.item_url(id)?).json(patch);
        Self::decode(Self::execute(request, "update").await?).await
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let request = self.client.delete(self.config.item_url(id)?);
        Self::execute(request, "delete").await?;
        Ok(())
    }
}
