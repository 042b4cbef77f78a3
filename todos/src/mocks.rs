//! In-memory stand-in for the remote todo service.

use crate::api::TodoApi;
use crate::types::{Todo, TodoPatch};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use todo_sync_core::api::ApiError;

#[derive(Debug, Default)]
struct Remote {
    todos: Vec<Todo>,
    next_id: u64,
    failure: Option<ApiError>,
    latency: Option<Duration>,
    requests: usize,
}

/// Mock todo service.
///
/// Unlike the reference service, mutations are actually persisted, so a
/// later `list` reflects them. Clones share the same remote collection.
#[derive(Debug, Clone, Default)]
pub struct MockTodoApi {
    remote: Arc<Mutex<Remote>>,
}

impl MockTodoApi {
    /// Create an empty remote collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a remote collection holding `todos`.
    ///
    /// New ids continue after the largest numeric id present.
    #[must_use]
    pub fn with_todos(todos: Vec<Todo>) -> Self {
        let next_id = todos
            .iter()
            .filter_map(|t| t.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0)
            + 1;

        Self {
            remote: Arc::new(Mutex::new(Remote {
                todos,
                next_id,
                ..Remote::default()
            })),
        }
    }

    /// Make every following request fail with `error`, or succeed again with `None`.
    pub fn set_failure(&self, error: Option<ApiError>) {
        self.lock().failure = error;
    }

    /// Delay every following response by `latency`.
    pub fn set_latency(&self, latency: Duration) {
        self.lock().latency = Some(latency);
    }

    /// Copy of the remote collection.
    #[must_use]
    pub fn remote_todos(&self) -> Vec<Todo> {
        self.lock().todos.clone()
    }

    /// Number of requests received.
    #[must_use]
    pub fn requests(&self) -> usize {
        self.lock().requests
    }

    fn lock(&self) -> MutexGuard<'_, Remote> {
        self.remote.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Count the request, wait out the latency, then fail if configured to.
    async fn begin(&self) -> Result<(), ApiError> {
        let latency = {
            let mut remote = self.lock();
            remote.requests += 1;
            remote.latency
        };

        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        match self.lock().failure.clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn not_found(id: &str) -> ApiError {
        ApiError::Rejected {
            status: 404,
            message: Some(format!("Todo with id '{id}' not found")),
        }
    }
}

impl TodoApi for MockTodoApi {
    async fn list(&self) -> Result<Vec<Todo>, ApiError> {
        self.begin().await?;
        Ok(self.remote_todos())
    }

    async fn create(&self, text: &str) -> Result<Todo, ApiError> {
        self.begin().await?;

        let mut remote = self.lock();
        remote.next_id = remote.next_id.max(1);
        let todo = Todo::new(remote.next_id.to_string(), text);
        remote.next_id += 1;
        remote.todos.push(todo.clone());
        Ok(todo)
    }

    async fn update(&self, id: &str, patch: &TodoPatch) -> Result<Todo, ApiError> {
        self.begin().await?;

        let mut remote = self.lock();
        let todo = remote
            .todos
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| Self::not_found(id))?;

        if let Some(text) = &patch.text {
            todo.text.clone_from(text);
        }
        if let Some(completed) = patch.completed {
            todo.completed = completed;
        }
        Ok(todo.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.begin().await?;

        let mut remote = self.lock();
        let before = remote.todos.len();
        remote.todos.retain(|t| t.id != id);
        if remote.todos.len() == before {
            return Err(Self::not_found(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mutations_are_visible_to_list() -> Result<(), ApiError> {
        let api = MockTodoApi::with_todos(vec![Todo::new("5", "Walk the dog")]);

        let created = api.create("Buy milk").await?;
        assert_eq!(created.id, "6");

        api.update("5", &TodoPatch::completed(true)).await?;
        api.delete("6").await?;

        assert_eq!(api.list().await?, vec![Todo::new("5", "Walk the dog").into_completed()]);
        assert_eq!(api.requests(), 4);
        Ok(())
    }

    #[tokio::test]
    async fn missing_ids_are_rejected() {
        let api = MockTodoApi::new();

        assert!(matches!(
            api.delete("9").await,
            Err(ApiError::Rejected { status: 404, .. })
        ));
        assert!(matches!(
            api.update("9", &TodoPatch::text("x")).await,
            Err(ApiError::Rejected { status: 404, .. })
        ));
    }

    #[tokio::test]
    async fn configured_failure_applies_until_cleared() {
        let api = MockTodoApi::new();
        api.set_failure(Some(ApiError::Transport("offline".to_string())));
        assert!(api.list().await.is_err());

        api.set_failure(None);
        assert!(api.list().await.is_ok());
    }
}
