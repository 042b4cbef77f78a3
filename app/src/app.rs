//! Composition root.
//!
//! [`App`] owns one auth store and one todo store and forwards identity
//! provider session changes into the auth store. The view layer reads both
//! stores through [`App::auth`] and [`App::todos`].

use crate::config::AppConfig;
use crate::error::AppError;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use todo_sync_auth::providers::{
    AuthApi, FileStorage, HttpAuthApi, IdentityProvider, KeyValueStorage,
};
use todo_sync_auth::{AuthAction, AuthEnvironment, AuthReducer, AuthState, ProviderIdentity};
use todo_sync_core::environment::SystemClock;
use todo_sync_runtime::Store;
use todo_sync_todos::{
    HttpTodoApi, TodoAction, TodoApi, TodoEnvironment, TodoReducer, TodoState,
};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

/// Store holding the auth state.
pub type AuthStore<A, I, K> =
    Store<AuthState, AuthAction, AuthEnvironment<A, I, K>, AuthReducer<A, I, K>>;

/// Store holding the todo list.
pub type TodoStore<T> = Store<TodoState, TodoAction, TodoEnvironment<T>, TodoReducer<T>>;

/// Both stores plus the identity listener.
///
/// Must be created inside a Tokio runtime.
pub struct App<A, I, K, T>
where
    A: AuthApi + Clone + 'static,
    I: IdentityProvider + Clone + 'static,
    K: KeyValueStorage + Clone + 'static,
    T: TodoApi + Clone + 'static,
{
    auth: AuthStore<A, I, K>,
    todos: TodoStore<T>,
    identity_listener: JoinHandle<()>,
    next_create_request: AtomicU64,
}

impl<I> App<HttpAuthApi, I, FileStorage, HttpTodoApi>
where
    I: IdentityProvider + Clone + 'static,
{
    /// Build the production application from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Client`] if an HTTP client cannot be built.
    pub fn from_config(config: &AppConfig, identity: I) -> Result<Self, AppError> {
        let auth_api = HttpAuthApi::new(config.auth.clone())?;
        let todo_api = HttpTodoApi::new(config.todos.clone())?;
        let storage = FileStorage::new(&config.storage_dir);

        tracing::info!(
            auth_url = %config.auth.base_url,
            todos_url = %config.todos.base_url,
            session_file = %storage.path().display(),
            "Assembling application"
        );

        Ok(Self::new(
            AuthEnvironment::new(auth_api, identity, storage),
            TodoEnvironment::new(todo_api, Arc::new(SystemClock)),
            config.broadcast_capacity,
        ))
    }
}

impl<A, I, K, T> App<A, I, K, T>
where
    A: AuthApi + Clone + 'static,
    I: IdentityProvider + Clone + 'static,
    K: KeyValueStorage + Clone + 'static,
    T: TodoApi + Clone + 'static,
{
    /// Create both stores and start forwarding identity changes.
    #[must_use]
    pub fn new(
        auth_env: AuthEnvironment<A, I, K>,
        todo_env: TodoEnvironment<T>,
        broadcast_capacity: usize,
    ) -> Self {
        let changes = auth_env.identity.subscribe();

        let auth = Store::with_broadcast_capacity(
            AuthState::default(),
            AuthReducer::new(),
            auth_env,
            broadcast_capacity,
        );
        let todos = Store::with_broadcast_capacity(
            TodoState::new(),
            TodoReducer::new(),
            todo_env,
            broadcast_capacity,
        );

        let identity_listener = tokio::spawn(forward_identity_changes(changes, auth.clone()));

        Self {
            auth,
            todos,
            identity_listener,
            next_create_request: AtomicU64::new(1),
        }
    }

    /// The auth store.
    #[must_use]
    pub const fn auth(&self) -> &AuthStore<A, I, K> {
        &self.auth
    }

    /// The todo store.
    #[must_use]
    pub const fn todos(&self) -> &TodoStore<T> {
        &self.todos
    }

    /// Restore the stored session and fetch the list, waiting up to
    /// `timeout` for both.
    ///
    /// A failed fetch is reported through the todo store's error, not here.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] if a store rejects an action or the timeout
    /// expires.
    pub async fn bootstrap(&self, timeout: Duration) -> Result<(), AppError> {
        let mut restore = self.auth.send(AuthAction::RestoreSession).await?;
        let mut fetch = self.todos.send(TodoAction::FetchAll).await?;

        restore.wait_with_timeout(timeout).await?;
        fetch.wait_with_timeout(timeout).await?;

        tracing::info!(
            signed_in = self.auth.state(AuthState::is_authenticated).await,
            todos = self.todos.state(TodoState::count).await,
            "Bootstrap complete"
        );
        Ok(())
    }

    /// Create a todo and then replace the list with the remote one.
    ///
    /// The refetch runs whether or not the create succeeded. The returned
    /// action is the outcome (`Created` or `CreateFailed`) of this create,
    /// even when other creates are in flight on the same store.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] if a store rejects an action or the timeout
    /// expires.
    pub async fn create_todo_and_refresh(
        &self,
        text: impl Into<String>,
        timeout: Duration,
    ) -> Result<TodoAction, AppError> {
        // Starts at 1 so plain `Create { request: 0, .. }` dispatches never match
        let request = self.next_create_request.fetch_add(1, Ordering::Relaxed);

        let outcome = self
            .todos
            .send_and_wait_for(
                TodoAction::Create {
                    request,
                    text: text.into(),
                },
                move |action| match action {
                    TodoAction::Created { request: r, .. }
                    | TodoAction::CreateFailed { request: r, .. } => *r == request,
                    _ => false,
                },
                timeout,
            )
            .await?;

        let mut fetch = self.todos.send(TodoAction::FetchAll).await?;
        fetch.wait_with_timeout(timeout).await?;
        Ok(outcome)
    }

    /// Stop the identity listener and shut both stores down.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] if effects are still running
    /// when `timeout` expires.
    pub async fn shutdown(self, timeout: Duration) -> Result<(), AppError> {
        self.identity_listener.abort();

        let (auth, todos) = tokio::join!(self.auth.shutdown(timeout), self.todos.shutdown(timeout));
        auth?;
        todos?;
        Ok(())
    }
}

/// Send every identity provider session change to the auth store until
/// either side goes away.
async fn forward_identity_changes<A, I, K>(
    mut changes: broadcast::Receiver<Option<ProviderIdentity>>,
    auth: AuthStore<A, I, K>,
) where
    A: AuthApi + Clone + 'static,
    I: IdentityProvider + Clone + 'static,
    K: KeyValueStorage + Clone + 'static,
{
    loop {
        match changes.recv().await {
            Ok(identity) => {
                if let Err(error) = auth.send(AuthAction::SetIdentity { identity }).await {
                    tracing::debug!(%error, "Auth store stopped, identity listener exiting");
                    return;
                }
            },
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "Identity listener lagged");
            },
            Err(broadcast::error::RecvError::Closed) => {
                tracing::debug!("Identity provider closed its notification channel");
                return;
            },
        }
    }
}
