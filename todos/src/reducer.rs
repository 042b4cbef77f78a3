//! Reducer logic for the todo store.
//!
//! Every remote operation follows the same shape:
//!
//! ```text
//! intent ──▶ pending (error cleared) ──▶ TodoApi call ──▶ success action
//!                                              └────────▶ *Failed { error }
//! ```
//!
//! `SetEditing` / `ClearEditing` are local and never reach the service.

use crate::api::TodoApi;
use crate::types::{TodoAction, TodoState};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use todo_sync_core::effect::Effect;
use todo_sync_core::environment::Clock;
use todo_sync_core::reducer::Reducer;
use todo_sync_core::{async_effect, smallvec, SmallVec};

/// Messages used when the service gives no reason of its own.
pub mod fallback_messages {
    /// Fetching the list failed.
    pub const FETCH_FAILED: &str = "Failed to fetch items";
    /// Creating a todo failed.
    pub const CREATE_FAILED: &str = "Failed to create todo";
    /// Updating a todo failed.
    pub const UPDATE_FAILED: &str = "Failed to update todo";
    /// Deleting a todo failed.
    pub const DELETE_FAILED: &str = "Failed to delete todo";
}

/// Message for an update or delete dispatched without an id.
pub const MISSING_ID: &str = "Todo id is required";

/// Environment dependencies for the todo reducer
#[derive(Clone)]
pub struct TodoEnvironment<T> {
    /// Remote todo service
    pub api: T,
    /// Clock for stamping successful fetches
    pub clock: Arc<dyn Clock>,
}

impl<T> TodoEnvironment<T> {
    /// Creates a new `TodoEnvironment`
    #[must_use]
    pub fn new(api: T, clock: Arc<dyn Clock>) -> Self {
        Self { api, clock }
    }
}

impl<T: fmt::Debug> fmt::Debug for TodoEnvironment<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TodoEnvironment")
            .field("api", &self.api)
            .finish_non_exhaustive()
    }
}

/// Reducer for the todo store
pub struct TodoReducer<T> {
    _api: PhantomData<fn() -> T>,
}

impl<T> TodoReducer<T> {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self { _api: PhantomData }
    }

    /// Rejects operations on a blank id before any request is made
    fn require_id(state: &mut TodoState, id: &str) -> bool {
        if id.trim().is_empty() {
            state.error = Some(MISSING_ID.to_string());
            return false;
        }
        true
    }
}

impl<T> Default for TodoReducer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for TodoReducer<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for TodoReducer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TodoReducer")
    }
}

impl<T> Reducer for TodoReducer<T>
where
    T: TodoApi + Clone + 'static,
{
    type State = TodoState;
    type Action = TodoAction;
    type Environment = TodoEnvironment<T>;

    #[allow(clippy::too_many_lines)] // One arm per action
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ═══════════════════════════════════════════════════════════════════
            // Fetch
            // ═══════════════════════════════════════════════════════════════════
            TodoAction::FetchAll => {
                state.begin_request();
                state.error = None;

                let api = env.api.clone();
                smallvec![async_effect! {
                    match api.list().await {
                        Ok(todos) => Some(TodoAction::Fetched { todos }),
                        Err(error) => {
                            tracing::warn!(%error, "Fetching todos failed");
                            Some(TodoAction::FetchFailed {
                                error: error.user_message(fallback_messages::FETCH_FAILED),
                            })
                        },
                    }
                }]
            },

            TodoAction::Fetched { todos } => {
                tracing::debug!(count = todos.len(), "Todo list replaced");
                state.todos = todos;
                state.last_synced_at = Some(env.clock.now());
                state.finish_request();
                smallvec![Effect::None]
            },

            // ═══════════════════════════════════════════════════════════════════
            // Create
            // ═══════════════════════════════════════════════════════════════════
            TodoAction::Create { request, text } => {
                state.begin_request();
                state.error = None;

                let api = env.api.clone();
                smallvec![async_effect! {
                    match api.create(&text).await {
                        Ok(todo) => Some(TodoAction::Created { request, todo }),
                        Err(error) => {
                            tracing::warn!(%error, request, "Creating todo failed");
                            Some(TodoAction::CreateFailed {
                                request,
                                error: error.user_message(fallback_messages::CREATE_FAILED),
                            })
                        },
                    }
                }]
            },

            TodoAction::Created { todo, .. } => {
                tracing::debug!(id = %todo.id, "Todo created");
                state.todos.push(todo);
                state.finish_request();
                smallvec![Effect::None]
            },

            // ═══════════════════════════════════════════════════════════════════
            // Update
            // ═══════════════════════════════════════════════════════════════════
            TodoAction::Update { id, patch } => {
                if !Self::require_id(state, &id) {
                    return smallvec![Effect::None];
                }

                state.begin_request();
                state.error = None;

                let api = env.api.clone();
                smallvec![async_effect! {
                    match api.update(&id, &patch).await {
                        Ok(todo) => Some(TodoAction::Updated { todo }),
                        Err(error) => {
                            tracing::warn!(%error, %id, "Updating todo failed");
                            Some(TodoAction::UpdateFailed {
                                error: error.user_message(fallback_messages::UPDATE_FAILED),
                            })
                        },
                    }
                }]
            },

            TodoAction::Updated { todo } => {
                // The service record replaces the local one, editing flag included
                match state.get_mut(&todo.id) {
                    Some(existing) => *existing = todo,
                    None => tracing::debug!(id = %todo.id, "Updated todo is no longer listed"),
                }
                state.finish_request();
                smallvec![Effect::None]
            },

            // ═══════════════════════════════════════════════════════════════════
            // Delete
            // ═══════════════════════════════════════════════════════════════════
            TodoAction::Delete { id } => {
                if !Self::require_id(state, &id) {
                    return smallvec![Effect::None];
                }

                state.begin_request();
                state.error = None;

                let api = env.api.clone();
                smallvec![async_effect! {
                    match api.delete(&id).await {
                        Ok(()) => Some(TodoAction::Deleted { id }),
                        Err(error) => {
                            tracing::warn!(%error, %id, "Deleting todo failed");
                            Some(TodoAction::DeleteFailed {
                                error: error.user_message(fallback_messages::DELETE_FAILED),
                            })
                        },
                    }
                }]
            },

            TodoAction::Deleted { id } => {
                state.todos.retain(|t| t.id != id);
                state.finish_request();
                smallvec![Effect::None]
            },

            TodoAction::FetchFailed { error }
            | TodoAction::CreateFailed { error, .. }
            | TodoAction::UpdateFailed { error }
            | TodoAction::DeleteFailed { error } => {
                state.error = Some(error);
                state.finish_request();
                smallvec![Effect::None]
            },

            // ═══════════════════════════════════════════════════════════════════
            // Local editing
            // ═══════════════════════════════════════════════════════════════════
            TodoAction::SetEditing { id } => {
                if let Some(todo) = state.get_mut(&id) {
                    todo.editing = true;
                }
                smallvec![Effect::None]
            },

            TodoAction::ClearEditing { id } => {
                if let Some(todo) = state.get_mut(&id) {
                    todo.editing = false;
                }
                smallvec![Effect::None]
            },
        }
    }
}
