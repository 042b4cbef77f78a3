//! # todo-sync Todos
//!
//! The todo store: the last known copy of the remote list, whether a request
//! is in flight, the last error, and which items are open for editing.
//!
//! The remote service owns the list. Each mutation response is trusted and
//! applied as-is; refetching afterwards is the caller's decision.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use todo_sync_core::environment::SystemClock;
//! use todo_sync_runtime::Store;
//! use todo_sync_todos::{
//!     HttpTodoApi, TodoAction, TodoConfig, TodoEnvironment, TodoReducer, TodoState,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let api = HttpTodoApi::new(TodoConfig::default())?;
//! let store = Store::new(
//!     TodoState::new(),
//!     TodoReducer::new(),
//!     TodoEnvironment::new(api, Arc::new(SystemClock)),
//! );
//!
//! let mut handle = store
//!     .send(TodoAction::Create { request: 0, text: "Buy milk".to_string() })
//!     .await?;
//! handle.wait().await;
//!
//! println!("Total todos: {}", store.state(TodoState::count).await);
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]

pub mod api;
pub mod config;
pub mod reducer;
pub mod types;

/// In-memory todo service (enabled with the `test-utils` feature).
#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;

// Re-export commonly used types
pub use api::{HttpTodoApi, TodoApi};
pub use config::TodoConfig;
pub use reducer::{TodoEnvironment, TodoReducer};
pub use todo_sync_core::api::ApiError;
pub use types::{Todo, TodoAction, TodoPatch, TodoState};
