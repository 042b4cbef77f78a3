//! # todo-sync Authentication
//!
//! The auth store: who is signed in, whether an auth request is in flight,
//! and the last auth error.
//!
//! ## Features
//!
//! - **Email/password** against a REST auth service ([`providers::HttpAuthApi`])
//! - **OAuth popup sign-in** through an [`providers::IdentityProvider`]
//! - **Durable session** (`token` + `userData`) in a [`providers::KeyValueStorage`]
//! - **Testable**: every collaborator is a trait with a mock in [`mocks`]
//!
//! ## Architecture
//!
//! Authentication is implemented as a reducer and effects:
//!
//! ```text
//! Action → Reducer → (State, Effects) → Effect Execution → More Actions
//! ```
//!
//! ## Example: Login
//!
//! ```rust,ignore
//! use todo_sync_auth::*;
//! use todo_sync_runtime::Store;
//!
//! let env = AuthEnvironment::new(HttpAuthApi::new(AuthConfig::default())?, identity, storage);
//! let store = Store::new(AuthState::default(), AuthReducer::new(), env);
//!
//! let mut handle = store
//!     .send(AuthAction::Login { email, password })
//!     .await?;
//! handle.wait().await;
//!
//! assert!(store.state(AuthState::is_authenticated).await);
//! ```

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]

// Public modules
pub mod actions;
pub mod config;
pub mod constants;
pub mod environment;
pub mod error;
pub mod providers;
pub mod reducer;
pub mod state;
pub mod utils;

/// Mock providers (enabled with the `test-utils` feature).
#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;

// Re-export main types for convenience
pub use actions::AuthAction;
pub use config::AuthConfig;
pub use environment::AuthEnvironment;
pub use error::{IdentityError, StorageError, ValidationError};
pub use reducer::AuthReducer;
pub use state::{AuthState, OAuthProvider, ProviderIdentity, User};
pub use todo_sync_core::api::ApiError;
