//! # todo-sync Application
//!
//! Wires configuration, logging and both stores together.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::time::Duration;
//! use todo_sync_app::{init_tracing, App, AppConfig};
//! use todo_sync_auth::providers::NoopIdentityProvider;
//!
//! # async fn example() -> Result<(), todo_sync_app::AppError> {
//! let config = AppConfig::from_env()?;
//! init_tracing(&config.log_level)?;
//!
//! let app = App::from_config(&config, NoopIdentityProvider::new())?;
//! app.bootstrap(Duration::from_secs(10)).await?;
//!
//! let todos = app.todos().state(|s| s.todos.clone()).await;
//! println!("{} todos", todos.len());
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]

pub mod app;
pub mod config;
pub mod error;
pub mod telemetry;

pub use app::{App, AuthStore, TodoStore};
pub use config::{AppConfig, ConfigError};
pub use error::AppError;
pub use telemetry::init_tracing;
