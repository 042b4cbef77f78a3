//! Mock provider implementations for testing.
//!
//! Simple, in-memory implementations of the provider traits for unit and
//! integration tests. [`InMemoryStorage`](crate::providers::InMemoryStorage)
//! doubles as the storage mock.

pub mod auth_api;
pub mod identity;
pub mod storage;

pub use auth_api::MockAuthApi;
pub use identity::MockIdentityProvider;
pub use storage::FailingStorage;
