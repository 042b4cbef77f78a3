//! Authentication environment.
//!
//! This module defines the environment type for dependency injection
//! in the auth reducer.

use crate::providers::{AuthApi, IdentityProvider, KeyValueStorage};

/// Authentication environment.
///
/// Contains all external dependencies needed by the auth reducer.
///
/// # Type Parameters
///
/// - `A`: REST auth service client
/// - `I`: OAuth identity provider
/// - `K`: Durable key-value storage
#[derive(Debug, Clone)]
pub struct AuthEnvironment<A, I, K>
where
    A: AuthApi + Clone,
    I: IdentityProvider + Clone,
    K: KeyValueStorage + Clone,
{
    /// REST auth service.
    pub api: A,

    /// OAuth identity provider.
    pub identity: I,

    /// Durable storage for `token` and `userData`.
    pub storage: K,
}

impl<A, I, K> AuthEnvironment<A, I, K>
where
    A: AuthApi + Clone,
    I: IdentityProvider + Clone,
    K: KeyValueStorage + Clone,
{
    /// Create a new authentication environment.
    #[must_use]
    pub const fn new(api: A, identity: I, storage: K) -> Self {
        Self {
            api,
            identity,
            storage,
        }
    }
}
