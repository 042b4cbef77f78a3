//! REST auth service trait.

use crate::state::User;
use serde::Serialize;
use std::fmt;
use std::future::Future;
use todo_sync_core::api::ApiError;

/// Body of `POST {base}/register`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Plain-text password.
    pub password: String,
}

/// Body of `POST {base}/login`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    /// Email address.
    pub email: String,
    /// Plain-text password.
    pub password: String,
}

// Passwords stay out of logs.
impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// REST auth service.
///
/// Both calls return the account together with its bearer token.
pub trait AuthApi: Send + Sync {
    /// Create an account.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] when the service refuses (e.g. the
    /// email is taken) and [`ApiError::Transport`]/[`ApiError::Decode`] when
    /// the exchange itself fails.
    fn register(
        &self,
        request: &RegisterRequest,
    ) -> impl Future<Output = Result<User, ApiError>> + Send;

    /// Sign in with existing credentials.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`AuthApi::register`].
    fn login(&self, request: &LoginRequest) -> impl Future<Output = Result<User, ApiError>> + Send;
}
