//! Mock REST auth service for testing.

use crate::providers::{AuthApi, LoginRequest, RegisterRequest};
use crate::state::User;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use todo_sync_core::api::ApiError;

/// Mock auth service.
///
/// Answers every register and login with the same predefined outcome and
/// records the emails it was called with.
#[derive(Debug, Clone)]
pub struct MockAuthApi {
    outcome: Result<User, ApiError>,
    calls: Arc<AtomicUsize>,
    emails: Arc<Mutex<Vec<String>>>,
}

impl MockAuthApi {
    /// Create a mock that signs in `user`.
    #[must_use]
    pub fn succeeding(user: User) -> Self {
        Self::with_outcome(Ok(user))
    }

    /// Create a mock that fails every request with `error`.
    #[must_use]
    pub fn failing(error: ApiError) -> Self {
        Self::with_outcome(Err(error))
    }

    fn with_outcome(outcome: Result<User, ApiError>) -> Self {
        Self {
            outcome,
            calls: Arc::new(AtomicUsize::new(0)),
            emails: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of requests received.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Emails of all requests received, in order.
    #[must_use]
    pub fn emails(&self) -> Vec<String> {
        self.emails
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, email: &str) -> Result<User, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.emails
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(email.to_string());
        self.outcome.clone()
    }
}

impl AuthApi for MockAuthApi {
    async fn register(&self, request: &RegisterRequest) -> Result<User, ApiError> {
        self.record(&request.email)
    }

    async fn login(&self, request: &LoginRequest) -> Result<User, ApiError> {
        self.record(&request.email)
    }
}
