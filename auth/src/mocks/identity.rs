//! Mock OAuth identity provider for testing.

use crate::error::IdentityError;
use crate::providers::IdentityProvider;
use crate::state::{OAuthProvider, ProviderIdentity};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;

/// Mock identity provider.
///
/// Sign-in returns a predefined outcome; session changes are pushed by the
/// test through [`MockIdentityProvider::emit`].
#[derive(Debug, Clone)]
pub struct MockIdentityProvider {
    sign_in_outcome: Result<ProviderIdentity, IdentityError>,
    sign_out_fails: bool,
    sign_out_calls: Arc<AtomicUsize>,
    changes: broadcast::Sender<Option<ProviderIdentity>>,
}

impl MockIdentityProvider {
    /// Create a provider whose sign-in is cancelled and sign-out succeeds.
    #[must_use]
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(16);
        Self {
            sign_in_outcome: Err(IdentityError::Cancelled),
            sign_out_fails: false,
            sign_out_calls: Arc::new(AtomicUsize::new(0)),
            changes,
        }
    }

    /// Make sign-in succeed with `identity`.
    #[must_use]
    pub fn with_identity(mut self, identity: ProviderIdentity) -> Self {
        self.sign_in_outcome = Ok(identity);
        self
    }

    /// Make sign-in fail with `error`.
    #[must_use]
    pub fn with_sign_in_error(mut self, error: IdentityError) -> Self {
        self.sign_in_outcome = Err(error);
        self
    }

    /// Make sign-out fail.
    #[must_use]
    pub const fn with_failing_sign_out(mut self) -> Self {
        self.sign_out_fails = true;
        self
    }

    /// Number of sign-out calls received.
    #[must_use]
    pub fn sign_out_calls(&self) -> usize {
        self.sign_out_calls.load(Ordering::SeqCst)
    }

    /// Simulate a session change observed by the provider.
    ///
    /// Returns the number of subscribers that received it.
    pub fn emit(&self, identity: Option<ProviderIdentity>) -> usize {
        self.changes.send(identity).unwrap_or(0)
    }
}

impl Default for MockIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityProvider for MockIdentityProvider {
    async fn sign_in(&self, _provider: OAuthProvider) -> Result<ProviderIdentity, IdentityError> {
        self.sign_in_outcome.clone()
    }

    async fn sign_out(&self) -> Result<(), IdentityError> {
        self.sign_out_calls.fetch_add(1, Ordering::SeqCst);
        if self.sign_out_fails {
            Err(IdentityError::Provider("network unreachable".to_string()))
        } else {
            Ok(())
        }
    }

    fn subscribe(&self) -> broadcast::Receiver<Option<ProviderIdentity>> {
        self.changes.subscribe()
    }
}
