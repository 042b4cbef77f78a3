//! OAuth identity provider trait.
//!
//! The provider's own SDK (popups, token refresh, persistence) lives behind
//! this trait; the auth store only sees normalized session changes.

use crate::error::IdentityError;
use crate::state::{OAuthProvider, ProviderIdentity};
use std::future::Future;
use tokio::sync::broadcast;

/// OAuth identity provider.
///
/// Besides explicit sign-in and sign-out, the provider pushes a
/// notification on every session change it observes (including ones caused
/// by other tabs or token expiry). `None` means signed out.
pub trait IdentityProvider: Send + Sync {
    /// Run the provider's interactive sign-in.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError`] if the user cancels or the provider fails.
    fn sign_in(
        &self,
        provider: OAuthProvider,
    ) -> impl Future<Output = Result<ProviderIdentity, IdentityError>> + Send;

    /// End the provider session.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError`] if the provider could not be reached.
    fn sign_out(&self) -> impl Future<Output = Result<(), IdentityError>> + Send;

    /// Subscribe to session-change notifications.
    fn subscribe(&self) -> broadcast::Receiver<Option<ProviderIdentity>>;
}

/// Identity provider for deployments without OAuth.
///
/// Sign-in always fails with [`IdentityError::Unavailable`], sign-out is a
/// no-op and no session change is ever reported.
#[derive(Debug, Clone)]
pub struct NoopIdentityProvider {
    changes: broadcast::Sender<Option<ProviderIdentity>>,
}

impl NoopIdentityProvider {
    /// Create a new no-op provider.
    #[must_use]
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(1);
        Self { changes }
    }
}

impl Default for NoopIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityProvider for NoopIdentityProvider {
    async fn sign_in(&self, provider: OAuthProvider) -> Result<ProviderIdentity, IdentityError> {
        tracing::debug!(%provider, "Sign-in requested but no identity provider is configured");
        Err(IdentityError::Unavailable)
    }

    async fn sign_out(&self) -> Result<(), IdentityError> {
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<Option<ProviderIdentity>> {
        self.changes.subscribe()
    }
}
