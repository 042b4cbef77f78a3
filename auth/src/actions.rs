//! Authentication actions.
//!
//! Intents come from the view layer; the `*Succeeded`/`*Failed`/`LoggedOut`
//! style variants are fed back by effects once the async work is done.

use crate::state::{OAuthProvider, ProviderIdentity, User};

/// Authentication action.
///
/// Actions are the **only** way to change auth state. The reducer is a pure
/// function: `(State, Action, Env) → (State, Effects)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthAction {
    // ═══════════════════════════════════════════════════════════════════════
    // Email / Password
    // ═══════════════════════════════════════════════════════════════════════
    /// Create an account with the REST auth service.
    Register {
        /// Display name.
        name: String,
        /// Email address.
        email: String,
        /// Plain-text password, sent once over TLS.
        password: String,
    },

    /// Registration succeeded and the session was persisted.
    RegisterSucceeded {
        /// Account returned by the service.
        user: User,
    },

    /// Registration failed.
    RegisterFailed {
        /// Human-readable reason.
        error: String,
    },

    /// Sign in with the REST auth service.
    Login {
        /// Email address.
        email: String,
        /// Plain-text password.
        password: String,
    },

    /// Login succeeded and the session was persisted.
    LoginSucceeded {
        /// Account returned by the service.
        user: User,
    },

    /// Login failed.
    LoginFailed {
        /// Human-readable reason.
        error: String,
    },

    // ═══════════════════════════════════════════════════════════════════════
    // Session
    // ═══════════════════════════════════════════════════════════════════════
    /// Sign out everywhere: identity provider, durable storage, state.
    Logout,

    /// Logout finished. Always fed back, even when cleanup partially failed.
    LoggedOut,

    /// Load the user persisted by an earlier session.
    RestoreSession,

    /// Result of [`AuthAction::RestoreSession`].
    SessionRestored {
        /// Persisted user, if a readable record existed.
        user: Option<User>,
    },

    /// Reset the last error message.
    ClearError,

    // ═══════════════════════════════════════════════════════════════════════
    // OAuth Identity Provider
    // ═══════════════════════════════════════════════════════════════════════
    /// Open the provider's sign-in popup.
    SignInWithProvider {
        /// Provider to sign in with.
        provider: OAuthProvider,
    },

    /// The popup flow failed. Logged only.
    ProviderSignInFailed {
        /// Provider that was attempted.
        provider: OAuthProvider,
        /// Provider's description of the failure.
        error: String,
    },

    /// The identity provider reported a session change.
    ///
    /// `None` clears the user; `Some` normalizes and replaces it.
    SetIdentity {
        /// Identity as reported by the provider.
        identity: Option<ProviderIdentity>,
    },
}
