//! Authentication state types.
//!
//! All types are `Clone` so the view layer can take snapshots of the store.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use todo_sync_core::api::string_or_number;

/// Display name used when a provider identity has none.
pub const ANONYMOUS_NAME: &str = "Anonymous";

// ═══════════════════════════════════════════════════════════════════════
// User
// ═══════════════════════════════════════════════════════════════════════

/// The signed-in user.
///
/// The REST auth service and the identity provider describe accounts
/// differently; both are normalized into this shape as soon as the identity
/// becomes known. The serialized form is what lands under the `userData`
/// storage key.
///
/// # Examples
///
/// ```
/// # use todo_sync_auth::User;
/// let user: User = serde_json::from_str(
///     r#"{"_id":"64f1","name":"Ada","email":"ada@example.com","token":"t0k"}"#,
/// ).unwrap();
/// assert_eq!(user.id, "64f1");
/// assert_eq!(user.token.as_deref(), Some("t0k"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Provider-assigned identifier.
    #[serde(alias = "_id", deserialize_with = "string_or_number")]
    pub id: String,

    /// Display name.
    #[serde(default)]
    pub name: String,

    /// Email address (empty when the provider did not share one).
    #[serde(default)]
    pub email: String,

    /// Profile image URL.
    #[serde(rename = "photoURL", default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,

    /// Bearer token issued by the REST auth service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl User {
    /// Normalize an identity reported by the identity provider.
    ///
    /// Total: a missing display name becomes [`ANONYMOUS_NAME`] and a
    /// missing email becomes the empty string.
    #[must_use]
    pub fn from_identity(identity: ProviderIdentity) -> Self {
        Self {
            id: identity.uid,
            name: identity
                .display_name
                .unwrap_or_else(|| ANONYMOUS_NAME.to_string()),
            email: identity.email.unwrap_or_default(),
            photo_url: identity.photo_url,
            token: None,
        }
    }
}

impl From<ProviderIdentity> for User {
    fn from(identity: ProviderIdentity) -> Self {
        Self::from_identity(identity)
    }
}

/// Raw identity as reported by the OAuth identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderIdentity {
    /// Provider user id.
    pub uid: String,

    /// Display name, if the account has one.
    #[serde(default)]
    pub display_name: Option<String>,

    /// Email, if shared with the application.
    #[serde(default)]
    pub email: Option<String>,

    /// Profile image URL.
    #[serde(rename = "photoURL", default)]
    pub photo_url: Option<String>,
}

// ═══════════════════════════════════════════════════════════════════════
// OAuth Providers
// ═══════════════════════════════════════════════════════════════════════

/// Identity providers offered for popup sign-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OAuthProvider {
    /// Google.
    Google,
    /// GitHub.
    GitHub,
}

impl OAuthProvider {
    /// Get the provider name as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::GitHub => "github",
        }
    }
}

impl fmt::Display for OAuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OAuthProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "github" => Ok(Self::GitHub),
            _ => Err(format!("Unknown OAuth provider: {s}")),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Store State
// ═══════════════════════════════════════════════════════════════════════

/// Root authentication state.
///
/// # Examples
///
/// ```
/// # use todo_sync_auth::AuthState;
/// let state = AuthState::default();
/// assert!(state.user.is_none());
/// assert!(!state.is_loading());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    /// Currently signed-in user.
    pub user: Option<User>,

    /// Message of the most recent failure.
    pub error: Option<String>,

    /// Auth requests whose response has not been reduced yet.
    pub pending_requests: usize,
}

impl AuthState {
    /// Whether an auth network call is outstanding.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.pending_requests > 0
    }

    /// Whether a user is signed in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub(crate) const fn begin_request(&mut self) {
        self.pending_requests += 1;
    }

    pub(crate) const fn finish_request(&mut self) {
        self.pending_requests = self.pending_requests.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> ProviderIdentity {
        ProviderIdentity {
            uid: "g-123".to_string(),
            display_name: Some("Grace".to_string()),
            email: Some("grace@example.com".to_string()),
            photo_url: Some("https://example.com/g.png".to_string()),
        }
    }

    #[test]
    fn identity_normalizes_all_fields() {
        let user = User::from_identity(identity());

        assert_eq!(user.id, "g-123");
        assert_eq!(user.name, "Grace");
        assert_eq!(user.email, "grace@example.com");
        assert_eq!(user.photo_url.as_deref(), Some("https://example.com/g.png"));
        assert!(user.token.is_none());
    }

    #[test]
    fn identity_without_profile_uses_placeholders() {
        let user = User::from(ProviderIdentity {
            uid: "gh-7".to_string(),
            display_name: None,
            email: None,
            photo_url: None,
        });

        assert_eq!(user.name, ANONYMOUS_NAME);
        assert_eq!(user.email, "");
        assert!(user.photo_url.is_none());
    }

    #[test]
    fn rest_account_with_numeric_id() -> Result<(), serde_json::Error> {
        let user: User = serde_json::from_str(
            r#"{"id":42,"name":"Ada","email":"ada@example.com","photoURL":"p.png"}"#,
        )?;

        assert_eq!(user.id, "42");
        assert_eq!(user.photo_url.as_deref(), Some("p.png"));
        assert!(user.token.is_none());
        Ok(())
    }

    #[test]
    fn stored_user_uses_wire_field_names() -> Result<(), serde_json::Error> {
        let user = User {
            id: "1".to_string(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            photo_url: Some("p.png".to_string()),
            token: None,
        };

        let json = serde_json::to_value(&user)?;
        assert_eq!(json["photoURL"], "p.png");
        assert!(json.get("token").is_none());
        assert_eq!(serde_json::from_value::<User>(json)?, user);
        Ok(())
    }

    #[test]
    fn provider_parsing() {
        assert_eq!("GitHub".parse::<OAuthProvider>(), Ok(OAuthProvider::GitHub));
        assert_eq!(OAuthProvider::Google.to_string(), "google");
        assert!("myspace".parse::<OAuthProvider>().is_err());
    }

    #[test]
    fn request_counter_never_underflows() {
        let mut state = AuthState::default();
        state.finish_request();
        assert!(!state.is_loading());

        state.begin_request();
        state.begin_request();
        state.finish_request();
        assert!(state.is_loading());
    }
}
