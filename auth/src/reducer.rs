//! Authentication reducer.
//!
//! # Flow
//!
//! ```text
//! Register / Login ──▶ pending ──▶ AuthApi call ──▶ persist token + userData ──▶ *Succeeded
//!                                        └───────────────────────────────────▶ *Failed
//! Logout ──▶ pending ──▶ IdentityProvider::sign_out ──▶ clear storage ──▶ LoggedOut
//! SignInWithProvider ──▶ IdentityProvider::sign_in ──▶ SetIdentity | ProviderSignInFailed
//! RestoreSession ──▶ read userData ──▶ SessionRestored
//! ```

use crate::actions::AuthAction;
use crate::constants::{fallback_messages, storage_keys};
use crate::environment::AuthEnvironment;
use crate::providers::{AuthApi, IdentityProvider, KeyValueStorage, LoginRequest, RegisterRequest};
use crate::state::{AuthState, User};
use crate::utils::{require_fields, validate_login};
use std::fmt;
use std::marker::PhantomData;
use todo_sync_core::effect::Effect;
use todo_sync_core::reducer::Reducer;
use todo_sync_core::{async_effect, smallvec, SmallVec};

/// Authentication reducer.
///
/// Stateless; the type parameters only tie it to one environment type.
pub struct AuthReducer<A, I, K> {
    _environment: PhantomData<fn() -> (A, I, K)>,
}

impl<A, I, K> AuthReducer<A, I, K> {
    /// Create a new auth reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _environment: PhantomData,
        }
    }
}

impl<A, I, K> Default for AuthReducer<A, I, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A, I, K> Clone for AuthReducer<A, I, K> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<A, I, K> fmt::Debug for AuthReducer<A, I, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthReducer")
    }
}

impl<A, I, K> Reducer for AuthReducer<A, I, K>
where
    A: AuthApi + Clone + 'static,
    I: IdentityProvider + Clone + 'static,
    K: KeyValueStorage + Clone + 'static,
{
    type State = AuthState;
    type Action = AuthAction;
    type Environment = AuthEnvironment<A, I, K>;

    #[allow(clippy::too_many_lines)] // One arm per action
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ═══════════════════════════════════════════════════════════════════
            // Register
            // ═══════════════════════════════════════════════════════════════════
            AuthAction::Register {
                name,
                email,
                password,
            } => {
                if let Err(error) = require_fields(&[
                    ("Name", name.as_str()),
                    ("Email", email.as_str()),
                    ("Password", password.as_str()),
                ]) {
                    tracing::warn!(%error, "Dropping unvalidated Register");
                    return smallvec![Effect::None];
                }

                state.begin_request();
                state.error = None;

                let api = env.api.clone();
                let storage = env.storage.clone();
                let request = RegisterRequest {
                    name,
                    email,
                    password,
                };

                smallvec![async_effect! {
                    match api.register(&request).await {
                        Ok(user) => {
                            persist_session(&storage, &user).await;
                            Some(AuthAction::RegisterSucceeded { user })
                        },
                        Err(error) => {
                            tracing::warn!(%error, "Registration failed");
                            Some(AuthAction::RegisterFailed {
                                error: error.user_message(fallback_messages::REGISTRATION_FAILED),
                            })
                        },
                    }
                }]
            },

            // ═══════════════════════════════════════════════════════════════════
            // Login
            // ═══════════════════════════════════════════════════════════════════
            AuthAction::Login { email, password } => {
                if let Err(error) = validate_login(&email, &password) {
                    tracing::warn!(%error, "Dropping unvalidated Login");
                    return smallvec![Effect::None];
                }

                state.begin_request();
                state.error = None;

                let api = env.api.clone();
                let storage = env.storage.clone();
                let request = LoginRequest { email, password };

                smallvec![async_effect! {
                    match api.login(&request).await {
                        Ok(user) => {
                            persist_session(&storage, &user).await;
                            Some(AuthAction::LoginSucceeded { user })
                        },
                        Err(error) => {
                            tracing::warn!(%error, "Login failed");
                            Some(AuthAction::LoginFailed {
                                error: error.user_message(fallback_messages::LOGIN_FAILED),
                            })
                        },
                    }
                }]
            },

            AuthAction::RegisterSucceeded { user } | AuthAction::LoginSucceeded { user } => {
                tracing::info!(user_id = %user.id, "Signed in");
                state.user = Some(user);
                state.error = None;
                state.finish_request();
                smallvec![Effect::None]
            },

            AuthAction::RegisterFailed { error } | AuthAction::LoginFailed { error } => {
                state.error = Some(error);
                state.finish_request();
                smallvec![Effect::None]
            },

            // ═══════════════════════════════════════════════════════════════════
            // Logout
            // ═══════════════════════════════════════════════════════════════════
            AuthAction::Logout => {
                state.begin_request();

                let identity_provider = env.identity.clone();
                let storage = env.storage.clone();

                smallvec![async_effect! {
                    if let Err(error) = identity_provider.sign_out().await {
                        tracing::warn!(%error, "Identity provider sign-out failed");
                    }
                    clear_session(&storage).await;
                    Some(AuthAction::LoggedOut)
                }]
            },

            AuthAction::LoggedOut => {
                tracing::info!("Signed out");
                state.user = None;
                state.finish_request();
                smallvec![Effect::None]
            },

            // ═══════════════════════════════════════════════════════════════════
            // Session Restore
            // ═══════════════════════════════════════════════════════════════════
            AuthAction::RestoreSession => {
                let storage = env.storage.clone();

                smallvec![async_effect! {
                    Some(AuthAction::SessionRestored {
                        user: load_session(&storage).await,
                    })
                }]
            },

            AuthAction::SessionRestored { user } => {
                // A sign-in that completed while storage was being read wins
                if let Some(user) = user {
                    if state.user.is_none() {
                        tracing::info!(user_id = %user.id, "Session restored");
                        state.user = Some(user);
                    }
                }
                smallvec![Effect::None]
            },

            AuthAction::ClearError => {
                state.error = None;
                smallvec![Effect::None]
            },

            // ═══════════════════════════════════════════════════════════════════
            // OAuth Identity Provider
            // ═══════════════════════════════════════════════════════════════════
            AuthAction::SignInWithProvider { provider } => {
                let identity_provider = env.identity.clone();

                smallvec![async_effect! {
                    match identity_provider.sign_in(provider).await {
                        Ok(identity) => Some(AuthAction::SetIdentity {
                            identity: Some(identity),
                        }),
                        Err(error) => Some(AuthAction::ProviderSignInFailed {
                            provider,
                            error: error.to_string(),
                        }),
                    }
                }]
            },

            AuthAction::ProviderSignInFailed { provider, error } => {
                tracing::warn!(%provider, %error, "Provider sign-in failed");
                smallvec![Effect::None]
            },

            AuthAction::SetIdentity { identity } => {
                state.user = identity.map(User::from_identity);
                match &state.user {
                    Some(user) => tracing::info!(user_id = %user.id, "Identity changed"),
                    None => tracing::info!("Identity cleared"),
                }
                smallvec![Effect::None]
            },
        }
    }
}

/// Write `token` and `userData`. Failures are logged, never surfaced.
async fn persist_session<K: KeyValueStorage>(storage: &K, user: &User) {
    if let Some(token) = &user.token {
        if let Err(error) = storage.set(storage_keys::TOKEN, token).await {
            tracing::warn!(%error, "Failed to persist token");
        }
    }

    match serde_json::to_string(user) {
        Ok(json) => {
            if let Err(error) = storage.set(storage_keys::USER_DATA, &json).await {
                tracing::warn!(%error, "Failed to persist user data");
            }
        },
        Err(error) => tracing::warn!(%error, "Failed to serialize user data"),
    }
}

/// Remove `token` and `userData`. Failures are logged, never surfaced.
async fn clear_session<K: KeyValueStorage>(storage: &K) {
    for key in [storage_keys::TOKEN, storage_keys::USER_DATA] {
        if let Err(error) = storage.remove(key).await {
            tracing::warn!(%error, key, "Failed to clear stored session");
        }
    }
}

/// Read `userData`. Unreadable or corrupt records count as absent.
async fn load_session<K: KeyValueStorage>(storage: &K) -> Option<User> {
    let json = match storage.get(storage_keys::USER_DATA).await {
        Ok(json) => json?,
        Err(error) => {
            tracing::warn!(%error, "Failed to read stored session");
            return None;
        },
    };

    match serde_json::from_str(&json) {
        Ok(user) => Some(user),
        Err(error) => {
            tracing::warn!(%error, "Stored user data is corrupt, ignoring it");
            None
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IdentityError;
    use crate::mocks::{FailingStorage, MockAuthApi, MockIdentityProvider};
    use crate::providers::InMemoryStorage;
    use crate::state::{OAuthProvider, ProviderIdentity};
    use todo_sync_core::api::ApiError;
    use todo_sync_testing::effects::collect_actions;
    use todo_sync_testing::{assertions, ReducerTest};

    type TestEnv = AuthEnvironment<MockAuthApi, MockIdentityProvider, InMemoryStorage>;
    type TestReducer = AuthReducer<MockAuthApi, MockIdentityProvider, InMemoryStorage>;

    fn ada() -> User {
        User {
            id: "64f1".to_string(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            photo_url: None,
            token: Some("jwt-123".to_string()),
        }
    }

    fn env_with(api: MockAuthApi) -> TestEnv {
        AuthEnvironment::new(api, MockIdentityProvider::new(), InMemoryStorage::new())
    }

    fn register() -> AuthAction {
        AuthAction::Register {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "hunter2".to_string(),
        }
    }

    /// Reduce an action, run its effects, and reduce whatever they feed back.
    async fn run<Env>(
        reducer: &impl Reducer<State = AuthState, Action = AuthAction, Environment = Env>,
        state: &mut AuthState,
        action: AuthAction,
        env: &Env,
    ) -> Vec<AuthAction> {
        let effects = reducer.reduce(state, action, env);
        let fed_back = collect_actions(effects).await;
        for action in fed_back.clone() {
            let _ = reducer.reduce(state, action, env);
        }
        fed_back
    }

    #[test]
    fn register_marks_pending_and_clears_error() {
        ReducerTest::new(TestReducer::new())
            .with_env(env_with(MockAuthApi::succeeding(ada())))
            .given_state(AuthState {
                error: Some("old".to_string()),
                ..AuthState::default()
            })
            .when_action(register())
            .then_state(|state| {
                assert!(state.is_loading());
                assert!(state.error.is_none());
                assert!(state.user.is_none());
            })
            .then_effects(assertions::assert_single_future_effect)
            .run();
    }

    #[test]
    fn register_with_blank_field_leaves_state_untouched() {
        let api = MockAuthApi::succeeding(ada());

        ReducerTest::new(TestReducer::new())
            .with_env(env_with(api.clone()))
            .given_state(AuthState {
                error: Some("old".to_string()),
                ..AuthState::default()
            })
            .when_action(AuthAction::Register {
                name: "Ada".to_string(),
                email: "   ".to_string(),
                password: "hunter2".to_string(),
            })
            .then_state(|state| {
                assert_eq!(state.error.as_deref(), Some("old"));
                assert!(!state.is_loading());
            })
            .then_effects(assertions::assert_no_effects)
            .run();

        assert_eq!(api.calls(), 0);
    }

    #[test]
    fn login_with_blank_field_leaves_state_untouched() {
        let api = MockAuthApi::succeeding(ada());

        ReducerTest::new(TestReducer::new())
            .with_env(env_with(api.clone()))
            .given_state(AuthState::default())
            .when_action(AuthAction::Login {
                email: "ada@example.com".to_string(),
                password: String::new(),
            })
            .then_state(|state| {
                assert_eq!(*state, AuthState::default());
            })
            .then_effects(assertions::assert_no_effects)
            .run();

        assert_eq!(api.calls(), 0);
    }

    #[tokio::test]
    async fn successful_register_commits_user_and_persists_session(
    ) -> Result<(), serde_json::Error> {
        let env = env_with(MockAuthApi::succeeding(ada()));
        let mut state = AuthState::default();

        let fed_back = run(&TestReducer::new(), &mut state, register(), &env).await;

        assert_eq!(fed_back, vec![AuthAction::RegisterSucceeded { user: ada() }]);
        assert_eq!(state.user, Some(ada()));
        assert!(!state.is_loading());
        assert!(state.error.is_none());

        let stored = env.storage.snapshot();
        assert_eq!(stored.get("token").map(String::as_str), Some("jwt-123"));
        let user: User = serde_json::from_str(&stored["userData"])?;
        assert_eq!(user, ada());
        Ok(())
    }

    #[tokio::test]
    async fn failing_register_keeps_user_and_reports_service_message() {
        let env = env_with(MockAuthApi::failing(ApiError::Rejected {
            status: 409,
            message: Some("Email already registered".to_string()),
        }));
        let mut state = AuthState::default();

        run(&TestReducer::new(), &mut state, register(), &env).await;

        assert!(state.user.is_none());
        assert_eq!(state.error.as_deref(), Some("Email already registered"));
        assert!(!state.is_loading());
        assert!(env.storage.snapshot().is_empty());
    }

    #[tokio::test]
    async fn failing_login_without_message_uses_fallback() {
        let env = env_with(MockAuthApi::failing(ApiError::Rejected {
            status: 401,
            message: None,
        }));
        let previous = User {
            token: None,
            ..ada()
        };
        let mut state = AuthState {
            user: Some(previous.clone()),
            ..AuthState::default()
        };

        let login = AuthAction::Login {
            email: "ada@example.com".to_string(),
            password: "wrong".to_string(),
        };
        run(&TestReducer::new(), &mut state, login, &env).await;

        assert_eq!(state.user, Some(previous));
        assert_eq!(state.error.as_deref(), Some("Login failed"));
        assert!(!state.is_loading());
    }

    #[tokio::test]
    async fn login_succeeds_even_when_storage_fails() {
        let env = AuthEnvironment::new(
            MockAuthApi::succeeding(ada()),
            MockIdentityProvider::new(),
            FailingStorage,
        );
        let reducer = AuthReducer::<MockAuthApi, MockIdentityProvider, FailingStorage>::new();
        let mut state = AuthState::default();

        let login = AuthAction::Login {
            email: "ada@example.com".to_string(),
            password: "hunter2".to_string(),
        };
        run(&reducer, &mut state, login, &env).await;

        assert_eq!(state.user, Some(ada()));
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn logout_clears_user_and_storage_when_provider_fails() {
        let storage = InMemoryStorage::with_entries([("token", "jwt-123"), ("userData", "{}")]);
        let identity = MockIdentityProvider::new().with_failing_sign_out();
        let env = AuthEnvironment::new(MockAuthApi::succeeding(ada()), identity.clone(), storage);
        let mut state = AuthState {
            user: Some(ada()),
            ..AuthState::default()
        };

        let fed_back = run(&TestReducer::new(), &mut state, AuthAction::Logout, &env).await;

        assert_eq!(fed_back, vec![AuthAction::LoggedOut]);
        assert!(state.user.is_none());
        assert!(!state.is_loading());
        assert!(env.storage.snapshot().is_empty());
        assert_eq!(identity.sign_out_calls(), 1);
    }

    #[tokio::test]
    async fn logout_completes_when_storage_fails() {
        let env = AuthEnvironment::new(
            MockAuthApi::succeeding(ada()),
            MockIdentityProvider::new(),
            FailingStorage,
        );
        let reducer = AuthReducer::<MockAuthApi, MockIdentityProvider, FailingStorage>::new();
        let mut state = AuthState {
            user: Some(ada()),
            ..AuthState::default()
        };

        run(&reducer, &mut state, AuthAction::Logout, &env).await;

        assert!(state.user.is_none());
    }

    #[test]
    fn set_identity_normalizes_and_is_idempotent() {
        let identity = ProviderIdentity {
            uid: "g-1".to_string(),
            display_name: None,
            email: None,
            photo_url: None,
        };
        let reducer = TestReducer::new();
        let env = env_with(MockAuthApi::succeeding(ada()));
        let mut state = AuthState::default();

        for _ in 0..2 {
            let effects = reducer.reduce(
                &mut state,
                AuthAction::SetIdentity {
                    identity: Some(identity.clone()),
                },
                &env,
            );
            assertions::assert_no_effects(&effects);
        }

        let user = state.user.as_ref();
        assert_eq!(user.map(|u| u.id.as_str()), Some("g-1"));
        assert_eq!(user.map(|u| u.name.as_str()), Some("Anonymous"));
        assert_eq!(user.map(|u| u.email.as_str()), Some(""));
    }

    #[test]
    fn set_identity_none_clears_user() {
        ReducerTest::new(TestReducer::new())
            .with_env(env_with(MockAuthApi::succeeding(ada())))
            .given_state(AuthState {
                user: Some(ada()),
                ..AuthState::default()
            })
            .when_action(AuthAction::SetIdentity { identity: None })
            .then_state(|state| assert!(state.user.is_none()))
            .run();
    }

    #[test]
    fn clear_error_only_touches_error() {
        ReducerTest::new(TestReducer::new())
            .with_env(env_with(MockAuthApi::succeeding(ada())))
            .given_state(AuthState {
                user: Some(ada()),
                error: Some("Login failed".to_string()),
                pending_requests: 1,
            })
            .when_action(AuthAction::ClearError)
            .then_state(|state| {
                assert!(state.error.is_none());
                assert_eq!(state.user, Some(ada()));
                assert!(state.is_loading());
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[tokio::test]
    async fn provider_sign_in_feeds_identity() {
        let identity = ProviderIdentity {
            uid: "gh-9".to_string(),
            display_name: Some("Linus".to_string()),
            email: Some("linus@example.com".to_string()),
            photo_url: None,
        };
        let env = AuthEnvironment::new(
            MockAuthApi::succeeding(ada()),
            MockIdentityProvider::new().with_identity(identity.clone()),
            InMemoryStorage::new(),
        );
        let mut state = AuthState::default();

        let action = AuthAction::SignInWithProvider {
            provider: OAuthProvider::GitHub,
        };
        let fed_back = run(&TestReducer::new(), &mut state, action, &env).await;

        assert_eq!(
            fed_back,
            vec![AuthAction::SetIdentity {
                identity: Some(identity)
            }]
        );
        assert_eq!(state.user.map(|u| u.name), Some("Linus".to_string()));
    }

    #[tokio::test]
    async fn provider_sign_in_failure_is_not_stored() {
        let env = AuthEnvironment::new(
            MockAuthApi::succeeding(ada()),
            MockIdentityProvider::new().with_sign_in_error(IdentityError::Cancelled),
            InMemoryStorage::new(),
        );
        let mut state = AuthState::default();

        let action = AuthAction::SignInWithProvider {
            provider: OAuthProvider::Google,
        };
        let fed_back = run(&TestReducer::new(), &mut state, action, &env).await;

        assert_eq!(
            fed_back,
            vec![AuthAction::ProviderSignInFailed {
                provider: OAuthProvider::Google,
                error: "Sign-in was cancelled".to_string(),
            }]
        );
        assert_eq!(state, AuthState::default());
    }

    #[tokio::test]
    async fn restore_session_reads_user_data() -> Result<(), serde_json::Error> {
        let storage = InMemoryStorage::with_entries([("userData", serde_json::to_string(&ada())?)]);
        let env = AuthEnvironment::new(
            MockAuthApi::succeeding(ada()),
            MockIdentityProvider::new(),
            storage,
        );
        let mut state = AuthState::default();

        run(&TestReducer::new(), &mut state, AuthAction::RestoreSession, &env).await;

        assert_eq!(state.user, Some(ada()));
        Ok(())
    }

    #[tokio::test]
    async fn restore_session_ignores_corrupt_record() {
        let storage = InMemoryStorage::with_entries([("userData", "{not json")]);
        let env = AuthEnvironment::new(
            MockAuthApi::succeeding(ada()),
            MockIdentityProvider::new(),
            storage,
        );
        let mut state = AuthState::default();

        let fed_back =
            run(&TestReducer::new(), &mut state, AuthAction::RestoreSession, &env).await;

        assert_eq!(fed_back, vec![AuthAction::SessionRestored { user: None }]);
        assert!(state.user.is_none());
    }

    #[test]
    fn restored_session_does_not_replace_fresh_sign_in() {
        let fresh = User {
            id: "fresh".to_string(),
            ..ada()
        };

        ReducerTest::new(TestReducer::new())
            .with_env(env_with(MockAuthApi::succeeding(ada())))
            .given_state(AuthState {
                user: Some(fresh.clone()),
                ..AuthState::default()
            })
            .when_action(AuthAction::SessionRestored { user: Some(ada()) })
            .then_state(move |state| assert_eq!(state.user, Some(fresh)))
            .run();
    }

    #[test]
    fn overlapping_requests_keep_loading_until_last_completes() {
        let reducer = TestReducer::new();
        let env = env_with(MockAuthApi::succeeding(ada()));
        let mut state = AuthState::default();

        let _ = reducer.reduce(&mut state, register(), &env);
        let _ = reducer.reduce(&mut state, AuthAction::Logout, &env);
        let _ = reducer.reduce(
            &mut state,
            AuthAction::RegisterFailed {
                error: "Registration failed".to_string(),
            },
            &env,
        );
        assert!(state.is_loading());

        let _ = reducer.reduce(&mut state, AuthAction::LoggedOut, &env);
        assert!(!state.is_loading());
    }
}
