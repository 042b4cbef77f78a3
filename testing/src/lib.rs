//! # todo-sync Testing
//!
//! Testing utilities and helpers for the todo-sync reducer architecture.
//!
//! This crate provides:
//! - Deterministic clocks
//! - A Given-When-Then builder for reducers ([`ReducerTest`])
//! - Effect helpers that drive effect futures without a `Store`
//! - A tracing subscriber for test output
//!
//! ## Example
//!
//! ```ignore
//! use todo_sync_testing::{test_clock, effects::collect_actions};
//!
//! #[tokio::test]
//! async fn fetch_reports_items() {
//!     let env = TodoEnvironment::new(MockTodoApi::with_items(items), test_clock());
//!     let mut state = TodoState::default();
//!
//!     let effects = TodoReducer::new().reduce(&mut state, TodoAction::FetchAll, &env);
//!     let actions = collect_actions(effects).await;
//!
//!     assert!(matches!(actions.as_slice(), [TodoAction::Fetched { .. }]));
//! }
//! ```

use chrono::{DateTime, Utc};
use todo_sync_core::environment::Clock;

pub mod reducer_test;

/// Mock implementations of shared Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use todo_sync_testing::mocks::FixedClock;
    /// use todo_sync_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// Panics if the hardcoded timestamp fails to parse, which never happens.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

/// Helpers for running effects outside a `Store`
pub mod effects {
    use futures::future::{BoxFuture, FutureExt};
    use todo_sync_core::effect::Effect;

    /// Drive every effect to completion and collect the actions they produce
    ///
    /// Parallel groups are awaited in declaration order, which is enough for
    /// reducer-level tests where the mocks answer immediately.
    pub async fn collect_actions<A, I>(effects: I) -> Vec<A>
    where
        A: Send + 'static,
        I: IntoIterator<Item = Effect<A>>,
    {
        let mut actions = Vec::new();
        for effect in effects {
            actions.extend(run_effect(effect).await);
        }
        actions
    }

    fn run_effect<A: Send + 'static>(effect: Effect<A>) -> BoxFuture<'static, Vec<A>> {
        async move {
            match effect {
                Effect::None => Vec::new(),
                Effect::Future(fut) => fut.await.into_iter().collect(),
                Effect::Parallel(effects) | Effect::Sequential(effects) => {
                    let mut actions = Vec::new();
                    for effect in effects {
                        actions.extend(run_effect(effect).await);
                    }
                    actions
                },
            }
        }
        .boxed()
    }
}

/// Install a compact tracing subscriber that writes through the test harness
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

// Re-export commonly used items
pub use mocks::{FixedClock, test_clock};
pub use reducer_test::{ReducerTest, assertions};
