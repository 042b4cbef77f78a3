//! Declarative macros for ergonomic effect construction
//!
//! Reducers build most of their effects from an `async move` block that
//! calls an injected client and maps the outcome to a result action.

/// Create an `Effect::Future` from an async block
///
/// # Example
///
/// ```rust,ignore
/// use todo_sync_core::async_effect;
///
/// async_effect! {
///     match api.list().await {
///         Ok(todos) => Some(TodoAction::Fetched { todos }),
///         Err(error) => Some(TodoAction::FetchFailed { error: error.user_message("Failed") }),
///     }
/// }
/// ```
#[macro_export]
macro_rules! async_effect {
    ($($body:tt)*) => {
        $crate::effect::Effect::Future(
            ::std::boxed::Box::pin(async move { $($body)* })
        )
    };
}
