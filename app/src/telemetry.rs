//! Logging setup.

use crate::error::AppError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global tracing subscriber.
///
/// `log_level` is an [`EnvFilter`] directive such as `info` or
/// `todo_sync_todos=debug,info`.
///
/// # Errors
///
/// Returns [`AppError::Logging`] if the directive is invalid or a global
/// subscriber is already installed.
pub fn init_tracing(log_level: &str) -> Result<(), AppError> {
    let filter = EnvFilter::try_new(log_level).map_err(|e| AppError::Logging(e.to_string()))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| AppError::Logging(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_directive_is_rejected() {
        assert!(matches!(
            init_tracing("todo_sync=loudest"),
            Err(AppError::Logging(_))
        ));
    }
}
