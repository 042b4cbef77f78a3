//! Error types for authentication operations.
//!
//! Remote auth service failures use the shared
//! [`ApiError`](todo_sync_core::api::ApiError); this module covers the
//! collaborators that only the auth store talks to.

use thiserror::Error;

/// Durable key-value storage failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Reading or writing the backing medium failed.
    #[error("Storage I/O failed: {0}")]
    Io(String),

    /// A stored value could not be encoded or decoded.
    #[error("Stored value is corrupt: {0}")]
    Corrupt(String),
}

impl From<std::io::Error> for StorageError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(error: serde_json::Error) -> Self {
        Self::Corrupt(error.to_string())
    }
}

/// OAuth identity provider failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// The user closed the popup or denied consent.
    #[error("Sign-in was cancelled")]
    Cancelled,

    /// No identity provider is configured.
    #[error("Identity provider unavailable")]
    Unavailable,

    /// The provider reported an error.
    #[error("Identity provider error: {0}")]
    Provider(String),
}

/// Local validation failure, raised before anything is dispatched or sent.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// A required form field was blank.
    #[error("{field} is required")]
    MissingField {
        /// Name of the blank field.
        field: &'static str,
    },

    /// Password and confirmation differ.
    #[error("Passwords do not match")]
    PasswordMismatch,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages() {
        assert_eq!(
            ValidationError::MissingField { field: "Email" }.to_string(),
            "Email is required"
        );
        assert_eq!(ValidationError::PasswordMismatch.to_string(), "Passwords do not match");
    }

    #[test]
    fn storage_error_conversions() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(matches!(StorageError::from(io), StorageError::Io(_)));

        let json = serde_json::from_str::<serde_json::Value>("{").map_err(StorageError::from);
        assert!(matches!(json, Err(StorageError::Corrupt(_))));
    }
}
