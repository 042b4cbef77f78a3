//! Shared vocabulary for the remote REST services.
//!
//! Both remote services report failures the same way, so their clients
//! share one error type and the normalization into a user-facing message.

use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// Failure of a call to a remote REST service
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The request could not be sent or the connection failed mid-flight
    #[error("Request failed: {0}")]
    Transport(String),

    /// The service answered with a non-success status
    #[error("Service rejected request ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Rejected {
        /// HTTP status code
        status: u16,
        /// `message` field of the error body, when the service sent one
        message: Option<String>,
    },

    /// The response body could not be parsed
    #[error("Invalid response: {0}")]
    Decode(String),
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl ApiError {
    /// Build a [`ApiError::Rejected`] from a status and the raw error body
    ///
    /// The body is expected to look like `{"message": "..."}`; anything else
    /// is kept as a rejection without a message.
    #[must_use]
    pub fn rejected(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|body| body.message)
            .filter(|message| !message.trim().is_empty());

        Self::Rejected { status, message }
    }

    /// Human-readable message stored in state for this failure
    ///
    /// A rejection carries the service's own message when it sent one,
    /// otherwise `fallback`. Transport and decode failures use their
    /// description.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Rejected {
                message: Some(message),
                ..
            } => message.clone(),
            Self::Rejected { message: None, .. } => fallback.to_string(),
            Self::Transport(description) | Self::Decode(description) => {
                if description.is_empty() {
                    fallback.to_string()
                } else {
                    description.clone()
                }
            },
        }
    }
}

/// Deserialize an identifier sent either as a JSON string or a JSON number
///
/// # Errors
///
/// Fails for any other JSON type.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Integer(i64),
        Float(f64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Integer(n) => n.to_string(),
        RawId::Float(n) => n.to_string(),
    })
}
