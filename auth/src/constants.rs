//! Authentication constants.

/// Durable storage keys shared with earlier sessions.
pub mod storage_keys {
    /// Bearer token as a plain string.
    pub const TOKEN: &str = "token";

    /// JSON-serialized [`User`](crate::User).
    pub const USER_DATA: &str = "userData";
}

/// Messages stored in state when a failure carries no better description.
pub mod fallback_messages {
    /// Registration was rejected without a message.
    pub const REGISTRATION_FAILED: &str = "Registration failed";

    /// Login was rejected without a message.
    pub const LOGIN_FAILED: &str = "Login failed";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_keys_match_existing_sessions() {
        assert_eq!(storage_keys::TOKEN, "token");
        assert_eq!(storage_keys::USER_DATA, "userData");
    }
}
