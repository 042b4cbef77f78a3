//! Form validation helpers run before an auth action is dispatched.

use crate::error::ValidationError;

/// Check the registration form.
///
/// Runs before `Register` is dispatched; a failure never reaches the store.
///
/// # Errors
///
/// Returns [`ValidationError::MissingField`] for the first blank field, then
/// [`ValidationError::PasswordMismatch`] if the confirmation differs.
///
/// # Examples
///
/// ```
/// use todo_sync_auth::utils::validate_registration;
///
/// assert!(validate_registration("Ada", "ada@example.com", "hunter2", "hunter2").is_ok());
/// assert!(validate_registration("Ada", "ada@example.com", "hunter2", "hunter3").is_err());
/// assert!(validate_registration("Ada", "", "hunter2", "hunter2").is_err());
/// ```
pub fn validate_registration(
    name: &str,
    email: &str,
    password: &str,
    confirm: &str,
) -> Result<(), ValidationError> {
    require_fields(&[("Name", name), ("Email", email), ("Password", password)])?;
    if password == confirm {
        Ok(())
    } else {
        Err(ValidationError::PasswordMismatch)
    }
}

/// Check the login form before `Login` is dispatched.
///
/// # Errors
///
/// Returns [`ValidationError::MissingField`] for the first blank field.
pub fn validate_login(email: &str, password: &str) -> Result<(), ValidationError> {
    require_fields(&[("Email", email), ("Password", password)])
}

/// Reject the first blank form field.
///
/// # Errors
///
/// Returns [`ValidationError::MissingField`] naming the first field whose
/// value is empty after trimming.
pub fn require_fields(fields: &[(&'static str, &str)]) -> Result<(), ValidationError> {
    match fields.iter().find(|(_, value)| value.trim().is_empty()) {
        Some(&(field, _)) => Err(ValidationError::MissingField { field }),
        None => Ok(()),
    }
}
