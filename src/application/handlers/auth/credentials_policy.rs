//! Input checks shared by the login and registration handlers.

use crate::domain::user::{check_password, is_valid_email};

/// Returns the trimmed email or the user-facing reason it was rejected.
pub(super) fn validate_email(email: &str) -> Result<String, String> {
    let email = email.trim();
    if email.is_empty() {
        return Err("Email is required".to_string());
    }
    if !is_valid_email(email) {
        return Err("Please enter a valid email address".to_string());
    }
    Ok(email.to_string())
}

/// Checks presence and the password policy.
pub(super) fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password is required".to_string());
    }
    check_password(password).map_err(|violation| violation.to_string())
}
