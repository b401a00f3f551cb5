//! Email and password rules shared by the user entity and the auth use cases.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Minimum number of characters in a password.
pub const PASSWORD_MIN_LENGTH: usize = 8;

/// Characters that satisfy the special-character rule.
pub const PASSWORD_SPECIAL_CHARACTERS: &str = "!@#$%^&*(),.?\":{}|<>";

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Returns true if `email` looks like `local@domain.tld`.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// First password rule a candidate password breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PasswordViolation {
    #[error("Password must be at least 8 characters long")]
    TooShort,

    #[error("Password must contain at least one uppercase letter")]
    MissingUppercase,

    #[error("Password must contain at least one special character")]
    MissingSpecialCharacter,
}

/// Checks a password against the policy: length, then uppercase, then special.
pub fn check_password(password: &str) -> Result<(), PasswordViolation> {
    if password.chars().count() < PASSWORD_MIN_LENGTH {
        return Err(PasswordViolation::TooShort);
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(PasswordViolation::MissingUppercase);
    }
    if !password
        .chars()
        .any(|c| PASSWORD_SPECIAL_CHARACTERS.contains(c))
    {
        return Err(PasswordViolation::MissingSpecialCharacter);
    }
    Ok(())
}
