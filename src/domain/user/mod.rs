//! User module - account holder, subscription tier and credential rules.

mod credentials;
mod profile;
mod tier;
mod user;

pub use credentials::{
    check_password, is_valid_email, PasswordViolation, PASSWORD_MIN_LENGTH,
    PASSWORD_SPECIAL_CHARACTERS,
};
pub use profile::UserProfile;
pub use tier::SubscriptionTier;
pub use user::{User, UserProps, UserRecord};
