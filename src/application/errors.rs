//! User-facing use-case errors.
//!
//! Every handler returns one of these. The `Display` text is what the app
//! shows, so each `From<RepositoryError>` impl below is the single place a
//! backend failure is translated for a given use case.

use thiserror::Error;

use crate::domain::foundation::DomainError;
use crate::ports::RepositoryError;

/// Shown when a failure carries no usable text.
pub const GENERIC_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again.";

/// Canonical over-length chat message, shared by validation and backend mapping.
pub const MESSAGE_TOO_LONG: &str =
    "Message too long. Please keep messages under 2000 characters.";

fn raw_message(err: &RepositoryError) -> String {
    let text = err.to_string();
    if text.trim().is_empty() {
        GENERIC_ERROR_MESSAGE.to_string()
    } else {
        text
    }
}

fn verbatim(text: &str) -> String {
    if text.trim().is_empty() {
        GENERIC_ERROR_MESSAGE.to_string()
    } else {
        text.to_string()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// AI use cases
// ─────────────────────────────────────────────────────────────────────────────

/// Failure of [`SendChatMessageHandler`](super::handlers::chat::SendChatMessageHandler).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    #[error("{0}")]
    Validation(String),

    #[error("Authentication required. Please log in.")]
    AuthenticationRequired,

    #[error("Message too long. Please keep messages under 2000 characters.")]
    MessageTooLong,

    #[error("AI service is temporarily unavailable. Please try again later.")]
    ServiceUnavailable,

    #[error("{0}")]
    ContentRefused(String),

    #[error("Invalid request. Please check your input and try again.")]
    InvalidRequest,

    #[error("{0}")]
    Other(String),
}

impl From<RepositoryError> for ChatError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::AuthenticationRequired => ChatError::AuthenticationRequired,
            RepositoryError::MessageTooLong => ChatError::MessageTooLong,
            RepositoryError::ServiceUnavailable => ChatError::ServiceUnavailable,
            RepositoryError::ContentPolicyRefusal(text) => ChatError::ContentRefused(verbatim(&text)),
            RepositoryError::InvalidRequest(_) => ChatError::InvalidRequest,
            other => ChatError::Other(raw_message(&other)),
        }
    }
}

impl From<DomainError> for ChatError {
    fn from(err: DomainError) -> Self {
        ChatError::Validation(err.message)
    }
}

/// Failure of [`RequestSpiritualGuidanceHandler`](super::handlers::guidance::RequestSpiritualGuidanceHandler).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuidanceError {
    #[error("{0}")]
    Validation(String),

    #[error("Authentication required. Please log in.")]
    AuthenticationRequired,

    #[error("Message too long. Please keep messages under 2000 characters.")]
    MessageTooLong,

    #[error("AI service is temporarily unavailable. Please try again later.")]
    ServiceUnavailable,

    #[error("{0}")]
    ContentRefused(String),

    #[error("Invalid request. Please check your input and try again.")]
    InvalidRequest,

    #[error("Access denied. Please check your subscription and try again.")]
    AccessDenied,

    #[error("Too many requests. Please wait a moment and try again.")]
    RateLimited,

    #[error("Network connection failed. Please check your internet connection and try again.")]
    NetworkFailure,

    #[error("{0}")]
    Other(String),
}

impl From<RepositoryError> for GuidanceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::AuthenticationRequired => GuidanceError::AuthenticationRequired,
            RepositoryError::MessageTooLong => GuidanceError::MessageTooLong,
            RepositoryError::ServiceUnavailable => GuidanceError::ServiceUnavailable,
            RepositoryError::ContentPolicyRefusal(text) => {
                GuidanceError::ContentRefused(verbatim(&text))
            }
            RepositoryError::InvalidRequest(_) => GuidanceError::InvalidRequest,
            RepositoryError::AccessDenied => GuidanceError::AccessDenied,
            RepositoryError::RateLimited => GuidanceError::RateLimited,
            RepositoryError::NetworkFailure(_) => GuidanceError::NetworkFailure,
            other => GuidanceError::Other(raw_message(&other)),
        }
    }
}

/// Failure of [`RequestAstrologyReadingHandler`](super::handlers::guidance::RequestAstrologyReadingHandler).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AstrologyError {
    #[error("{0}")]
    Validation(String),

    #[error("Authentication required. Please log in.")]
    AuthenticationRequired,

    #[error("Message too long. Please keep messages under 2000 characters.")]
    MessageTooLong,

    #[error("AI service is temporarily unavailable. Please try again later.")]
    ServiceUnavailable,

    #[error("{0}")]
    ContentRefused(String),

    #[error("Invalid request. Please check your input and try again.")]
    InvalidRequest,

    #[error("Access denied. Please check your subscription and try again.")]
    AccessDenied,

    #[error("Too many requests. Please wait a moment and try again.")]
    RateLimited,

    #[error("Network connection failed. Please check your internet connection and try again.")]
    NetworkFailure,

    #[error("Invalid birth data. Please check your birth information and try again.")]
    InvalidBirthData,

    #[error("{0}")]
    Other(String),
}

impl From<RepositoryError> for AstrologyError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::AuthenticationRequired => AstrologyError::AuthenticationRequired,
            RepositoryError::MessageTooLong => AstrologyError::MessageTooLong,
            RepositoryError::ServiceUnavailable => AstrologyError::ServiceUnavailable,
            RepositoryError::ContentPolicyRefusal(text) => {
                AstrologyError::ContentRefused(verbatim(&text))
            }
            RepositoryError::InvalidRequest(_) => AstrologyError::InvalidRequest,
            RepositoryError::AccessDenied => AstrologyError::AccessDenied,
            RepositoryError::RateLimited => AstrologyError::RateLimited,
            RepositoryError::NetworkFailure(_) => AstrologyError::NetworkFailure,
            RepositoryError::InvalidBirthData(_) => AstrologyError::InvalidBirthData,
            other => AstrologyError::Other(raw_message(&other)),
        }
    }
}

impl From<DomainError> for AstrologyError {
    fn from(err: DomainError) -> Self {
        AstrologyError::Validation(err.message)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Conversation queries
// ─────────────────────────────────────────────────────────────────────────────

/// Failure of the stored-conversation handlers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversationQueryError {
    #[error("{0}")]
    Validation(String),

    #[error("Conversation not found")]
    NotFound,

    /// Repository failures surface their own text.
    #[error("{0}")]
    Repository(String),
}

impl From<RepositoryError> for ConversationQueryError {
    fn from(err: RepositoryError) -> Self {
        ConversationQueryError::Repository(raw_message(&err))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Auth use cases
// ─────────────────────────────────────────────────────────────────────────────

/// Failure of [`LoginUserHandler`](super::handlers::auth::LoginUserHandler).
///
/// Backend text is never shown, so a failed login does not reveal whether
/// the account exists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginError {
    #[error("{0}")]
    Validation(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Login failed. Please try again.")]
    Failed,
}

impl From<RepositoryError> for LoginError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::InvalidCredentials => LoginError::InvalidCredentials,
            _ => LoginError::Failed,
        }
    }
}

/// Failure of [`RegisterUserHandler`](super::handlers::auth::RegisterUserHandler).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegisterError {
    #[error("{0}")]
    Validation(String),

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("{0}")]
    Other(String),
}

impl From<RepositoryError> for RegisterError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::UserAlreadyExists => RegisterError::UserAlreadyExists,
            other => RegisterError::Other(raw_message(&other)),
        }
    }
}

/// Failure of the session handlers (logout, current user).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("{0}")]
    Repository(String),
}

impl From<RepositoryError> for SessionError {
    fn from(err: RepositoryError) -> Self {
        SessionError::Repository(raw_message(&err))
    }
}
