//! Repository error taxonomy shared by every adapter and use case.

use thiserror::Error;

/// Classified failure raised by a repository adapter.
///
/// Adapters classify failures once (HTTP status, I/O kind) and use cases
/// match on the variant. The `Display` text keeps the phrases clients have
/// always seen from the backend ("Authentication required", "Too many
/// requests", ...).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("Authentication required")]
    AuthenticationRequired,

    #[error("Access denied")]
    AccessDenied,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Too many requests")]
    RateLimited,

    #[error("AI service temporarily unavailable")]
    ServiceUnavailable,

    /// Upstream content filter refusal. The text is shown to the user as is.
    #[error("{0}")]
    ContentPolicyRefusal(String),

    #[error("Invalid request data: {0}")]
    InvalidRequest(String),

    #[error("Invalid birth data: {0}")]
    InvalidBirthData(String),

    #[error("Message too long")]
    MessageTooLong,

    #[error("Network connection failed: {0}")]
    NetworkFailure(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("{0}")]
    Unexpected(String),
}

impl RepositoryError {
    pub fn network(detail: impl Into<String>) -> Self {
        RepositoryError::NetworkFailure(detail.into())
    }

    pub fn storage(detail: impl Into<String>) -> Self {
        RepositoryError::Storage(detail.into())
    }

    pub fn unexpected(detail: impl Into<String>) -> Self {
        RepositoryError::Unexpected(detail.into())
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::Unexpected(format!("Malformed payload: {}", err))
    }
}
