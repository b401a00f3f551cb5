//! Auth Repository Port - sign-in, registration and token custody.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::RepositoryError;
use crate::domain::user::User;

/// Email and password for a sign-in attempt.
#[derive(Debug, Clone)]
pub struct LoginCredentials {
    pub email: String,
    pub password: SecretString,
}

impl LoginCredentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: SecretString::new(password.into()),
        }
    }
}

/// New account details.
#[derive(Debug, Clone)]
pub struct RegistrationData {
    pub email: String,
    pub password: SecretString,
    pub first_name: String,
    pub last_name: String,
}

/// Access/refresh token pair.
///
/// Tokens stay wrapped in [`SecretString`] so they never show up in logs.
#[derive(Debug, Clone)]
pub struct AuthTokens {
    access_token: SecretString,
    refresh_token: SecretString,
}

impl AuthTokens {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: SecretString::new(access_token.into()),
            refresh_token: SecretString::new(refresh_token.into()),
        }
    }

    pub fn access_token(&self) -> &SecretString {
        &self.access_token
    }

    pub fn refresh_token(&self) -> &SecretString {
        &self.refresh_token
    }

    /// Returns a pair with a new access token and the same refresh token.
    pub fn with_access_token(&self, access_token: impl Into<String>) -> Self {
        Self {
            access_token: SecretString::new(access_token.into()),
            refresh_token: self.refresh_token.clone(),
        }
    }

    /// Plain form used for storage and wire payloads.
    pub fn to_record(&self) -> AuthTokensRecord {
        AuthTokensRecord {
            access_token: self.access_token.expose_secret().clone(),
            refresh_token: self.refresh_token.expose_secret().clone(),
        }
    }
}

impl From<AuthTokensRecord> for AuthTokens {
    fn from(record: AuthTokensRecord) -> Self {
        AuthTokens::new(record.access_token, record.refresh_token)
    }
}

/// Serialized token pair. Only adapters should hold one of these.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthTokensRecord {
    pub access_token: String,
    pub refresh_token: String,
}

/// Authenticated user plus the tokens that go with the session.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: User,
    pub tokens: AuthTokens,
}

/// Result of a token refresh.
#[derive(Debug, Clone)]
pub struct RefreshedAccessToken {
    pub access_token: SecretString,
}

/// Port for the authentication backend and token storage.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    /// Signs in.
    ///
    /// # Errors
    ///
    /// `InvalidCredentials` when the backend rejects the email/password pair.
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthSession, RepositoryError>;

    /// Creates an account and signs it in.
    ///
    /// # Errors
    ///
    /// `UserAlreadyExists` when the email is taken.
    async fn register(&self, data: &RegistrationData) -> Result<AuthSession, RepositoryError>;

    /// Exchanges a refresh token for a new access token.
    async fn refresh(
        &self,
        refresh_token: &SecretString,
    ) -> Result<RefreshedAccessToken, RepositoryError>;

    /// Ends the server-side session.
    async fn logout(&self) -> Result<(), RepositoryError>;

    /// Returns the signed-in user, or `None` when no session exists.
    async fn get_current_user(&self) -> Result<Option<User>, RepositoryError>;

    async fn store_tokens(&self, tokens: &AuthTokens) -> Result<(), RepositoryError>;

    async fn get_stored_tokens(&self) -> Result<Option<AuthTokens>, RepositoryError>;

    async fn clear_tokens(&self) -> Result<(), RepositoryError>;
}
