//! LoginUser command handler.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};

use super::credentials_policy::{validate_email, validate_password};
use crate::application::errors::LoginError;
use crate::domain::user::User;
use crate::ports::{AuthRepository, AuthTokens, LoginCredentials};

#[derive(Debug, Clone)]
pub struct LoginUserCommand {
    pub email: String,
    pub password: SecretString,
}

impl LoginUserCommand {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: SecretString::new(password.into()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoginUserResult {
    pub user: User,
    pub tokens: AuthTokens,
}

/// Handler for signing in.
///
/// Tokens are stored before success is reported; a storage failure fails the
/// login.
pub struct LoginUserHandler {
    repository: Arc<dyn AuthRepository>,
}

impl LoginUserHandler {
    pub fn new(repository: Arc<dyn AuthRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: LoginUserCommand) -> Result<LoginUserResult, LoginError> {
        let email = validate_email(&cmd.email).map_err(LoginError::Validation)?;
        validate_password(cmd.password.expose_secret()).map_err(LoginError::Validation)?;

        let credentials = LoginCredentials {
            email,
            password: cmd.password,
        };

        let session = self
            .repository
            .login(&credentials)
            .await
            .inspect_err(|e| tracing::warn!("Login failed: {}", e))?;

        self.repository
            .store_tokens(&session.tokens)
            .await
            .inspect_err(|e| tracing::warn!("Failed to store tokens after login: {}", e))?;

        tracing::info!(user_id = %session.user.id(), "User logged in");
        Ok(LoginUserResult {
            user: session.user,
            tokens: session.tokens,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::MockAuthRepository;
    use crate::ports::RepositoryError;

    const EMAIL: &str = "luna@example.com";
    const PASSWORD: &str = "Moonlight!1";

    fn repo() -> Arc<MockAuthRepository> {
        Arc::new(MockAuthRepository::new().with_account(EMAIL, PASSWORD, "Luna", "Rivers"))
    }

    #[tokio::test]
    async fn logs_in_and_stores_tokens() {
        let repo = repo();
        let handler = LoginUserHandler::new(repo.clone());

        let result = handler
            .handle(LoginUserCommand::new(EMAIL, PASSWORD))
            .await
            .unwrap();

        assert_eq!(result.user.email(), EMAIL);
        assert_eq!(repo.store_count(), 1);
        assert_eq!(
            repo.stored_tokens().unwrap().access_token().expose_secret(),
            result.tokens.access_token().expose_secret()
        );
    }

    #[tokio::test]
    async fn validates_before_calling_backend() {
        let handler = LoginUserHandler::new(repo());

        let err = handler
            .handle(LoginUserCommand::new("", PASSWORD))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Email is required");

        let err = handler
            .handle(LoginUserCommand::new("luna", PASSWORD))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Please enter a valid email address");

        let err = handler
            .handle(LoginUserCommand::new(EMAIL, "moonlight!1"))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Password must contain at least one uppercase letter"
        );
    }

    #[tokio::test]
    async fn wrong_password_is_invalid_credentials() {
        let handler = LoginUserHandler::new(repo());
        let err = handler
            .handle(LoginUserCommand::new(EMAIL, "Sunlight!1"))
            .await
            .unwrap_err();
        assert_eq!(err, LoginError::InvalidCredentials);
        assert_eq!(err.to_string(), "Invalid credentials");
    }

    #[tokio::test]
    async fn other_failures_are_generic() {
        let repo = Arc::new(
            MockAuthRepository::new().with_login_error(RepositoryError::network("dns failure")),
        );
        let err = LoginUserHandler::new(repo)
            .handle(LoginUserCommand::new(EMAIL, PASSWORD))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Login failed. Please try again.");
    }

    #[tokio::test]
    async fn token_storage_failure_fails_login() {
        let repo = Arc::new(
            MockAuthRepository::new()
                .with_account(EMAIL, PASSWORD, "Luna", "Rivers")
                .with_store_error(RepositoryError::storage("keychain locked")),
        );
        let err = LoginUserHandler::new(repo.clone())
            .handle(LoginUserCommand::new(EMAIL, PASSWORD))
            .await
            .unwrap_err();
        assert_eq!(err, LoginError::Failed);
        assert!(repo.stored_tokens().is_none());
    }
}
