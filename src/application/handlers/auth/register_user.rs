//! RegisterUser command handler.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};

use super::credentials_policy::{validate_email, validate_password};
use crate::application::errors::RegisterError;
use crate::domain::user::User;
use crate::ports::{AuthRepository, AuthTokens, RegistrationData};

#[derive(Debug, Clone)]
pub struct RegisterUserCommand {
    pub email: String,
    pub password: SecretString,
    pub first_name: String,
    pub last_name: String,
}

impl RegisterUserCommand {
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: SecretString::new(password.into()),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RegisterUserResult {
    pub user: User,
    pub tokens: AuthTokens,
}

/// Handler for creating an account.
///
/// Unlike login, backend failures other than a taken email surface their
/// own text.
pub struct RegisterUserHandler {
    repository: Arc<dyn AuthRepository>,
}

impl RegisterUserHandler {
    pub fn new(repository: Arc<dyn AuthRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: RegisterUserCommand) -> Result<RegisterUserResult, RegisterError> {
        let data = Self::validate(cmd).inspect_err(|e| {
            tracing::debug!("Rejected registration: {}", e);
        })?;

        let session = self
            .repository
            .register(&data)
            .await
            .inspect_err(|e| tracing::warn!("Registration failed: {}", e))?;

        self.repository
            .store_tokens(&session.tokens)
            .await
            .inspect_err(|e| tracing::warn!("Failed to store tokens after registration: {}", e))?;

        tracing::info!(user_id = %session.user.id(), "User registered");
        Ok(RegisterUserResult {
            user: session.user,
            tokens: session.tokens,
        })
    }

    fn validate(cmd: RegisterUserCommand) -> Result<RegistrationData, RegisterError> {
        let email = validate_email(&cmd.email).map_err(RegisterError::Validation)?;
        validate_password(cmd.password.expose_secret()).map_err(RegisterError::Validation)?;

        let first_name = cmd.first_name.trim();
        if first_name.is_empty() {
            return Err(RegisterError::Validation("First name is required".to_string()));
        }
        let last_name = cmd.last_name.trim();
        if last_name.is_empty() {
            return Err(RegisterError::Validation("Last name is required".to_string()));
        }

        Ok(RegistrationData {
            email,
            password: cmd.password,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::MockAuthRepository;
    use crate::ports::RepositoryError;

    fn command() -> RegisterUserCommand {
        RegisterUserCommand::new("sol@example.com", "Sunrise!9", " Sol ", "Day")
    }

    #[tokio::test]
    async fn registers_and_stores_tokens() {
        let repo = Arc::new(MockAuthRepository::new());
        let result = RegisterUserHandler::new(repo.clone())
            .handle(command())
            .await
            .unwrap();

        assert_eq!(result.user.first_name(), "Sol");
        assert!(repo.stored_tokens().is_some());
    }

    #[tokio::test]
    async fn names_are_required() {
        let handler = RegisterUserHandler::new(Arc::new(MockAuthRepository::new()));

        let mut cmd = command();
        cmd.first_name = "  ".to_string();
        assert_eq!(
            handler.handle(cmd).await.unwrap_err().to_string(),
            "First name is required"
        );

        let mut cmd = command();
        cmd.last_name = String::new();
        assert_eq!(
            handler.handle(cmd).await.unwrap_err().to_string(),
            "Last name is required"
        );
    }

    #[tokio::test]
    async fn password_policy_applies() {
        let handler = RegisterUserHandler::new(Arc::new(MockAuthRepository::new()));
        let mut cmd = command();
        cmd.password = SecretString::new("Sunrise9".to_string());
        assert_eq!(
            handler.handle(cmd).await.unwrap_err().to_string(),
            "Password must contain at least one special character"
        );
    }

    #[tokio::test]
    async fn taken_email_is_reported() {
        let repo = Arc::new(MockAuthRepository::new().with_account(
            "sol@example.com",
            "Sunrise!9",
            "Sol",
            "Day",
        ));
        let err = RegisterUserHandler::new(repo)
            .handle(command())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "User already exists");
    }

    #[tokio::test]
    async fn other_failures_surface_raw_text() {
        let repo = Arc::new(
            MockAuthRepository::new()
                .with_register_error(RepositoryError::unexpected("Registrations are paused")),
        );
        let err = RegisterUserHandler::new(repo)
            .handle(command())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Registrations are paused");
    }
}
