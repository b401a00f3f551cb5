//! Integration tests for the sign-in lifecycle.
//!
//! Register, sign out, sign back in and look up the current user, all
//! against the in-process auth repository.

use std::sync::Arc;

use secrecy::ExposeSecret;

use spirit_guide::adapters::MockAuthRepository;
use spirit_guide::application::{
    GetCurrentUserHandler, LoginError, LoginUserCommand, LoginUserHandler, LogoutUserHandler,
    RegisterError, RegisterUserCommand, RegisterUserHandler,
};
use spirit_guide::ports::RepositoryError;

const EMAIL: &str = "river@example.com";
const PASSWORD: &str = "Stillwater!9";

#[tokio::test]
async fn register_logout_login_round_trip() {
    let repo = Arc::new(MockAuthRepository::new());

    let registered = RegisterUserHandler::new(repo.clone())
        .handle(RegisterUserCommand::new(EMAIL, PASSWORD, "  River ", "Stone"))
        .await
        .unwrap();
    assert_eq!(registered.user.first_name(), "River");
    assert!(repo.stored_tokens().is_some());

    let current = GetCurrentUserHandler::new(repo.clone()).handle().await.unwrap();
    assert_eq!(current.user.map(|u| u.email().to_string()), Some(EMAIL.to_string()));

    LogoutUserHandler::new(repo.clone()).handle().await.unwrap();
    assert!(repo.stored_tokens().is_none());
    let current = GetCurrentUserHandler::new(repo.clone()).handle().await.unwrap();
    assert!(current.user.is_none());

    let logged_in = LoginUserHandler::new(repo.clone())
        .handle(LoginUserCommand::new(EMAIL, PASSWORD))
        .await
        .unwrap();
    assert_eq!(logged_in.user.id(), registered.user.id());
    assert_eq!(
        repo.stored_tokens().unwrap().refresh_token().expose_secret(),
        logged_in.tokens.refresh_token().expose_secret()
    );
}

#[tokio::test]
async fn duplicate_registration_is_reported() {
    let repo = Arc::new(MockAuthRepository::new().with_account(EMAIL, PASSWORD, "River", "Stone"));

    let err = RegisterUserHandler::new(repo)
        .handle(RegisterUserCommand::new(EMAIL, PASSWORD, "River", "Stone"))
        .await
        .unwrap_err();

    assert!(matches!(err, RegisterError::UserAlreadyExists));
    assert_eq!(err.to_string(), "User already exists");
}

#[tokio::test]
async fn wrong_password_is_invalid_credentials() {
    let repo = Arc::new(MockAuthRepository::new().with_account(EMAIL, PASSWORD, "River", "Stone"));

    let err = LoginUserHandler::new(repo.clone())
        .handle(LoginUserCommand::new(EMAIL, "Different!1"))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Invalid credentials");
    assert_eq!(repo.store_count(), 0);
}

#[tokio::test]
async fn weak_password_never_reaches_backend() {
    let repo = Arc::new(MockAuthRepository::new());

    let err = RegisterUserHandler::new(repo.clone())
        .handle(RegisterUserCommand::new(EMAIL, "lowercase!", "River", "Stone"))
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Password must contain at least one uppercase letter"
    );
    assert_eq!(repo.store_count(), 0);
}

#[tokio::test]
async fn logout_clears_tokens_even_when_backend_fails() {
    let repo = Arc::new(
        MockAuthRepository::new()
            .with_account(EMAIL, PASSWORD, "River", "Stone")
            .with_logout_error(RepositoryError::ServiceUnavailable),
    );
    LoginUserHandler::new(repo.clone())
        .handle(LoginUserCommand::new(EMAIL, PASSWORD))
        .await
        .unwrap();

    LogoutUserHandler::new(repo.clone()).handle().await.unwrap();

    assert_eq!(repo.logout_count(), 1);
    assert!(repo.stored_tokens().is_none());
}

#[tokio::test]
async fn backend_outage_during_login_is_generic() {
    let repo = Arc::new(MockAuthRepository::new().with_login_error(RepositoryError::ServiceUnavailable));

    let err = LoginUserHandler::new(repo)
        .handle(LoginUserCommand::new(EMAIL, PASSWORD))
        .await
        .unwrap_err();

    assert!(matches!(err, LoginError::Failed));
    assert_eq!(err.to_string(), "Login failed. Please try again.");
}
