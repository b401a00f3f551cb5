//! Mock auth repository for testing.
//!
//! Implements the `AuthRepository` port with an in-memory account table and
//! token slot, avoiding the need for a running auth backend.
//!
//! # Example
//!
//! ```ignore
//! use spirit_guide::adapters::auth::MockAuthRepository;
//!
//! let repo = MockAuthRepository::new()
//!     .with_account("luna@example.com", "Moonlight!1", "Luna", "Rivers");
//!
//! let session = repo.login(&LoginCredentials::new("luna@example.com", "Moonlight!1")).await?;
//! assert_eq!(session.user.first_name(), "Luna");
//! ```

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::user::{SubscriptionTier, User, UserProps};
use crate::ports::{
    AuthRepository, AuthSession, AuthTokens, LoginCredentials, RefreshedAccessToken,
    RegistrationData, RepositoryError,
};

struct Account {
    password: String,
    user: User,
}

/// In-memory `AuthRepository`.
///
/// Accounts are keyed by lower-cased email. Forced errors apply to every call
/// of the matching method until cleared.
#[derive(Default)]
pub struct MockAuthRepository {
    accounts: RwLock<HashMap<String, Account>>,
    tokens: RwLock<Option<AuthTokens>>,
    current_user: RwLock<Option<User>>,
    login_error: RwLock<Option<RepositoryError>>,
    register_error: RwLock<Option<RepositoryError>>,
    store_error: RwLock<Option<RepositoryError>>,
    logout_error: RwLock<Option<RepositoryError>>,
    store_calls: RwLock<usize>,
    logout_calls: RwLock<usize>,
}

impl MockAuthRepository {
    /// Creates a mock with no accounts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an existing account.
    pub fn with_user(self, password: impl Into<String>, user: User) -> Self {
        self.accounts.write().unwrap().insert(
            user.email().to_lowercase(),
            Account {
                password: password.into(),
                user,
            },
        );
        self
    }

    /// Registers an existing free-tier account from plain fields.
    pub fn with_account(
        self,
        email: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
    ) -> Self {
        let user = Self::build_user(email, first_name, last_name).unwrap();
        self.with_user(password, user)
    }

    /// Starts with a signed-in session.
    pub fn with_session(self, user: User, tokens: AuthTokens) -> Self {
        *self.current_user.write().unwrap() = Some(user);
        *self.tokens.write().unwrap() = Some(tokens);
        self
    }

    pub fn with_login_error(self, error: RepositoryError) -> Self {
        *self.login_error.write().unwrap() = Some(error);
        self
    }

    pub fn with_register_error(self, error: RepositoryError) -> Self {
        *self.register_error.write().unwrap() = Some(error);
        self
    }

    /// Makes `store_tokens` fail, for testing post-login persistence errors.
    pub fn with_store_error(self, error: RepositoryError) -> Self {
        *self.store_error.write().unwrap() = Some(error);
        self
    }

    pub fn with_logout_error(self, error: RepositoryError) -> Self {
        *self.logout_error.write().unwrap() = Some(error);
        self
    }

    /// Returns a copy of the stored token pair.
    pub fn stored_tokens(&self) -> Option<AuthTokens> {
        self.tokens.read().unwrap().clone()
    }

    pub fn store_count(&self) -> usize {
        *self.store_calls.read().unwrap()
    }

    pub fn logout_count(&self) -> usize {
        *self.logout_calls.read().unwrap()
    }

    fn build_user(email: &str, first_name: &str, last_name: &str) -> Result<User, RepositoryError> {
        User::new(UserProps {
            id: UserId::generate().to_string(),
            email: email.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            subscription_tier: SubscriptionTier::Free,
            created_at: Timestamp::now(),
            profile: None,
        })
        .map_err(|e| RepositoryError::InvalidRequest(e.message))
    }

    fn issue_tokens() -> AuthTokens {
        AuthTokens::new(
            format!("mock-access-{}", uuid::Uuid::new_v4()),
            format!("mock-refresh-{}", uuid::Uuid::new_v4()),
        )
    }

    fn forced(slot: &RwLock<Option<RepositoryError>>) -> Result<(), RepositoryError> {
        match slot.read().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AuthRepository for MockAuthRepository {
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthSession, RepositoryError> {
        Self::forced(&self.login_error)?;

        let user = {
            let accounts = self.accounts.read().unwrap();
            match accounts.get(&credentials.email.to_lowercase()) {
                Some(account) if account.password == *credentials.password.expose_secret() => {
                    account.user.clone()
                }
                _ => return Err(RepositoryError::InvalidCredentials),
            }
        };

        *self.current_user.write().unwrap() = Some(user.clone());
        Ok(AuthSession {
            user,
            tokens: Self::issue_tokens(),
        })
    }

    async fn register(&self, data: &RegistrationData) -> Result<AuthSession, RepositoryError> {
        Self::forced(&self.register_error)?;

        let key = data.email.to_lowercase();
        if self.accounts.read().unwrap().contains_key(&key) {
            return Err(RepositoryError::UserAlreadyExists);
        }

        let user = Self::build_user(&data.email, &data.first_name, &data.last_name)?;
        self.accounts.write().unwrap().insert(
            key,
            Account {
                password: data.password.expose_secret().clone(),
                user: user.clone(),
            },
        );
        *self.current_user.write().unwrap() = Some(user.clone());

        Ok(AuthSession {
            user,
            tokens: Self::issue_tokens(),
        })
    }

    async fn refresh(
        &self,
        refresh_token: &SecretString,
    ) -> Result<RefreshedAccessToken, RepositoryError> {
        let tokens = self.tokens.read().unwrap().clone();
        match tokens {
            Some(t) if t.refresh_token().expose_secret() == refresh_token.expose_secret() => {
                Ok(RefreshedAccessToken {
                    access_token: SecretString::new(format!(
                        "mock-access-{}",
                        uuid::Uuid::new_v4()
                    )),
                })
            }
            _ => Err(RepositoryError::AuthenticationRequired),
        }
    }

    async fn logout(&self) -> Result<(), RepositoryError> {
        *self.logout_calls.write().unwrap() += 1;
        Self::forced(&self.logout_error)?;
        *self.current_user.write().unwrap() = None;
        Ok(())
    }

    async fn get_current_user(&self) -> Result<Option<User>, RepositoryError> {
        if self.tokens.read().unwrap().is_none() {
            return Ok(None);
        }
        Ok(self.current_user.read().unwrap().clone())
    }

    async fn store_tokens(&self, tokens: &AuthTokens) -> Result<(), RepositoryError> {
        *self.store_calls.write().unwrap() += 1;
        Self::forced(&self.store_error)?;
        *self.tokens.write().unwrap() = Some(tokens.clone());
        Ok(())
    }

    async fn get_stored_tokens(&self) -> Result<Option<AuthTokens>, RepositoryError> {
        Ok(self.stored_tokens())
    }

    async fn clear_tokens(&self) -> Result<(), RepositoryError> {
        *self.tokens.write().unwrap() = None;
        Ok(())
    }
}
