//! Backend-backed `AuthRepository`.
//!
//! Sign-in calls go to the Spirit Guide API; the resulting token pair is kept
//! in a local [`TokenStore`].

use std::sync::Arc;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::adapters::http::{ApiClient, Endpoint};
use crate::domain::user::User;
use crate::ports::{
    AuthRepository, AuthSession, AuthTokens, LoginCredentials, RefreshedAccessToken,
    RegistrationData, RepositoryError,
};

use super::TokenStore;

#[derive(Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterBody<'a> {
    email: &'a str,
    password: &'a str,
    first_name: &'a str,
    last_name: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshBody<'a> {
    refresh_token: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionPayload {
    user: User,
    access_token: String,
    refresh_token: String,
}

impl From<SessionPayload> for AuthSession {
    fn from(payload: SessionPayload) -> Self {
        AuthSession {
            user: payload.user,
            tokens: AuthTokens::new(payload.access_token, payload.refresh_token),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshPayload {
    access_token: String,
}

/// `/auth/me` answers either with the user itself or wrapped as `{"user": ..}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum CurrentUserPayload {
    Wrapped { user: User },
    Bare(User),
}

pub struct HttpAuthRepository {
    client: Arc<ApiClient>,
    tokens: Arc<TokenStore>,
}

impl HttpAuthRepository {
    pub fn new(client: Arc<ApiClient>, tokens: Arc<TokenStore>) -> Self {
        Self { client, tokens }
    }
}

#[async_trait]
impl AuthRepository for HttpAuthRepository {
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthSession, RepositoryError> {
        let body = LoginBody {
            email: &credentials.email,
            password: credentials.password.expose_secret(),
        };
        let payload: SessionPayload = self.client.post(Endpoint::Login, &body).await?;
        Ok(payload.into())
    }

    async fn register(&self, data: &RegistrationData) -> Result<AuthSession, RepositoryError> {
        let body = RegisterBody {
            email: &data.email,
            password: data.password.expose_secret(),
            first_name: &data.first_name,
            last_name: &data.last_name,
        };
        let payload: SessionPayload = self.client.post(Endpoint::Register, &body).await?;
        Ok(payload.into())
    }

    async fn refresh(
        &self,
        refresh_token: &SecretString,
    ) -> Result<RefreshedAccessToken, RepositoryError> {
        let body = RefreshBody {
            refresh_token: refresh_token.expose_secret(),
        };
        let payload: RefreshPayload = self.client.post(Endpoint::Refresh, &body).await?;

        // Keep the stored pair in step with the new access token
        if let Some(stored) = self.tokens.load().await? {
            if stored.refresh_token().expose_secret() == refresh_token.expose_secret() {
                self.tokens
                    .save(&stored.with_access_token(payload.access_token.clone()))
                    .await?;
            }
        }

        Ok(RefreshedAccessToken {
            access_token: SecretString::new(payload.access_token),
        })
    }

    async fn logout(&self) -> Result<(), RepositoryError> {
        self.client
            .post_unit(Endpoint::Logout, &serde_json::json!({}))
            .await
    }

    async fn get_current_user(&self) -> Result<Option<User>, RepositoryError> {
        if self.tokens.load().await?.is_none() {
            return Ok(None);
        }

        match self
            .client
            .get::<CurrentUserPayload>(Endpoint::CurrentUser, Endpoint::CurrentUser.path())
            .await
        {
            Ok(CurrentUserPayload::Wrapped { user }) | Ok(CurrentUserPayload::Bare(user)) => {
                Ok(Some(user))
            }
            Err(RepositoryError::AuthenticationRequired) => {
                tracing::info!("Stored session is no longer valid");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn store_tokens(&self, tokens: &AuthTokens) -> Result<(), RepositoryError> {
        self.tokens.save(tokens).await
    }

    async fn get_stored_tokens(&self) -> Result<Option<AuthTokens>, RepositoryError> {
        self.tokens.load().await
    }

    async fn clear_tokens(&self) -> Result<(), RepositoryError> {
        self.tokens.clear().await
    }
}
