//! JSON client for the Spirit Guide backend.
//!
//! Every non-success response is classified here, once, into a
//! [`RepositoryError`]. The status code decides the variant; the response body
//! only supplies the message text.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::adapters::auth::TokenStore;
use crate::ports::RepositoryError;

/// Backend operation. Selects the path and any status overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Login,
    Register,
    Refresh,
    Logout,
    CurrentUser,
    Chat,
    Guidance,
    Astrology,
    ConversationHistory,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Login => "/auth/login",
            Endpoint::Register => "/auth/register",
            Endpoint::Refresh => "/auth/refresh",
            Endpoint::Logout => "/auth/logout",
            Endpoint::CurrentUser => "/auth/me",
            Endpoint::Chat => "/ai/chat",
            Endpoint::Guidance => "/ai/guidance",
            Endpoint::Astrology => "/ai/astrology",
            Endpoint::ConversationHistory => "/ai/conversations",
        }
    }

    /// Whether the request carries the stored access token.
    fn is_authenticated(&self) -> bool {
        !matches!(self, Endpoint::Login | Endpoint::Register | Endpoint::Refresh)
    }

    /// Maps a failed response to the repository error for this endpoint.
    pub fn classify(&self, status: u16, message: String) -> RepositoryError {
        match (self, status) {
            (Endpoint::Login, 401) => RepositoryError::InvalidCredentials,
            (Endpoint::Astrology, 400 | 422) => RepositoryError::InvalidBirthData(message),
            (_, 400) => RepositoryError::InvalidRequest(message),
            (_, 401) => RepositoryError::AuthenticationRequired,
            (_, 403) => RepositoryError::AccessDenied,
            (_, 404) => RepositoryError::NotFound(if message.is_empty() {
                self.path().to_string()
            } else {
                message
            }),
            (_, 409) => RepositoryError::UserAlreadyExists,
            (_, 413) => RepositoryError::MessageTooLong,
            (_, 422) => RepositoryError::ContentPolicyRefusal(message),
            (_, 429) => RepositoryError::RateLimited,
            (_, 500..=599) => RepositoryError::ServiceUnavailable,
            _ => RepositoryError::unexpected(format!("Unexpected status {}: {}", status, message)),
        }
    }
}

/// Pulls a human message out of an error body.
///
/// Accepts `{"message": ...}`, `{"error": "..."}` and
/// `{"error": {"message": ...}}`; anything else is returned trimmed as is.
pub fn extract_error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        let found = value
            .get("message")
            .and_then(|m| m.as_str())
            .or_else(|| value.get("error").and_then(|e| e.as_str()))
            .or_else(|| {
                value
                    .get("error")
                    .and_then(|e| e.get("message"))
                    .and_then(|m| m.as_str())
            });
        if let Some(message) = found {
            return message.trim().to_string();
        }
    }
    body.trim().to_string()
}

/// HTTP client configuration.
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl ApiClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// JSON-over-HTTP client with bearer authentication.
pub struct ApiClient {
    client: Client,
    base_url: String,
    tokens: Arc<TokenStore>,
}

impl ApiClient {
    /// Builds the client.
    ///
    /// # Errors
    ///
    /// `Unexpected` if the TLS backend cannot be initialised.
    pub fn new(config: ApiClientConfig, tokens: Arc<TokenStore>) -> Result<Self, RepositoryError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RepositoryError::unexpected(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            tokens,
        })
    }

    /// POSTs `body` and decodes the JSON reply.
    pub async fn post<B, R>(&self, endpoint: Endpoint, body: &B) -> Result<R, RepositoryError>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let request = self
            .request(Method::POST, endpoint, endpoint.path())
            .await?
            .json(body);
        let response = self.send(endpoint, request).await?;
        Self::decode(endpoint, response).await
    }

    /// POSTs `body` and ignores any reply body.
    pub async fn post_unit<B>(&self, endpoint: Endpoint, body: &B) -> Result<(), RepositoryError>
    where
        B: Serialize + ?Sized + Sync,
    {
        let request = self
            .request(Method::POST, endpoint, endpoint.path())
            .await?
            .json(body);
        self.send(endpoint, request).await?;
        Ok(())
    }

    /// GETs `path` (relative to the base URL) and decodes the JSON reply.
    pub async fn get<R>(&self, endpoint: Endpoint, path: &str) -> Result<R, RepositoryError>
    where
        R: DeserializeOwned,
    {
        let request = self.request(Method::GET, endpoint, path).await?;
        let response = self.send(endpoint, request).await?;
        Self::decode(endpoint, response).await
    }

    /// GETs `path` with `query` appended as URL parameters.
    pub async fn get_with_query<R, Q>(
        &self,
        endpoint: Endpoint,
        path: &str,
        query: &Q,
    ) -> Result<R, RepositoryError>
    where
        R: DeserializeOwned,
        Q: Serialize + ?Sized + Sync,
    {
        let request = self.request(Method::GET, endpoint, path).await?.query(query);
        let response = self.send(endpoint, request).await?;
        Self::decode(endpoint, response).await
    }

    async fn request(
        &self,
        method: Method,
        endpoint: Endpoint,
        path: &str,
    ) -> Result<RequestBuilder, RepositoryError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self
            .client
            .request(method, url)
            .header("Accept", "application/json");

        if endpoint.is_authenticated() {
            if let Some(tokens) = self.tokens.load().await? {
                request = request.bearer_auth(tokens.access_token().expose_secret());
            }
        }
        Ok(request)
    }

    async fn send(&self, endpoint: Endpoint, request: RequestBuilder) -> Result<Response, RepositoryError> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                RepositoryError::network("Request timed out")
            } else if e.is_connect() {
                RepositoryError::network(format!("Connection failed: {}", e))
            } else {
                RepositoryError::network(e.to_string())
            }
        })?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(endpoint = endpoint.path(), status = status.as_u16(), "Backend call succeeded");
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let error = endpoint.classify(status.as_u16(), extract_error_message(&body));
        tracing::warn!(endpoint = endpoint.path(), status = status.as_u16(), "Backend call failed: {}", error);
        Err(error)
    }

    async fn decode<R: DeserializeOwned>(endpoint: Endpoint, response: Response) -> Result<R, RepositoryError> {
        response.json::<R>().await.map_err(|e| {
            RepositoryError::unexpected(format!(
                "Malformed response from {}: {}",
                endpoint.path(),
                e
            ))
        })
    }
}
