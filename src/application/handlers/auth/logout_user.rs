//! LogoutUser command handler.

use std::sync::Arc;

use crate::application::errors::SessionError;
use crate::ports::AuthRepository;

/// Handler for signing out.
///
/// The server-side logout is best effort; local tokens are cleared even when
/// it fails.
pub struct LogoutUserHandler {
    repository: Arc<dyn AuthRepository>,
}

impl LogoutUserHandler {
    pub fn new(repository: Arc<dyn AuthRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self) -> Result<(), SessionError> {
        if let Err(e) = self.repository.logout().await {
            tracing::warn!("Server logout failed, clearing local session anyway: {}", e);
        }

        self.repository
            .clear_tokens()
            .await
            .inspect_err(|e| tracing::error!("Failed to clear tokens: {}", e))?;

        tracing::info!("User logged out");
        Ok(())
    }
}
