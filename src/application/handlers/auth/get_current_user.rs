//! GetCurrentUserHandler - Query handler for the signed-in user.

use std::sync::Arc;

use crate::application::errors::SessionError;
use crate::domain::user::User;
use crate::ports::AuthRepository;

#[derive(Debug, Clone)]
pub struct GetCurrentUserResult {
    /// `None` when nobody is signed in.
    pub user: Option<User>,
}

pub struct GetCurrentUserHandler {
    repository: Arc<dyn AuthRepository>,
}

impl GetCurrentUserHandler {
    pub fn new(repository: Arc<dyn AuthRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self) -> Result<GetCurrentUserResult, SessionError> {
        let user = self.repository.get_current_user().await?;
        Ok(GetCurrentUserResult { user })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::MockAuthRepository;
    use crate::ports::{AuthRepository, LoginCredentials};

    #[tokio::test]
    async fn none_without_session() {
        let handler = GetCurrentUserHandler::new(Arc::new(MockAuthRepository::new()));
        assert!(handler.handle().await.unwrap().user.is_none());
    }

    #[tokio::test]
    async fn returns_signed_in_user() {
        let repo = Arc::new(MockAuthRepository::new().with_account(
            "luna@example.com",
            "Moonlight!1",
            "Luna",
            "Rivers",
        ));
        let session = repo
            .login(&LoginCredentials::new("luna@example.com", "Moonlight!1"))
            .await
            .unwrap();
        repo.store_tokens(&session.tokens).await.unwrap();

        let result = GetCurrentUserHandler::new(repo).handle().await.unwrap();
        assert_eq!(result.user.unwrap().initials(), "LR");
    }
}
