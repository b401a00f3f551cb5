//! LoadConversationsHandler - Query handler for listing stored conversations.

use std::sync::Arc;

use crate::application::errors::ConversationQueryError;
use crate::domain::conversation::Conversation;
use crate::ports::AiRepository;

/// Largest page a caller may ask for.
pub const MAX_CONVERSATION_LIMIT: i64 = 100;

/// Query for stored conversations, most recently updated first.
#[derive(Debug, Clone, Default)]
pub struct LoadConversationsQuery {
    /// Maximum number to return; all when absent.
    pub limit: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct LoadConversationsResult {
    pub conversations: Vec<Conversation>,
}

/// Handler for listing stored conversations.
pub struct LoadConversationsHandler {
    repository: Arc<dyn AiRepository>,
}

impl LoadConversationsHandler {
    pub fn new(repository: Arc<dyn AiRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: LoadConversationsQuery,
    ) -> Result<LoadConversationsResult, ConversationQueryError> {
        let limit = match query.limit {
            None => None,
            Some(n) if n <= 0 => {
                return Err(ConversationQueryError::Validation(
                    "Limit must be a positive integer".to_string(),
                ))
            }
            Some(n) if n > MAX_CONVERSATION_LIMIT => {
                return Err(ConversationQueryError::Validation(format!(
                    "Limit cannot exceed {} conversations",
                    MAX_CONVERSATION_LIMIT
                )))
            }
            Some(n) => Some(n as usize),
        };

        let conversations = self
            .repository
            .load_conversations(limit)
            .await
            .inspect_err(|e| tracing::warn!("Failed to load conversations: {}", e))?;

        Ok(LoadConversationsResult { conversations })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAiRepository;
    use crate::ports::RepositoryError;

    fn handler(repo: MockAiRepository) -> LoadConversationsHandler {
        LoadConversationsHandler::new(Arc::new(repo))
    }

    fn query(limit: i64) -> LoadConversationsQuery {
        LoadConversationsQuery { limit: Some(limit) }
    }

    #[tokio::test]
    async fn rejects_zero_and_negative_limits() {
        for limit in [0, -5] {
            let err = handler(MockAiRepository::new())
                .handle(query(limit))
                .await
                .unwrap_err();
            assert_eq!(err.to_string(), "Limit must be a positive integer");
        }
    }

    #[tokio::test]
    async fn rejects_limits_over_100() {
        let err = handler(MockAiRepository::new())
            .handle(query(101))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Limit cannot exceed 100 conversations");
    }

    #[tokio::test]
    async fn empty_storage_yields_empty_list() {
        let result = handler(MockAiRepository::new())
            .handle(query(10))
            .await
            .unwrap();
        assert!(result.conversations.is_empty());
    }

    #[tokio::test]
    async fn applies_limit() {
        let repo = MockAiRepository::new()
            .with_conversation(Conversation::create_new(None))
            .with_conversation(Conversation::create_new(None))
            .with_conversation(Conversation::create_new(None));
        let result = handler(repo).handle(query(2)).await.unwrap();
        assert_eq!(result.conversations.len(), 2);
    }

    #[tokio::test]
    async fn repeated_loads_are_equal() {
        let repo = MockAiRepository::new()
            .with_conversation(Conversation::create_new(None))
            .with_conversation(Conversation::create_new(None));
        let handler = handler(repo);

        let first = handler.handle(LoadConversationsQuery::default()).await.unwrap();
        let second = handler.handle(LoadConversationsQuery::default()).await.unwrap();
        assert_eq!(first.conversations, second.conversations);
    }

    #[tokio::test]
    async fn surfaces_raw_repository_message() {
        let repo = MockAiRepository::new().with_load_error(RepositoryError::storage("corrupt index"));
        let err = handler(repo)
            .handle(LoadConversationsQuery::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Storage error: corrupt index");
    }
}
