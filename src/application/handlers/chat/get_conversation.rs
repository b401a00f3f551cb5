//! GetConversationHandler - Query handler for one stored conversation.

use std::sync::Arc;

use crate::application::errors::ConversationQueryError;
use crate::domain::conversation::Conversation;
use crate::domain::foundation::ConversationId;
use crate::ports::AiRepository;

#[derive(Debug, Clone)]
pub struct GetConversationQuery {
    pub conversation_id: ConversationId,
}

#[derive(Debug, Clone)]
pub struct GetConversationResult {
    pub conversation: Conversation,
}

/// Handler for retrieving a stored conversation by id.
pub struct GetConversationHandler {
    repository: Arc<dyn AiRepository>,
}

impl GetConversationHandler {
    pub fn new(repository: Arc<dyn AiRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: GetConversationQuery,
    ) -> Result<GetConversationResult, ConversationQueryError> {
        let conversation = self
            .repository
            .load_conversation(&query.conversation_id)
            .await?
            .ok_or(ConversationQueryError::NotFound)?;

        Ok(GetConversationResult { conversation })
    }
}
