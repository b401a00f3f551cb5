//! DeleteConversationHandler - Command handler for removing a stored conversation.

use std::sync::Arc;

use crate::application::errors::ConversationQueryError;
use crate::domain::foundation::ConversationId;
use crate::ports::AiRepository;

#[derive(Debug, Clone)]
pub struct DeleteConversationCommand {
    pub conversation_id: ConversationId,
}

/// Handler for deleting a conversation. Deleting an unknown id succeeds.
pub struct DeleteConversationHandler {
    repository: Arc<dyn AiRepository>,
}

impl DeleteConversationHandler {
    pub fn new(repository: Arc<dyn AiRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: DeleteConversationCommand) -> Result<(), ConversationQueryError> {
        self.repository
            .delete_conversation(&cmd.conversation_id)
            .await
            .inspect_err(|e| tracing::warn!("Failed to delete conversation: {}", e))?;

        tracing::info!(conversation_id = %cmd.conversation_id, "Conversation deleted");
        Ok(())
    }
}
