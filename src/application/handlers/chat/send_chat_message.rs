//! SendChatMessage command handler.
//!
//! Appends the seeker's message to a conversation, asks the AI backend for a
//! reply, appends the reply and persists the result.

use std::sync::Arc;

use crate::application::errors::{ChatError, MESSAGE_TOO_LONG};
use crate::domain::conversation::{Conversation, Message, MAX_MESSAGE_LENGTH};
use crate::domain::guidance::ExperienceLevel;
use crate::ports::{AiRepository, ChatContext, ChatRequest};

/// Optional seeker profile sent along with a chat message.
#[derive(Debug, Clone, Default)]
pub struct ChatUserContext {
    pub spiritual_interests: Vec<String>,
    /// Raw level as entered; validated against [`ExperienceLevel`].
    pub experience_level: Option<String>,
    pub preferred_practices: Vec<String>,
}

/// Command to send a chat message.
#[derive(Debug, Clone, Default)]
pub struct SendChatMessageCommand {
    pub message: String,
    /// Conversation to continue. A new one is started when absent.
    pub conversation: Option<Conversation>,
    pub user_context: Option<ChatUserContext>,
    pub location: Option<String>,
    pub time_of_day: Option<String>,
}

impl SendChatMessageCommand {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn in_conversation(mut self, conversation: Conversation) -> Self {
        self.conversation = Some(conversation);
        self
    }

    pub fn with_user_context(mut self, context: ChatUserContext) -> Self {
        self.user_context = Some(context);
        self
    }
}

/// Result of a successful exchange.
#[derive(Debug, Clone)]
pub struct SendChatMessageResult {
    /// Conversation with both the user message and the reply appended.
    pub updated_conversation: Conversation,
    pub assistant_message: Message,
}

/// Handler for chat messages.
///
/// The AI call and the save are two awaits. If the future is dropped between
/// them the reply is lost and the conversation stays unsaved.
pub struct SendChatMessageHandler {
    repository: Arc<dyn AiRepository>,
}

impl SendChatMessageHandler {
    pub fn new(repository: Arc<dyn AiRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: SendChatMessageCommand,
    ) -> Result<SendChatMessageResult, ChatError> {
        let experience_level = Self::validate(&cmd).inspect_err(|e| {
            tracing::debug!("Rejected chat message: {}", e);
        })?;

        // 1. Append the user message
        let conversation_id = cmd.conversation.as_ref().map(|c| c.id().clone());
        let user_message = Message::create_user_message(cmd.message.as_str(), conversation_id)?;
        let conversation = match &cmd.conversation {
            Some(existing) => existing.add_message(user_message)?,
            None => Conversation::create_with_first_message(user_message, None),
        };

        // 2. Ask the backend
        let context = cmd.user_context.unwrap_or_default();
        let request = ChatRequest {
            message: cmd.message,
            conversation_id: conversation.id().clone(),
            context: ChatContext {
                spiritual_interests: context.spiritual_interests,
                experience_level,
                preferred_practices: context.preferred_practices,
                location: cmd.location,
                time_of_day: cmd.time_of_day,
            },
        };
        let response = self
            .repository
            .send_chat_message(&request)
            .await
            .inspect_err(|e| tracing::warn!("Chat request failed: {}", e))?;

        // 3. Append the reply
        let assistant_message = Message::create_assistant_message(
            response.message,
            Some(conversation.id().clone()),
            response.spiritual_themes,
            response.suggested_actions,
            response.related_topics,
        )?;
        let updated_conversation = conversation.add_message(assistant_message.clone())?;

        // 4. Persist; a failure here is reported even though the reply exists
        self.repository
            .save_conversation(&updated_conversation)
            .await
            .inspect_err(|e| tracing::warn!("Failed to save conversation: {}", e))?;

        tracing::debug!(
            conversation_id = %updated_conversation.id(),
            messages = updated_conversation.message_count(),
            "Chat exchange completed"
        );

        Ok(SendChatMessageResult {
            updated_conversation,
            assistant_message,
        })
    }

    fn validate(cmd: &SendChatMessageCommand) -> Result<Option<ExperienceLevel>, ChatError> {
        if cmd.message.trim().is_empty() {
            return Err(ChatError::Validation("Message cannot be empty".to_string()));
        }
        if cmd.message.chars().count() > MAX_MESSAGE_LENGTH {
            return Err(ChatError::Validation(MESSAGE_TOO_LONG.to_string()));
        }

        match cmd
            .user_context
            .as_ref()
            .and_then(|c| c.experience_level.as_deref())
        {
            None => Ok(None),
            Some(raw) => ExperienceLevel::parse(raw.trim()).map(Some).ok_or_else(|| {
                ChatError::Validation(
                    "Invalid experience level. Must be beginner, intermediate, or advanced."
                        .to_string(),
                )
            }),
        }
    }
}
