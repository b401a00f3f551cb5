//! Mock AI repository for testing.
//!
//! Implements the `AiRepository` port entirely in memory so use cases can be
//! exercised without a backend.
//!
//! # Features
//!
//! - Queued replies per endpoint (consumed in order, default reply after)
//! - Error injection per endpoint and for storage
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let repo = MockAiRepository::new()
//!     .with_chat_reply("Breathe in slowly.")
//!     .with_chat_error(RepositoryError::RateLimited);
//!
//! let first = repo.send_chat_message(&request).await?;   // reply
//! let second = repo.send_chat_message(&request).await;   // Err(RateLimited)
//! ```

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::conversation::Conversation;
use crate::domain::foundation::ConversationId;
use crate::ports::{
    AiRepository, AstrologyReadingRequest, AstrologyReadingResponse, ChatRequest, ChatResponse,
    ConversationHistoryPage, ConversationHistoryRequest, RepositoryError,
    SpiritualGuidanceRequest, SpiritualGuidanceResponse,
};

/// Reply used once the chat queue is empty.
pub const DEFAULT_CHAT_REPLY: &str = "Take a slow breath and notice what you are feeling.";

type Queue<T> = Arc<Mutex<VecDeque<Result<T, RepositoryError>>>>;

/// In-memory `AiRepository` with scripted responses.
#[derive(Debug, Clone, Default)]
pub struct MockAiRepository {
    chat_responses: Queue<ChatResponse>,
    guidance_responses: Queue<SpiritualGuidanceResponse>,
    astrology_responses: Queue<AstrologyReadingResponse>,
    conversations: Arc<Mutex<HashMap<ConversationId, Conversation>>>,
    save_error: Arc<Mutex<Option<RepositoryError>>>,
    load_error: Arc<Mutex<Option<RepositoryError>>>,
    chat_calls: Arc<Mutex<Vec<ChatRequest>>>,
    guidance_calls: Arc<Mutex<Vec<SpiritualGuidanceRequest>>>,
    astrology_calls: Arc<Mutex<Vec<AstrologyReadingRequest>>>,
    save_calls: Arc<Mutex<usize>>,
}

impl MockAiRepository {
    /// Creates an empty mock.
    pub fn new() -> Self {
        Self::default()
    }

    // === Scripting ===

    /// Queues a plain chat reply.
    pub fn with_chat_reply(self, message: impl Into<String>) -> Self {
        self.with_chat_response(ChatResponse {
            message: message.into(),
            ..Default::default()
        })
    }

    pub fn with_chat_response(self, response: ChatResponse) -> Self {
        self.chat_responses.lock().unwrap().push_back(Ok(response));
        self
    }

    pub fn with_chat_error(self, error: RepositoryError) -> Self {
        self.chat_responses.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn with_guidance_response(self, response: SpiritualGuidanceResponse) -> Self {
        self.guidance_responses.lock().unwrap().push_back(Ok(response));
        self
    }

    pub fn with_guidance_error(self, error: RepositoryError) -> Self {
        self.guidance_responses.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn with_astrology_response(self, response: AstrologyReadingResponse) -> Self {
        self.astrology_responses.lock().unwrap().push_back(Ok(response));
        self
    }

    pub fn with_astrology_error(self, error: RepositoryError) -> Self {
        self.astrology_responses.lock().unwrap().push_back(Err(error));
        self
    }

    /// Seeds local storage with a conversation.
    pub fn with_conversation(self, conversation: Conversation) -> Self {
        self.conversations
            .lock()
            .unwrap()
            .insert(conversation.id().clone(), conversation);
        self
    }

    /// Makes every `save_conversation` fail with `error`.
    pub fn with_save_error(self, error: RepositoryError) -> Self {
        *self.save_error.lock().unwrap() = Some(error);
        self
    }

    /// Makes every load (single, list, history) fail with `error`.
    pub fn with_load_error(self, error: RepositoryError) -> Self {
        *self.load_error.lock().unwrap() = Some(error);
        self
    }

    // === Verification ===

    pub fn chat_requests(&self) -> Vec<ChatRequest> {
        self.chat_calls.lock().unwrap().clone()
    }

    pub fn guidance_requests(&self) -> Vec<SpiritualGuidanceRequest> {
        self.guidance_calls.lock().unwrap().clone()
    }

    pub fn astrology_requests(&self) -> Vec<AstrologyReadingRequest> {
        self.astrology_calls.lock().unwrap().clone()
    }

    pub fn save_count(&self) -> usize {
        *self.save_calls.lock().unwrap()
    }

    /// Returns the stored copy of a conversation.
    pub fn stored(&self, id: &ConversationId) -> Option<Conversation> {
        self.conversations.lock().unwrap().get(id).cloned()
    }

    pub fn stored_count(&self) -> usize {
        self.conversations.lock().unwrap().len()
    }

    fn check_load(&self) -> Result<(), RepositoryError> {
        match self.load_error.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AiRepository for MockAiRepository {
    async fn send_chat_message(
        &self,
        request: &ChatRequest,
    ) -> Result<ChatResponse, RepositoryError> {
        self.chat_calls.lock().unwrap().push(request.clone());
        let scripted = self.chat_responses.lock().unwrap().pop_front();
        scripted.unwrap_or_else(|| {
            Ok(ChatResponse {
                message: DEFAULT_CHAT_REPLY.to_string(),
                conversation_id: Some(request.conversation_id.clone()),
                ..Default::default()
            })
        })
    }

    async fn request_spiritual_guidance(
        &self,
        request: &SpiritualGuidanceRequest,
    ) -> Result<SpiritualGuidanceResponse, RepositoryError> {
        self.guidance_calls.lock().unwrap().push(request.clone());
        let scripted = self.guidance_responses.lock().unwrap().pop_front();
        scripted.unwrap_or_else(|| {
            Ok(SpiritualGuidanceResponse {
                guidance: format!("Reflect gently on {}.", request.topic),
                ..Default::default()
            })
        })
    }

    async fn request_astrology_reading(
        &self,
        request: &AstrologyReadingRequest,
    ) -> Result<AstrologyReadingResponse, RepositoryError> {
        self.astrology_calls.lock().unwrap().push(request.clone());
        let scripted = self.astrology_responses.lock().unwrap().pop_front();
        scripted.unwrap_or_else(|| {
            Ok(AstrologyReadingResponse {
                reading: format!("Your {} reading is ready.", request.reading_type.label()),
                ..Default::default()
            })
        })
    }

    async fn get_conversation_history(
        &self,
        request: &ConversationHistoryRequest,
    ) -> Result<ConversationHistoryPage, RepositoryError> {
        self.check_load()?;
        let conversation = self
            .stored(&request.conversation_id)
            .ok_or_else(|| RepositoryError::NotFound("Conversation".to_string()))?;

        let page_size = request.page_size.max(1) as usize;
        let page = request.page.max(1);
        let skip = (page as usize - 1) * page_size;
        let total = conversation.message_count();
        let messages: Vec<_> = conversation
            .messages()
            .iter()
            .skip(skip)
            .take(page_size)
            .cloned()
            .collect();

        Ok(ConversationHistoryPage {
            has_more: skip + messages.len() < total,
            messages,
            page,
            page_size: page_size as u32,
            total: total as u32,
        })
    }

    async fn save_conversation(&self, conversation: &Conversation) -> Result<(), RepositoryError> {
        *self.save_calls.lock().unwrap() += 1;
        if let Some(err) = self.save_error.lock().unwrap().clone() {
            return Err(err);
        }
        self.conversations
            .lock()
            .unwrap()
            .insert(conversation.id().clone(), conversation.clone());
        Ok(())
    }

    async fn load_conversation(
        &self,
        id: &ConversationId,
    ) -> Result<Option<Conversation>, RepositoryError> {
        self.check_load()?;
        Ok(self.stored(id))
    }

    async fn load_conversations(
        &self,
        limit: Option<usize>,
    ) -> Result<Vec<Conversation>, RepositoryError> {
        self.check_load()?;
        let mut all: Vec<Conversation> =
            self.conversations.lock().unwrap().values().cloned().collect();
        all.sort_by(|a, b| b.updated_at().cmp(a.updated_at()));
        if let Some(limit) = limit {
            all.truncate(limit);
        }
        Ok(all)
    }

    async fn delete_conversation(&self, id: &ConversationId) -> Result<(), RepositoryError> {
        self.conversations.lock().unwrap().remove(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::Message;
    use crate::ports::ChatContext;

    fn request() -> ChatRequest {
        ChatRequest {
            message: "Hello".to_string(),
            conversation_id: ConversationId::new("conv-1").unwrap(),
            context: ChatContext::default(),
        }
    }

    #[tokio::test]
    async fn replies_in_queue_order_then_default() {
        let repo = MockAiRepository::new()
            .with_chat_reply("first")
            .with_chat_error(RepositoryError::RateLimited);

        assert_eq!(repo.send_chat_message(&request()).await.unwrap().message, "first");
        assert_eq!(
            repo.send_chat_message(&request()).await.unwrap_err(),
            RepositoryError::RateLimited
        );
        assert_eq!(
            repo.send_chat_message(&request()).await.unwrap().message,
            DEFAULT_CHAT_REPLY
        );
        assert_eq!(repo.chat_requests().len(), 3);
    }

    #[tokio::test]
    async fn history_is_paginated() {
        let mut conversation = Conversation::create_new(None);
        for i in 0..5 {
            let message =
                Message::create_user_message(format!("m{}", i), Some(conversation.id().clone()))
                    .unwrap();
            conversation = conversation.add_message(message).unwrap();
        }
        let id = conversation.id().clone();
        let repo = MockAiRepository::new().with_conversation(conversation);

        let page = repo
            .get_conversation_history(&ConversationHistoryRequest {
                conversation_id: id,
                page: 2,
                page_size: 2,
            })
            .await
            .unwrap();
        assert_eq!(page.total, 5);
        assert_eq!(page.messages.len(), 2);
        assert_eq!(page.messages[0].content(), "m2");
        assert!(page.has_more);
    }

    #[tokio::test]
    async fn save_error_is_returned_and_nothing_is_stored() {
        let repo = MockAiRepository::new().with_save_error(RepositoryError::storage("full"));
        let conversation = Conversation::create_new(None);

        assert!(repo.save_conversation(&conversation).await.is_err());
        assert_eq!(repo.save_count(), 1);
        assert_eq!(repo.stored_count(), 0);
    }
}
