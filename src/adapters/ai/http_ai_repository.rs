//! Backend-backed `AiRepository`.
//!
//! Chat, guidance, astrology and history go to the Spirit Guide API.
//! Conversations are persisted locally so they survive restarts without a
//! network round trip.

use std::sync::Arc;

use async_trait::async_trait;

use crate::adapters::http::{ApiClient, Endpoint};
use crate::domain::conversation::Conversation;
use crate::domain::foundation::ConversationId;
use crate::ports::{
    AiRepository, AstrologyReadingRequest, AstrologyReadingResponse, ChatRequest, ChatResponse,
    ConversationHistoryPage, ConversationHistoryRequest, RepositoryError,
    SpiritualGuidanceRequest, SpiritualGuidanceResponse,
};

use super::LocalConversationStore;

pub struct HttpAiRepository {
    client: Arc<ApiClient>,
    conversations: LocalConversationStore,
}

impl HttpAiRepository {
    pub fn new(client: Arc<ApiClient>, conversations: LocalConversationStore) -> Self {
        Self {
            client,
            conversations,
        }
    }
}

/// Conversation ids are opaque, so the id is escaped as one path segment.
fn history_path(request: &ConversationHistoryRequest) -> String {
    format!(
        "{}/{}/messages",
        Endpoint::ConversationHistory.path(),
        urlencoding::encode(request.conversation_id.as_str())
    )
}

fn history_query(request: &ConversationHistoryRequest) -> [(&'static str, u32); 2] {
    [("page", request.page.max(1)), ("pageSize", request.page_size)]
}

#[async_trait]
impl AiRepository for HttpAiRepository {
    async fn send_chat_message(&self, request: &ChatRequest) -> Result<ChatResponse, RepositoryError> {
        tracing::debug!(conversation_id = %request.conversation_id, "Sending chat message");
        self.client.post(Endpoint::Chat, request).await
    }

    async fn request_spiritual_guidance(
        &self,
        request: &SpiritualGuidanceRequest,
    ) -> Result<SpiritualGuidanceResponse, RepositoryError> {
        self.client.post(Endpoint::Guidance, request).await
    }

    async fn request_astrology_reading(
        &self,
        request: &AstrologyReadingRequest,
    ) -> Result<AstrologyReadingResponse, RepositoryError> {
        tracing::debug!(reading_type = %request.reading_type, "Requesting astrology reading");
        self.client.post(Endpoint::Astrology, request).await
    }

    async fn get_conversation_history(
        &self,
        request: &ConversationHistoryRequest,
    ) -> Result<ConversationHistoryPage, RepositoryError> {
        self.client
            .get_with_query(
                Endpoint::ConversationHistory,
                &history_path(request),
                &history_query(request),
            )
            .await
    }

    async fn save_conversation(&self, conversation: &Conversation) -> Result<(), RepositoryError> {
        self.conversations.save(conversation).await
    }

    async fn load_conversation(
        &self,
        id: &ConversationId,
    ) -> Result<Option<Conversation>, RepositoryError> {
        self.conversations.load(id).await
    }

    async fn load_conversations(
        &self,
        limit: Option<usize>,
    ) -> Result<Vec<Conversation>, RepositoryError> {
        self.conversations.list(limit).await
    }

    async fn delete_conversation(&self, id: &ConversationId) -> Result<(), RepositoryError> {
        self.conversations.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::TokenStore;
    use crate::adapters::http::ApiClientConfig;
    use crate::adapters::storage::InMemoryKeyValueStore;
    use crate::domain::conversation::Message;

    fn repository() -> HttpAiRepository {
        let kv = Arc::new(InMemoryKeyValueStore::new());
        let tokens = Arc::new(TokenStore::new(kv.clone()));
        let client = ApiClient::new(ApiClientConfig::new("http://127.0.0.1:9"), tokens).unwrap();
        HttpAiRepository::new(Arc::new(client), LocalConversationStore::new(kv))
    }

    mod history {
        use super::*;

        #[test]
        fn path_names_the_conversation() {
            let request = ConversationHistoryRequest::first_page(ConversationId::new("c-1").unwrap(), 20);
            assert_eq!(history_path(&request), "/ai/conversations/c-1/messages");
            assert_eq!(history_query(&request), [("page", 1), ("pageSize", 20)]);
        }

        #[test]
        fn reserved_characters_stay_inside_the_segment() {
            let request = ConversationHistoryRequest::first_page(ConversationId::new("a/b?x").unwrap(), 20);
            assert_eq!(history_path(&request), "/ai/conversations/a%2Fb%3Fx/messages");
        }
    }

    #[tokio::test]
    async fn conversations_persist_locally() {
        let repo = repository();
        let first = Message::create_user_message("Where do I begin?", None).unwrap();
        let conversation = Conversation::create_with_first_message(first, None);

        repo.save_conversation(&conversation).await.unwrap();
        assert_eq!(
            repo.load_conversation(conversation.id()).await.unwrap(),
            Some(conversation.clone())
        );
        assert_eq!(repo.load_conversations(None).await.unwrap().len(), 1);

        repo.delete_conversation(conversation.id()).await.unwrap();
        assert!(repo.load_conversation(conversation.id()).await.unwrap().is_none());
    }
}
