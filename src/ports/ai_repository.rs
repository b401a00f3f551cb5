//! AI Repository Port - chat, guidance, astrology and conversation storage.
//!
//! The use-case layer talks to the Spirit Guide backend and to local
//! conversation storage only through this trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::RepositoryError;
use crate::domain::conversation::{Conversation, Message};
use crate::domain::foundation::{ConversationId, Timestamp};
use crate::domain::guidance::{BirthInfo, ExperienceLevel, ReadingType};

// ─────────────────────────────────────────────────────────────────────────────
// Chat
// ─────────────────────────────────────────────────────────────────────────────

/// Seeker context forwarded with a chat message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatContext {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub spiritual_interests: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience_level: Option<ExperienceLevel>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub preferred_practices: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_of_day: Option<String>,
}

/// Outbound chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    pub conversation_id: ConversationId,
    pub context: ChatContext,
}

/// Assistant reply to a chat message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub message: String,
    #[serde(default)]
    pub conversation_id: Option<ConversationId>,
    #[serde(default)]
    pub spiritual_themes: Vec<String>,
    #[serde(default)]
    pub suggested_actions: Vec<String>,
    #[serde(default)]
    pub related_topics: Vec<String>,
    #[serde(default)]
    pub timestamp: Option<Timestamp>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Spiritual guidance
// ─────────────────────────────────────────────────────────────────────────────

/// Validated, trimmed seeker profile for a guidance request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuidanceContext {
    pub experience_level: ExperienceLevel,
    pub spiritual_goals: Vec<String>,
    pub current_challenges: Vec<String>,
    pub preferred_practices: Vec<String>,
    pub previous_experiences: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_available: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpiritualGuidanceRequest {
    pub topic: String,
    pub user_context: GuidanceContext,
}

/// Guidance payload as returned by the backend.
///
/// Fields the client does not model are kept in `extra` so the payload
/// reaches the caller unmodified.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpiritualGuidanceResponse {
    pub guidance: String,
    #[serde(default)]
    pub practices: Vec<String>,
    #[serde(default)]
    pub affirmations: Vec<String>,
    #[serde(default)]
    pub next_steps: Vec<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Astrology
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AstrologyReadingRequest {
    pub reading_type: ReadingType,
    pub birth_info: BirthInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner_birth_info: Option<BirthInfo>,
}

/// Astrology reading as returned by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AstrologyReadingResponse {
    pub reading: String,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Conversation history
// ─────────────────────────────────────────────────────────────────────────────

/// Page request for server-side conversation history (pages start at 1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationHistoryRequest {
    pub conversation_id: ConversationId,
    pub page: u32,
    pub page_size: u32,
}

impl ConversationHistoryRequest {
    pub fn first_page(conversation_id: ConversationId, page_size: u32) -> Self {
        Self {
            conversation_id,
            page: 1,
            page_size,
        }
    }
}

/// One page of conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationHistoryPage {
    pub messages: Vec<Message>,
    pub page: u32,
    pub page_size: u32,
    pub total: u32,
    #[serde(default)]
    pub has_more: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// Port
// ─────────────────────────────────────────────────────────────────────────────

/// Port for the AI backend and local conversation persistence.
#[async_trait]
pub trait AiRepository: Send + Sync {
    /// Sends a chat message and returns the assistant reply.
    async fn send_chat_message(&self, request: &ChatRequest)
        -> Result<ChatResponse, RepositoryError>;

    /// Requests structured spiritual guidance on a topic.
    async fn request_spiritual_guidance(
        &self,
        request: &SpiritualGuidanceRequest,
    ) -> Result<SpiritualGuidanceResponse, RepositoryError>;

    /// Requests an astrology reading.
    async fn request_astrology_reading(
        &self,
        request: &AstrologyReadingRequest,
    ) -> Result<AstrologyReadingResponse, RepositoryError>;

    /// Fetches one page of server-side history.
    async fn get_conversation_history(
        &self,
        request: &ConversationHistoryRequest,
    ) -> Result<ConversationHistoryPage, RepositoryError>;

    /// Persists a conversation, replacing any earlier version with the same id.
    async fn save_conversation(&self, conversation: &Conversation) -> Result<(), RepositoryError>;

    /// Loads one conversation; `None` when nothing is stored under `id`.
    async fn load_conversation(
        &self,
        id: &ConversationId,
    ) -> Result<Option<Conversation>, RepositoryError>;

    /// Lists stored conversations, most recently updated first.
    async fn load_conversations(
        &self,
        limit: Option<usize>,
    ) -> Result<Vec<Conversation>, RepositoryError>;

    /// Removes a conversation. Removing an unknown id is not an error.
    async fn delete_conversation(&self, id: &ConversationId) -> Result<(), RepositoryError>;
}
