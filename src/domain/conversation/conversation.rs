//! Conversation entity - an ordered, immutable exchange of messages.
//!
//! Every "mutation" returns a new `Conversation`; the receiver is left as is.

use serde::{Deserialize, Serialize};

use super::message::{Message, MessageRecord, Role};
use crate::domain::foundation::{
    ConversationId, DomainError, ErrorCode, Timestamp, UserId,
};

/// Raw input for constructing a [`Conversation`].
#[derive(Debug, Clone)]
pub struct ConversationProps {
    pub id: String,
    pub messages: Vec<Message>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub summary: Option<String>,
    pub user_id: Option<UserId>,
}

/// Conversation entity - owns its messages in chronological order.
///
/// # Invariants
///
/// - `id` is non-empty
/// - `updated_at` is never before `created_at`
/// - messages appended through [`Conversation::add_message`] either carry this
///   conversation's id or none at all
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "ConversationRecord", try_from = "ConversationRecord")]
pub struct Conversation {
    id: ConversationId,
    messages: Vec<Message>,
    created_at: Timestamp,
    updated_at: Timestamp,
    summary: Option<String>,
    user_id: Option<UserId>,
}

impl Conversation {
    /// Creates a conversation from props.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the id is empty or `updated_at < created_at`
    pub fn new(props: ConversationProps) -> Result<Self, DomainError> {
        let id = Self::validate_id(&props.id)?;
        Self::validate_ordering(&props.created_at, &props.updated_at)?;

        Ok(Self {
            id,
            messages: props.messages,
            created_at: props.created_at,
            updated_at: props.updated_at,
            summary: props.summary,
            user_id: props.user_id,
        })
    }

    /// Creates an empty conversation with a fresh id.
    pub fn create_new(user_id: Option<UserId>) -> Self {
        let now = Timestamp::now();
        Self {
            id: ConversationId::generate(),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
            summary: None,
            user_id,
        }
    }

    /// Creates a conversation seeded with its first message.
    ///
    /// If the message already names a conversation, that id is adopted.
    pub fn create_with_first_message(message: Message, user_id: Option<UserId>) -> Self {
        let now = Timestamp::now();
        let id = message
            .conversation_id()
            .cloned()
            .unwrap_or_else(ConversationId::generate);
        Self {
            id,
            messages: vec![message],
            created_at: now,
            updated_at: now,
            summary: None,
            user_id,
        }
    }

    /// Rebuilds a conversation from its persisted form.
    ///
    /// Checks run in order: id, messages, created_at, updated_at, ordering,
    /// then each message.
    pub fn from_record(record: ConversationRecord) -> Result<Self, DomainError> {
        let id = Self::validate_id(&record.id)?;

        let message_records = record.messages.ok_or_else(|| {
            DomainError::validation("messages", "Conversation messages must be an array")
        })?;

        let created_at = Self::parse_date(record.created_at.as_deref(), "createdAt")?;
        let updated_at = Self::parse_date(record.updated_at.as_deref(), "updatedAt")?;
        Self::validate_ordering(&created_at, &updated_at)?;

        let messages = message_records
            .into_iter()
            .map(Message::from_record)
            .collect::<Result<Vec<_>, _>>()?;

        let user_id = record
            .user_id
            .filter(|id| !id.trim().is_empty())
            .map(UserId::new)
            .transpose()?;

        Ok(Self {
            id,
            messages,
            created_at,
            updated_at,
            summary: record.summary,
            user_id,
        })
    }

    /// Returns the persisted form of this conversation.
    pub fn to_record(&self) -> ConversationRecord {
        ConversationRecord {
            id: self.id.as_str().to_string(),
            messages: Some(self.messages.iter().map(Message::to_record).collect()),
            created_at: Some(self.created_at.to_rfc3339()),
            updated_at: Some(self.updated_at.to_rfc3339()),
            summary: self.summary.clone(),
            user_id: self.user_id.as_ref().map(|id| id.as_str().to_string()),
        }
    }

    /// Serializes to a JSON string.
    pub fn to_json(&self) -> Result<String, DomainError> {
        serde_json::to_string(&self.to_record())
            .map_err(|e| DomainError::new(ErrorCode::SerializationFailed, e.to_string()))
    }

    /// Parses and validates a JSON string produced by [`Conversation::to_json`].
    pub fn from_json(json: &str) -> Result<Self, DomainError> {
        let record: ConversationRecord = serde_json::from_str(json)
            .map_err(|e| DomainError::new(ErrorCode::SerializationFailed, e.to_string()))?;
        Self::from_record(record)
    }

    // === Accessors ===

    pub fn id(&self) -> &ConversationId {
        &self.id
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Consumes the conversation, returning its messages.
    pub fn into_messages(self) -> Vec<Message> {
        self.messages
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn user_id(&self) -> Option<&UserId> {
        self.user_id.as_ref()
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn user_messages(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(|m| m.role() == Role::User)
    }

    pub fn assistant_messages(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(|m| m.role() == Role::Assistant)
    }

    /// Returns the opening user message, shortened to `max_chars`.
    pub fn preview(&self, max_chars: usize) -> Option<String> {
        let first = self.user_messages().next()?;
        let content = first.content();
        if content.chars().count() <= max_chars {
            return Some(content.to_string());
        }
        let mut short: String = content.chars().take(max_chars).collect();
        short.push('…');
        Some(short)
    }

    // === Transitions ===

    /// Returns a new conversation with `message` appended.
    ///
    /// # Errors
    ///
    /// - `ConversationMismatch` if the message names another conversation
    pub fn add_message(&self, message: Message) -> Result<Conversation, DomainError> {
        if let Some(owner) = message.conversation_id() {
            if owner != &self.id {
                return Err(DomainError::new(
                    ErrorCode::ConversationMismatch,
                    "Message belongs to a different conversation",
                )
                .with_detail("conversation_id", self.id.as_str())
                .with_detail("message_conversation_id", owner.as_str()));
            }
        }

        let mut messages = self.messages.clone();
        messages.push(message);

        Ok(Self {
            messages,
            updated_at: self.touched(),
            ..self.clone()
        })
    }

    /// Returns a new conversation with the given summary.
    ///
    /// A blank summary clears it.
    pub fn update_summary(&self, summary: impl Into<String>) -> Conversation {
        let summary = summary.into();
        let summary = if summary.trim().is_empty() {
            None
        } else {
            Some(summary)
        };

        Self {
            summary,
            updated_at: self.touched(),
            ..self.clone()
        }
    }

    // === Private helpers ===

    fn touched(&self) -> Timestamp {
        Timestamp::now().max(self.created_at)
    }

    fn validate_id(id: &str) -> Result<ConversationId, DomainError> {
        ConversationId::new(id)
            .map_err(|_| DomainError::validation("id", "Conversation ID cannot be empty"))
    }

    fn validate_ordering(created_at: &Timestamp, updated_at: &Timestamp) -> Result<(), DomainError> {
        if updated_at.is_before(created_at) {
            return Err(DomainError::validation(
                "updatedAt",
                "Conversation updatedAt cannot be before createdAt",
            ));
        }
        Ok(())
    }

    fn parse_date(raw: Option<&str>, field: &str) -> Result<Timestamp, DomainError> {
        raw.and_then(|value| Timestamp::parse(value).ok())
            .ok_or_else(|| {
                DomainError::validation(
                    field,
                    format!("Conversation {} must be a valid date", field),
                )
            })
    }
}

impl From<Conversation> for ConversationRecord {
    fn from(conversation: Conversation) -> Self {
        conversation.to_record()
    }
}

impl TryFrom<ConversationRecord> for Conversation {
    type Error = DomainError;

    fn try_from(record: ConversationRecord) -> Result<Self, Self::Error> {
        Conversation::from_record(record)
    }
}

/// Persisted (JSON) form of a conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub messages: Option<Vec<MessageRecord>>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}
