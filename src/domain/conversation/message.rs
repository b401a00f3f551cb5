//! Message entity for conversations.
//!
//! Messages are immutable records of user/assistant exchanges. Construction is
//! the only validation gate: a `Message` value that exists is always valid.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ConversationId, DomainError, ErrorCode, MessageId, Timestamp};

/// Maximum number of characters in a single message.
pub const MAX_MESSAGE_LENGTH: usize = 2000;

/// Role of a message sender in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// User input.
    User,
    /// AI assistant response.
    Assistant,
}

impl Role {
    /// Returns the wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }

    /// Parses a wire name, returning `None` for unknown roles.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "user" => Some(Role::User),
            "assistant" => Some(Role::Assistant),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw input for constructing a [`Message`].
#[derive(Debug, Clone)]
pub struct MessageProps {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub timestamp: Timestamp,
    pub conversation_id: Option<ConversationId>,
    pub spiritual_themes: Vec<String>,
    pub suggested_actions: Vec<String>,
    pub related_topics: Vec<String>,
}

impl MessageProps {
    /// Creates props with empty guidance metadata and no conversation link.
    pub fn new(
        id: impl Into<String>,
        role: Role,
        content: impl Into<String>,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            id: id.into(),
            role,
            content: content.into(),
            timestamp,
            conversation_id: None,
            spiritual_themes: Vec::new(),
            suggested_actions: Vec::new(),
            related_topics: Vec::new(),
        }
    }

    pub fn with_conversation_id(mut self, conversation_id: ConversationId) -> Self {
        self.conversation_id = Some(conversation_id);
        self
    }
}

/// An immutable message within a conversation.
///
/// # Invariants
///
/// - `id` is non-empty
/// - `content` is non-empty after trimming and at most 2000 characters
/// - equality compares ids only
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(into = "MessageRecord", try_from = "MessageRecord")]
pub struct Message {
    id: MessageId,
    role: Role,
    content: String,
    timestamp: Timestamp,
    conversation_id: Option<ConversationId>,
    spiritual_themes: Vec<String>,
    suggested_actions: Vec<String>,
    related_topics: Vec<String>,
}

impl Message {
    /// Creates a message from props, validating id then content.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the id is empty, or the content is empty or
    ///   longer than [`MAX_MESSAGE_LENGTH`] characters
    pub fn new(props: MessageProps) -> Result<Self, DomainError> {
        let id = Self::validate_id(&props.id)?;
        Self::validate_content(&props.content)?;

        Ok(Self {
            id,
            role: props.role,
            content: props.content,
            timestamp: props.timestamp,
            conversation_id: props.conversation_id,
            spiritual_themes: props.spiritual_themes,
            suggested_actions: props.suggested_actions,
            related_topics: props.related_topics,
        })
    }

    /// Creates a user message with a fresh id and the current time.
    pub fn create_user_message(
        content: impl Into<String>,
        conversation_id: Option<ConversationId>,
    ) -> Result<Self, DomainError> {
        let mut props = MessageProps::new(
            MessageId::generate().as_str(),
            Role::User,
            content,
            Timestamp::now(),
        );
        props.conversation_id = conversation_id;
        Self::new(props)
    }

    /// Creates an assistant message carrying the guidance metadata.
    pub fn create_assistant_message(
        content: impl Into<String>,
        conversation_id: Option<ConversationId>,
        spiritual_themes: Vec<String>,
        suggested_actions: Vec<String>,
        related_topics: Vec<String>,
    ) -> Result<Self, DomainError> {
        Self::new(MessageProps {
            id: MessageId::generate().as_str().to_string(),
            role: Role::Assistant,
            content: content.into(),
            timestamp: Timestamp::now(),
            conversation_id,
            spiritual_themes,
            suggested_actions,
            related_topics,
        })
    }

    /// Rebuilds a message from its persisted form.
    ///
    /// Checks run in order: id, content, content length, role, timestamp.
    pub fn from_record(record: MessageRecord) -> Result<Self, DomainError> {
        let id = Self::validate_id(&record.id)?;
        Self::validate_content(&record.content)?;

        let role = Role::parse(&record.role).ok_or_else(|| {
            DomainError::validation("role", "Message role must be either 'user' or 'assistant'")
        })?;

        let timestamp = match record.timestamp.as_deref() {
            None => {
                return Err(DomainError::validation(
                    "timestamp",
                    "Message timestamp is required",
                ))
            }
            Some(raw) => Timestamp::parse(raw).map_err(|_| {
                DomainError::validation("timestamp", "Message timestamp must be a valid date")
            })?,
        };

        let conversation_id = record
            .conversation_id
            .filter(|id| !id.trim().is_empty())
            .map(ConversationId::new)
            .transpose()?;

        Ok(Self {
            id,
            role,
            content: record.content,
            timestamp,
            conversation_id,
            spiritual_themes: record.spiritual_themes,
            suggested_actions: record.suggested_actions,
            related_topics: record.related_topics,
        })
    }

    /// Returns the persisted form of this message.
    pub fn to_record(&self) -> MessageRecord {
        MessageRecord {
            id: self.id.as_str().to_string(),
            role: self.role.as_str().to_string(),
            content: self.content.clone(),
            timestamp: Some(self.timestamp.to_rfc3339()),
            conversation_id: self.conversation_id.as_ref().map(|id| id.as_str().to_string()),
            spiritual_themes: self.spiritual_themes.clone(),
            suggested_actions: self.suggested_actions.clone(),
            related_topics: self.related_topics.clone(),
        }
    }

    /// Serializes to a JSON string.
    pub fn to_json(&self) -> Result<String, DomainError> {
        serde_json::to_string(&self.to_record())
            .map_err(|e| DomainError::new(ErrorCode::SerializationFailed, e.to_string()))
    }

    /// Parses and validates a JSON string produced by [`Message::to_json`].
    pub fn from_json(json: &str) -> Result<Self, DomainError> {
        let record: MessageRecord = serde_json::from_str(json)
            .map_err(|e| DomainError::new(ErrorCode::SerializationFailed, e.to_string()))?;
        Self::from_record(record)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &MessageId {
        &self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn timestamp(&self) -> &Timestamp {
        &self.timestamp
    }

    pub fn conversation_id(&self) -> Option<&ConversationId> {
        self.conversation_id.as_ref()
    }

    pub fn spiritual_themes(&self) -> &[String] {
        &self.spiritual_themes
    }

    pub fn suggested_actions(&self) -> &[String] {
        &self.suggested_actions
    }

    pub fn related_topics(&self) -> &[String] {
        &self.related_topics
    }

    /// Returns true if this message is from the user.
    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }

    /// Returns true if this message is from the assistant.
    pub fn is_assistant(&self) -> bool {
        self.role == Role::Assistant
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn validate_id(id: &str) -> Result<MessageId, DomainError> {
        MessageId::new(id).map_err(|_| DomainError::validation("id", "Message ID cannot be empty"))
    }

    fn validate_content(content: &str) -> Result<(), DomainError> {
        if content.trim().is_empty() {
            return Err(DomainError::validation(
                "content",
                "Message content cannot be empty",
            ));
        }
        if content.chars().count() > MAX_MESSAGE_LENGTH {
            return Err(DomainError::validation(
                "content",
                format!("Message content cannot exceed {} characters", MAX_MESSAGE_LENGTH),
            ));
        }
        Ok(())
    }
}

impl PartialEq for Message {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Message {}

impl From<Message> for MessageRecord {
    fn from(message: Message) -> Self {
        message.to_record()
    }
}

impl TryFrom<MessageRecord> for Message {
    type Error = DomainError;

    fn try_from(record: MessageRecord) -> Result<Self, Self::Error> {
        Message::from_record(record)
    }
}

/// Persisted (JSON) form of a message.
///
/// Every field is lenient so that validation, not deserialization, decides
/// which rule a malformed record breaks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    #[serde(default)]
    pub spiritual_themes: Vec<String>,
    #[serde(default)]
    pub suggested_actions: Vec<String>,
    #[serde(default)]
    pub related_topics: Vec<String>,
}
