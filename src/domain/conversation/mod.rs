//! Conversation domain module.
//!
//! Immutable chat messages and the conversations that own them, together with
//! their persisted (JSON record) forms.

mod conversation;
mod message;

pub use conversation::{Conversation, ConversationProps, ConversationRecord};
pub use message::{Message, MessageProps, MessageRecord, Role, MAX_MESSAGE_LENGTH};
