//! Chat handlers.
//!
//! ## Commands
//! - Sending a chat message and persisting the exchange
//! - Deleting a stored conversation
//!
//! ## Queries
//! - Listing stored conversations
//! - Fetching one stored conversation

mod delete_conversation;
mod get_conversation;
mod load_conversations;
mod send_chat_message;

// Commands
pub use delete_conversation::{DeleteConversationCommand, DeleteConversationHandler};
pub use send_chat_message::{
    ChatUserContext, SendChatMessageCommand, SendChatMessageHandler, SendChatMessageResult,
};

// Queries
pub use get_conversation::{GetConversationHandler, GetConversationQuery, GetConversationResult};
pub use load_conversations::{
    LoadConversationsHandler, LoadConversationsQuery, LoadConversationsResult,
    MAX_CONVERSATION_LIMIT,
};
