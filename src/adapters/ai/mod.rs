//! AI Repository Adapters.
//!
//! Implementations of the `AiRepository` port.
//!
//! ## Available Adapters
//!
//! - `HttpAiRepository` - Spirit Guide backend plus local conversation storage
//! - `MockAiRepository` - Configurable mock for testing
//!
//! `LocalConversationStore` is the conversation persistence both share.

mod conversation_store;
mod http_ai_repository;
mod mock;

pub use conversation_store::LocalConversationStore;
pub use http_ai_repository::HttpAiRepository;
pub use mock::{MockAiRepository, DEFAULT_CHAT_REPLY};
