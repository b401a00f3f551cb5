//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Spirit Guide AI backend and conversation persistence
//! - `auth` - Sign-in backend and token custody
//! - `http` - Shared JSON client and status classification
//! - `storage` - Key-value stores (file, in-memory)

pub mod ai;
pub mod auth;
pub mod http;
pub mod storage;

pub use ai::{HttpAiRepository, LocalConversationStore, MockAiRepository};
pub use auth::{HttpAuthRepository, MockAuthRepository, TokenStore};
pub use storage::{FileKeyValueStore, InMemoryKeyValueStore};
