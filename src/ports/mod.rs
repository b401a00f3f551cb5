//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the use cases and the outside world. Adapters implement these ports.
//!
//! - `AiRepository` - chat, guidance, astrology and conversation storage
//! - `AuthRepository` - sign-in, registration and token custody
//! - `KeyValueStore` - flat local persistence used by the adapters
//! - `RepositoryError` - the closed failure set every repository reports

mod ai_repository;
mod auth_repository;
mod key_value_store;
mod repository_error;

pub use ai_repository::{
    AiRepository, AstrologyReadingRequest, AstrologyReadingResponse, ChatContext, ChatRequest,
    ChatResponse, ConversationHistoryPage, ConversationHistoryRequest, GuidanceContext,
    SpiritualGuidanceRequest, SpiritualGuidanceResponse,
};
pub use auth_repository::{
    AuthRepository, AuthSession, AuthTokens, AuthTokensRecord, LoginCredentials,
    RefreshedAccessToken, RegistrationData,
};
pub use key_value_store::{KeyValueStore, StoreError};
pub use repository_error::RepositoryError;
