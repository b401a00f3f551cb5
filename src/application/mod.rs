//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer validates input, drives the domain entities and calls the
//! repository ports. Every handler returns a user-facing error type from
//! [`errors`].

pub mod errors;
pub mod handlers;

pub use errors::{
    AstrologyError, ChatError, ConversationQueryError, GuidanceError, LoginError, RegisterError,
    SessionError, GENERIC_ERROR_MESSAGE,
};
pub use handlers::auth::{
    GetCurrentUserHandler, LoginUserCommand, LoginUserHandler, LogoutUserHandler,
    RegisterUserCommand, RegisterUserHandler,
};
pub use handlers::chat::{
    DeleteConversationCommand, DeleteConversationHandler, GetConversationHandler,
    GetConversationQuery, LoadConversationsHandler, LoadConversationsQuery,
    SendChatMessageCommand, SendChatMessageHandler,
};
pub use handlers::guidance::{
    RequestAstrologyReadingCommand, RequestAstrologyReadingHandler,
    RequestSpiritualGuidanceCommand, RequestSpiritualGuidanceHandler,
};
