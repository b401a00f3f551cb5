//! Auth handlers.
//!
//! ## Commands
//! - Logging in and registering (tokens are stored before success)
//! - Logging out
//!
//! ## Queries
//! - Current signed-in user

mod credentials_policy;
mod get_current_user;
mod login_user;
mod logout_user;
mod register_user;

// Commands
pub use login_user::{LoginUserCommand, LoginUserHandler, LoginUserResult};
pub use logout_user::LogoutUserHandler;
pub use register_user::{RegisterUserCommand, RegisterUserHandler, RegisterUserResult};

// Queries
pub use get_current_user::{GetCurrentUserHandler, GetCurrentUserResult};
