//! Authentication adapters.
//!
//! Implementations of the `AuthRepository` port:
//!
//! - `HttpAuthRepository` - Spirit Guide backend with locally stored tokens
//! - `MockAuthRepository` - Test implementation that doesn't require a backend

mod http_auth_repository;
mod mock;
mod token_store;

pub use http_auth_repository::HttpAuthRepository;
pub use mock::MockAuthRepository;
pub use token_store::TokenStore;
