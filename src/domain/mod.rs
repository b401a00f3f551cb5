//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors)
//! - `conversation` - Messages and the immutable conversation aggregate
//! - `user` - Account holder, subscription tier and credential rules
//! - `guidance` - Experience levels, reading types and birth data

pub mod conversation;
pub mod foundation;
pub mod guidance;
pub mod user;
