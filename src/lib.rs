//! Spirit Guide - client domain layer for AI spiritual guidance.
//!
//! This crate holds the entities, use cases and repository contracts behind
//! the Spirit Guide apps: authentication, AI chat, spiritual guidance,
//! astrology readings and local conversation persistence.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
