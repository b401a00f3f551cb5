//! HTTP plumbing shared by the backend adapters.

mod client;

pub use client::{extract_error_message, ApiClient, ApiClientConfig, Endpoint};
