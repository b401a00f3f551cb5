//! Key-Value Store Port - string-keyed local persistence.
//!
//! Conversations and auth tokens are stored through this port so the same
//! repository code runs over an in-memory map (tests) or files on disk.

use async_trait::async_trait;

/// Errors that can occur during key-value operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Port for a flat string-to-string store
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes `key`. Removing a missing key succeeds.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Lists every stored key, in no particular order.
    async fn keys(&self) -> Result<Vec<String>, StoreError>;
}

impl From<StoreError> for super::RepositoryError {
    fn from(err: StoreError) -> Self {
        super::RepositoryError::Storage(err.to_string())
    }
}
