//! Token persistence on top of a `KeyValueStore`.

use std::sync::Arc;

use crate::ports::{AuthTokens, AuthTokensRecord, KeyValueStore, RepositoryError};

const TOKENS_KEY: &str = "auth:tokens";

/// Holds the signed-in token pair.
///
/// The pair is written as one JSON record so access and refresh token never
/// drift apart. An unreadable record is treated as signed out.
pub struct TokenStore {
    store: Arc<dyn KeyValueStore>,
}

impl TokenStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub async fn save(&self, tokens: &AuthTokens) -> Result<(), RepositoryError> {
        let json = serde_json::to_string(&tokens.to_record())?;
        self.store.set(TOKENS_KEY, &json).await?;
        Ok(())
    }

    pub async fn load(&self) -> Result<Option<AuthTokens>, RepositoryError> {
        let Some(json) = self.store.get(TOKENS_KEY).await? else {
            return Ok(None);
        };
        match serde_json::from_str::<AuthTokensRecord>(&json) {
            Ok(record) => Ok(Some(record.into())),
            Err(e) => {
                tracing::warn!("Discarding unreadable stored tokens: {}", e);
                Ok(None)
            }
        }
    }

    pub async fn clear(&self) -> Result<(), RepositoryError> {
        self.store.remove(TOKENS_KEY).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryKeyValueStore;
    use secrecy::ExposeSecret;

    #[tokio::test]
    async fn save_load_clear() {
        let store = TokenStore::new(Arc::new(InMemoryKeyValueStore::new()));
        assert!(store.load().await.unwrap().is_none());

        store.save(&AuthTokens::new("access", "refresh")).await.unwrap();
        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded.access_token().expose_secret(), "access");
        assert_eq!(loaded.refresh_token().expose_secret(), "refresh");

        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn unreadable_record_counts_as_signed_out() {
        let kv = InMemoryKeyValueStore::new();
        kv.set(TOKENS_KEY, "not json").await.unwrap();
        let store = TokenStore::new(Arc::new(kv));
        assert!(store.load().await.unwrap().is_none());
    }
}
