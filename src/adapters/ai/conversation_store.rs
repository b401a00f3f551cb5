//! Local conversation persistence on top of a `KeyValueStore`.
//!
//! Layout:
//!
//! - `conversation:<id>` holds one conversation as JSON
//! - `conversations:index` holds a JSON array of every stored id
//!
//! The index lets listings avoid a key scan. A missing or unreadable index is
//! rebuilt from the record keys and written back.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::conversation::Conversation;
use crate::domain::foundation::ConversationId;
use crate::ports::{KeyValueStore, RepositoryError};

const RECORD_PREFIX: &str = "conversation:";
const INDEX_KEY: &str = "conversations:index";

/// Ids read from the index record.
struct IndexSnapshot {
    ids: Vec<String>,
    /// The stored index was missing or corrupt and `ids` came from a key scan.
    rebuilt: bool,
}

/// Conversation records plus their id index.
pub struct LocalConversationStore {
    store: Arc<dyn KeyValueStore>,
    /// Serializes index read-modify-write cycles within this process.
    index_lock: Mutex<()>,
}

impl LocalConversationStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            index_lock: Mutex::new(()),
        }
    }

    fn record_key(id: &ConversationId) -> String {
        format!("{}{}", RECORD_PREFIX, id)
    }

    /// Writes the conversation, replacing any earlier version.
    pub async fn save(&self, conversation: &Conversation) -> Result<(), RepositoryError> {
        let json = conversation
            .to_json()
            .map_err(|e| RepositoryError::storage(e.message))?;

        let _guard = self.index_lock.lock().await;
        // Snapshot first: a rebuild after the write would already see this id
        let mut index = self.read_index().await?;
        self.store
            .set(&Self::record_key(conversation.id()), &json)
            .await?;

        let id = conversation.id().as_str();
        let known = index.ids.iter().any(|existing| existing == id);
        if !known {
            index.ids.push(id.to_string());
        }
        if !known || index.rebuilt {
            self.write_index(&index.ids).await?;
        }

        tracing::debug!(conversation_id = %conversation.id(), "Conversation saved locally");
        Ok(())
    }

    /// Reads one conversation.
    ///
    /// # Errors
    ///
    /// `Storage` if the record exists but cannot be decoded.
    pub async fn load(&self, id: &ConversationId) -> Result<Option<Conversation>, RepositoryError> {
        match self.store.get(&Self::record_key(id)).await? {
            None => Ok(None),
            Some(json) => Conversation::from_json(&json)
                .map(Some)
                .map_err(|e| RepositoryError::storage(format!("Corrupt conversation {}: {}", id, e.message))),
        }
    }

    /// Lists conversations, most recently updated first.
    ///
    /// Records that cannot be decoded are skipped with a warning.
    pub async fn list(&self, limit: Option<usize>) -> Result<Vec<Conversation>, RepositoryError> {
        let mut index = self.read_index().await?;
        if index.rebuilt {
            let _guard = self.index_lock.lock().await;
            index = self.read_index().await?;
            if index.rebuilt {
                self.write_index(&index.ids).await?;
                tracing::info!(entries = index.ids.len(), "Conversation index rebuilt");
            }
        }

        let mut conversations = Vec::with_capacity(index.ids.len());
        for raw_id in &index.ids {
            let Ok(id) = ConversationId::new(raw_id.as_str()) else {
                tracing::warn!("Skipping blank id in conversation index");
                continue;
            };
            match self.load(&id).await {
                Ok(Some(conversation)) => conversations.push(conversation),
                Ok(None) => tracing::debug!("Index entry {} has no record", id),
                Err(e) => tracing::warn!("Skipping unreadable conversation: {}", e),
            }
        }

        conversations.sort_by(|a, b| b.updated_at().cmp(a.updated_at()));
        if let Some(limit) = limit {
            conversations.truncate(limit);
        }
        Ok(conversations)
    }

    /// Removes the record and its index entry.
    pub async fn delete(&self, id: &ConversationId) -> Result<(), RepositoryError> {
        let _guard = self.index_lock.lock().await;
        let mut index = self.read_index().await?;
        self.store.remove(&Self::record_key(id)).await?;

        let before = index.ids.len();
        index.ids.retain(|known| known != id.as_str());
        if index.ids.len() != before || index.rebuilt {
            self.write_index(&index.ids).await?;
        }
        Ok(())
    }

    async fn read_index(&self) -> Result<IndexSnapshot, RepositoryError> {
        let stored = match self.store.get(INDEX_KEY).await? {
            Some(json) => match serde_json::from_str::<Vec<String>>(&json) {
                Ok(ids) => Some(ids),
                Err(e) => {
                    tracing::warn!("Conversation index is corrupt, rebuilding: {}", e);
                    None
                }
            },
            None => None,
        };

        match stored {
            Some(ids) => Ok(IndexSnapshot { ids, rebuilt: false }),
            None => Ok(IndexSnapshot {
                ids: self.rebuild_index().await?,
                rebuilt: true,
            }),
        }
    }

    async fn rebuild_index(&self) -> Result<Vec<String>, RepositoryError> {
        let mut ids: Vec<String> = self
            .store
            .keys()
            .await?
            .into_iter()
            .filter_map(|key| key.strip_prefix(RECORD_PREFIX).map(str::to_string))
            .collect();
        ids.sort();
        Ok(ids)
    }

    async fn write_index(&self, index: &[String]) -> Result<(), RepositoryError> {
        let json = serde_json::to_string(index)?;
        self.store.set(INDEX_KEY, &json).await?;
        Ok(())
    }
}
