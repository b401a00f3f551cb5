//! File-based Key-Value Store Adapter
//!
//! Stores each key as its own file under a base directory. Keys are
//! percent-encoded into file names so `conversation:<id>` is portable.

use async_trait::async_trait;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::ports::{KeyValueStore, StoreError};

const EXTENSION: &str = "json";

/// File-backed key-value store
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    base_path: PathBuf,
}

impl FileKeyValueStore {
    /// Create a store rooted at `base_path`. The directory is created lazily.
    ///
    /// # Example
    /// ```ignore
    /// let store = FileKeyValueStore::new("./data/spirit-guide");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn file_path(&self, key: &str) -> Result<PathBuf, StoreError> {
        if key.is_empty() {
            return Err(StoreError::InvalidKey("key cannot be empty".to_string()));
        }
        Ok(self
            .base_path
            .join(format!("{}.{}", encode_key(key), EXTENSION)))
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.file_path(key)?;
        match fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.file_path(key)?;
        fs::create_dir_all(&self.base_path).await?;

        // Write then rename so readers never see a half-written value
        let tmp = path.with_extension(format!("{}.tmp", EXTENSION));
        fs::write(&tmp, value).await?;
        fs::rename(&tmp, &path).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.file_path(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn keys(&self) -> Result<Vec<String>, StoreError> {
        let mut entries = match fs::read_dir(&self.base_path).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut keys = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            let Some(stem) = name.strip_suffix(&format!(".{}", EXTENSION)) else {
                continue;
            };
            match decode_key(stem) {
                Some(key) => keys.push(key),
                None => tracing::warn!("Skipping unreadable store file name: {}", name),
            }
        }
        Ok(keys)
    }
}

fn encode_key(key: &str) -> String {
    urlencoding::encode(key).into_owned()
}

fn decode_key(encoded: &str) -> Option<String> {
    urlencoding::decode(encoded).ok().map(Cow::into_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, FileKeyValueStore) {
        let dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(dir.path().join("kv"));
        (dir, store)
    }

    mod encoding {
        use super::*;

        #[test]
        fn keys_round_trip_through_file_names() {
            for key in ["conversation:abc-123", "conversations:index", "a.b/c d", "ключ"] {
                let encoded = encode_key(key);
                assert!(!encoded.contains(':') && !encoded.contains('/'));
                assert_eq!(decode_key(&encoded).as_deref(), Some(key));
            }
        }

        #[test]
        fn rejects_names_that_are_not_utf8() {
            assert_eq!(decode_key("abc%FF"), None);
        }
    }

    mod operations {
        use super::*;

        #[tokio::test]
        async fn get_missing_is_none() {
            let (_dir, store) = store();
            assert_eq!(store.get("nothing").await.unwrap(), None);
            assert!(store.keys().await.unwrap().is_empty());
        }

        #[tokio::test]
        async fn set_then_get() {
            let (_dir, store) = store();
            store.set("conversation:1", "{\"id\":\"1\"}").await.unwrap();
            assert_eq!(
                store.get("conversation:1").await.unwrap().as_deref(),
                Some("{\"id\":\"1\"}")
            );
        }

        #[tokio::test]
        async fn set_overwrites() {
            let (_dir, store) = store();
            store.set("k", "one").await.unwrap();
            store.set("k", "two").await.unwrap();
            assert_eq!(store.get("k").await.unwrap().as_deref(), Some("two"));
            assert_eq!(store.keys().await.unwrap(), vec!["k".to_string()]);
        }

        #[tokio::test]
        async fn remove_is_idempotent() {
            let (_dir, store) = store();
            store.set("k", "v").await.unwrap();
            store.remove("k").await.unwrap();
            store.remove("k").await.unwrap();
            assert_eq!(store.get("k").await.unwrap(), None);
        }

        #[tokio::test]
        async fn lists_decoded_keys() {
            let (_dir, store) = store();
            store.set("conversation:a", "1").await.unwrap();
            store.set("conversations:index", "[]").await.unwrap();

            let mut keys = store.keys().await.unwrap();
            keys.sort();
            assert_eq!(keys, vec!["conversation:a", "conversations:index"]);
        }

        #[tokio::test]
        async fn empty_key_is_rejected() {
            let (_dir, store) = store();
            assert!(matches!(
                store.set("", "v").await,
                Err(StoreError::InvalidKey(_))
            ));
        }

        #[tokio::test]
        async fn survives_reopen() {
            let (dir, store) = store();
            store.set("tokens", "secret").await.unwrap();

            let reopened = FileKeyValueStore::new(dir.path().join("kv"));
            assert_eq!(reopened.get("tokens").await.unwrap().as_deref(), Some("secret"));
        }
    }
}
