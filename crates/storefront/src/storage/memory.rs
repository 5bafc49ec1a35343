//! In-process key-value store.

use std::collections::HashMap;

use tokio::sync::RwLock;

use super::{KeyValueStore, StorageError};

/// Key-value store held in memory; contents are lost on drop.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-populated with one entry.
    #[must_use]
    pub fn with_item(key: impl Into<String>, value: impl Into<String>) -> Self {
        let items = HashMap::from([(key.into(), value.into())]);
        Self {
            items: RwLock::new(items),
        }
    }
}

impl KeyValueStore for MemoryStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.read().await.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: String) -> Result<(), StorageError> {
        self.items.write().await.insert(key.to_string(), value);
        Ok(())
    }
}
