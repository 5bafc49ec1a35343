//! Local-storage style persistence.
//!
//! [`KeyValueStore`] mirrors the browser's `localStorage`: string keys mapped
//! to string values. [`CartStorage`] is the cart's persistence adapter on top
//! of it, storing the whole cart as one JSON array under a fixed key.

mod cart;
mod file;
mod memory;

pub use cart::{CART_STORAGE_KEY, CartStorage};
pub use file::FileStorage;
pub use memory::MemoryStorage;

use std::future::Future;
use std::sync::Arc;

use thiserror::Error;

/// Errors that can occur when reading or writing storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// String key-value store.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get_item(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<String>, StorageError>> + Send;

    /// Store `value` under `key`, replacing any previous value.
    fn set_item(
        &self,
        key: &str,
        value: String,
    ) -> impl Future<Output = Result<(), StorageError>> + Send;
}

impl<K: KeyValueStore> KeyValueStore for Arc<K> {
    fn get_item(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<String>, StorageError>> + Send {
        (**self).get_item(key)
    }

    fn set_item(
        &self,
        key: &str,
        value: String,
    ) -> impl Future<Output = Result<(), StorageError>> + Send {
        (**self).set_item(key, value)
    }
}
