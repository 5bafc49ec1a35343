//! File-backed key-value store.
//!
//! All keys live in one JSON object file. Writes replace the file through a
//! temp file and a rename, so a crash mid-write leaves the previous contents.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::sync::Mutex;

use super::{KeyValueStore, StorageError};

/// Key-value store persisted to a JSON file.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    // Serializes read-modify-write cycles on the file.
    lock: Mutex<()>,
}

impl FileStorage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(BTreeMap::new());
        }

        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn write_all(&self, items: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let bytes = serde_json::to_vec_pretty(items)?;
        let tmp_path = self.path.with_extension("tmp");
        tokio::fs::write(&tmp_path, bytes).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }
}

impl KeyValueStore for FileStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().await;
        let mut items = self.read_all().await?;
        Ok(items.remove(key))
    }

    async fn set_item(&self, key: &str, value: String) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;

        let mut items = match self.read_all().await {
            Ok(items) => items,
            Err(StorageError::Serialize(e)) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Storage file is corrupt, starting from an empty store"
                );
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };

        items.insert(key.to_string(), value);
        self.write_all(&items).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("storage.json"));
        assert_eq!(storage.get_item("key").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_creates_parent_dirs_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let storage = FileStorage::new(&path);
        storage.set_item("a", "1".to_string()).await.unwrap();
        storage.set_item("b", "2".to_string()).await.unwrap();

        // A fresh instance sees the same contents.
        let reopened = FileStorage::new(&path);
        assert_eq!(reopened.get_item("a").await.unwrap().as_deref(), Some("1"));
        assert_eq!(reopened.get_item("b").await.unwrap().as_deref(), Some("2"));
        assert!(!path.with_extension("tmp").exists());
    }

    #[tokio::test]
    async fn test_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "{not json").unwrap();

        let storage = FileStorage::new(&path);
        assert!(matches!(
            storage.get_item("a").await,
            Err(StorageError::Serialize(_))
        ));

        // Writing recovers the file.
        storage.set_item("a", "1".to_string()).await.unwrap();
        assert_eq!(storage.get_item("a").await.unwrap().as_deref(), Some("1"));
    }

    #[tokio::test]
    async fn test_empty_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "  \n").unwrap();

        let storage = FileStorage::new(&path);
        assert_eq!(storage.get_item("a").await.unwrap(), None);
    }
}
