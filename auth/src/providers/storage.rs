//! Durable key-value storage for the session.
//!
//! Values are plain strings; callers serialize structured data themselves.

use crate::error::StorageError;
use std::collections::{BTreeMap, HashMap};
use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

/// Durable string key-value storage.
pub trait KeyValueStorage: Send + Sync {
    /// Read a value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backing medium cannot be read.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, StorageError>> + Send;

    /// Write a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backing medium cannot be written.
    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<(), StorageError>> + Send;

    /// Delete a value. Deleting a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backing medium cannot be written.
    fn remove(&self, key: &str) -> impl Future<Output = Result<(), StorageError>> + Send;
}

// ═══════════════════════════════════════════════════════════════════════
// In-Memory
// ═══════════════════════════════════════════════════════════════════════

/// Process-local storage. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryStorage {
    /// Create empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create storage pre-populated with entries.
    #[must_use]
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();

        Self {
            entries: Arc::new(Mutex::new(entries)),
        }
    }

    /// Copy of all entries.
    #[must_use]
    pub fn snapshot(&self) -> HashMap<String, String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl KeyValueStorage for InMemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════
// File
// ═══════════════════════════════════════════════════════════════════════

/// Storage persisted as one JSON object in `{dir}/session.json`.
///
/// Writes replace the file atomically via a temporary file. Clones share a
/// lock so read-modify-write cycles from one process never interleave.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
    lock: Arc<tokio::sync::Mutex<()>>,
}

impl FileStorage {
    /// File name used inside the storage directory.
    pub const FILE_NAME: &'static str = "session.json";

    /// Create storage rooted at `dir`. The directory is created on first write.
    #[must_use]
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(Self::FILE_NAME),
            lock: Arc::new(tokio::sync::Mutex::new(())),
        }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let staging = self.path.with_extension("json.tmp");
        tokio::fs::write(&staging, serde_json::to_vec_pretty(entries)?).await?;
        tokio::fs::rename(&staging, &self.path).await?;
        Ok(())
    }
}

impl KeyValueStorage for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.load().await?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.load().await?;
        if entries.remove(key).is_some() {
            self.save(&entries).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn in_memory_clones_share_entries() -> Result<(), StorageError> {
        let storage = InMemoryStorage::new();
        let clone = storage.clone();

        storage.set("token", "abc").await?;
        assert_eq!(clone.get("token").await?, Some("abc".to_string()));

        clone.remove("token").await?;
        clone.remove("token").await?;
        assert!(storage.snapshot().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn file_storage_persists_across_instances() -> Result<(), StorageError> {
        let dir = tempfile::tempdir()?;
        let nested = dir.path().join("profile");

        FileStorage::new(&nested).set("token", "abc").await?;
        FileStorage::new(&nested).set("userData", r#"{"id":"1"}"#).await?;

        let reopened = FileStorage::new(&nested);
        assert_eq!(reopened.get("token").await?, Some("abc".to_string()));
        assert_eq!(reopened.get("userData").await?, Some(r#"{"id":"1"}"#.to_string()));
        assert_eq!(reopened.get("missing").await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn file_storage_remove_and_missing_file() -> Result<(), StorageError> {
        let dir = tempfile::tempdir()?;
        let storage = FileStorage::new(dir.path());

        storage.remove("token").await?;
        assert!(!storage.path().exists());

        storage.set("token", "abc").await?;
        storage.remove("token").await?;
        assert_eq!(storage.get("token").await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn file_storage_reports_corrupt_file() -> Result<(), StorageError> {
        let dir = tempfile::tempdir()?;
        let storage = FileStorage::new(dir.path());
        tokio::fs::write(storage.path(), b"not json").await?;

        assert!(matches!(storage.get("token").await, Err(StorageError::Corrupt(_))));
        Ok(())
    }
}
