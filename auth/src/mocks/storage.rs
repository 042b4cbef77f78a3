//! Storage that always fails, for exercising the logged-not-surfaced paths.

use crate::error::StorageError;
use crate::providers::KeyValueStorage;

/// Storage whose every operation fails with [`StorageError::Io`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingStorage;

impl KeyValueStorage for FailingStorage {
    async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Io("storage offline".to_string()))
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Io("storage offline".to_string()))
    }

    async fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Io("storage offline".to_string()))
    }
}
