//! In-memory implementation of KeyValueStore for testing and development

use super::KeyValueStore;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// In-memory key-value store
///
/// Useful for testing and development. Uses RwLock for thread-safe access.
#[derive(Clone)]
pub struct InMemoryStorage {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryStorage {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(entries.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        entries.insert(key.to_string(), value.to_string());

        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        entries.remove(key);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_and_get() {
        let store = InMemoryStorage::new();
        store.set_item("token", "abc123").await.unwrap();

        let value = store.get_item("token").await.unwrap();
        assert_eq!(value.as_deref(), Some("abc123"));
    }

    #[tokio::test]
    async fn test_get_absent_key_is_none() {
        let store = InMemoryStorage::new();
        assert_eq!(store.get_item("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_replaces_previous_value() {
        let store = InMemoryStorage::new();
        store.set_item("token", "first").await.unwrap();
        store.set_item("token", "second").await.unwrap();

        let value = store.get_item("token").await.unwrap();
        assert_eq!(value.as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn test_remove_item() {
        let store = InMemoryStorage::new();
        store.set_item("token", "abc").await.unwrap();
        store.remove_item("token").await.unwrap();

        assert_eq!(store.get_item("token").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_remove_absent_key_is_ok() {
        let store = InMemoryStorage::new();
        assert!(store.remove_item("missing").await.is_ok());
    }

    #[tokio::test]
    async fn test_clones_share_the_same_entries() {
        let store = InMemoryStorage::new();
        let clone = store.clone();
        store.set_item("shared", "yes").await.unwrap();

        let value = clone.get_item("shared").await.unwrap();
        assert_eq!(value.as_deref(), Some("yes"));
    }
}
