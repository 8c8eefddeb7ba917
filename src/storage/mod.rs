//! Persistent key-value storage abstraction
//!
//! Front-end scaffolding persists small pieces of state (session tokens,
//! cached slices) in a device key-value store. [`KeyValueStore`] is that
//! contract: string keys, string values, three operations. The framework is
//! agnostic to the backing implementation.

#[cfg(feature = "in-memory")]
pub mod in_memory;

#[cfg(feature = "in-memory")]
pub use in_memory::InMemoryStorage;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Trait for persistent key-value stores
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value; `None` when the key is absent
    async fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one
    async fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a key; removing an absent key is not an error
    async fn remove_item(&self, key: &str) -> Result<()>;
}

/// Persist a JSON value under a key
///
/// Used to snapshot a module's state slice between application launches.
pub async fn save_json(store: &dyn KeyValueStore, key: &str, value: &Value) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    store.set_item(key, &raw).await
}

/// Load a JSON value previously saved with [`save_json`]
pub async fn load_json(store: &dyn KeyValueStore, key: &str) -> Result<Option<Value>> {
    match store.get_item(key).await? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

#[cfg(all(test, feature = "in-memory"))]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_save_and_load_json_round_trip() {
        let store = InMemoryStorage::new();
        let snapshot = json!({"pending": false, "data": {"id": 7}, "error": null});

        save_json(&store, "user.fetchUser", &snapshot).await.unwrap();
        let loaded = load_json(&store, "user.fetchUser").await.unwrap();
        assert_eq!(loaded, Some(snapshot));
    }

    #[tokio::test]
    async fn test_load_json_absent_key() {
        let store = InMemoryStorage::new();
        let loaded = load_json(&store, "nothing").await.unwrap();
        assert_eq!(loaded, None);
    }
}
