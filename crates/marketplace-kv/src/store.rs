//! Key-value store trait and the in-memory backend.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::KvResult;

/// Asynchronous string key-value storage.
///
/// Mirrors the device storage API a mobile app gets from its platform:
/// string keys, string values, every call may suspend.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value. Returns `None` if the key doesn't exist.
    async fn get_item(&self, key: &str) -> KvResult<Option<String>>;

    /// Write a value, replacing any previous one.
    async fn set_item(&self, key: &str, value: String) -> KvResult<()>;

    /// Remove a key. Removing a missing key is not an error.
    async fn remove_item(&self, key: &str) -> KvResult<()>;

    /// List all keys currently stored.
    async fn keys(&self) -> KvResult<Vec<String>>;
}

#[async_trait]
impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    async fn get_item(&self, key: &str) -> KvResult<Option<String>> {
        (**self).get_item(key).await
    }

    async fn set_item(&self, key: &str, value: String) -> KvResult<()> {
        (**self).set_item(key, value).await
    }

    async fn remove_item(&self, key: &str) -> KvResult<()> {
        (**self).remove_item(key).await
    }

    async fn keys(&self) -> KvResult<Vec<String>> {
        (**self).keys().await
    }
}

/// In-memory store.
///
/// Clones share the same map, so a handle kept by a test outlives any
/// component built on top of it.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with entries.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: Arc::new(RwLock::new(map)),
        }
    }

    /// Number of stored keys.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Check if the store holds no keys.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get_item(&self, key: &str) -> KvResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: String) -> KvResult<()> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> KvResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn keys(&self) -> KvResult<Vec<String>> {
        let mut keys: Vec<String> = self.entries.read().await.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}
