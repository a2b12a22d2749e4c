//! Typed wrapper with automatic JSON serialization.

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};

use crate::{KeyValueStore, KvResult};

/// Type-safe cache over any [`KeyValueStore`].
///
/// Values are stored as JSON text, so anything implementing `Serialize` and
/// `DeserializeOwned` can round-trip through a string-only backend.
#[derive(Clone)]
pub struct Cache {
    store: Arc<dyn KeyValueStore>,
}

impl Cache {
    /// Wrap a store.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cache = Cache::new(MemoryStore::new());
    /// ```
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Wrap a store that is already shared.
    pub fn from_shared(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let items: Option<Vec<CartItem>> = cache.get("marketplace:").await?;
    /// ```
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> KvResult<Option<T>> {
        match self.store.get_item(key).await? {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    /// Set a value in the cache.
    pub async fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> KvResult<()> {
        let text = serde_json::to_string(value)?;
        self.store.set_item(key, text).await
    }

    /// Delete a value from the cache.
    pub async fn delete(&self, key: &str) -> KvResult<()> {
        self.store.remove_item(key).await
    }

    /// Check if a key exists in the cache.
    pub async fn exists(&self, key: &str) -> KvResult<bool> {
        Ok(self.store.get_item(key).await?.is_some())
    }

    /// Get all keys in the cache.
    pub async fn keys(&self) -> KvResult<Vec<String>> {
        self.store.keys().await
    }
}
