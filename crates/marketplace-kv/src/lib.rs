//! Asynchronous key-value storage for the marketplace app.
//!
//! Provides the device-storage collaborator the cart persists through:
//! a string-in, string-out [`KeyValueStore`] trait, two backends, and a
//! [`Cache`] wrapper that handles JSON serialization.
//!
//! # Example
//!
//! ```rust,ignore
//! use marketplace_kv::{Cache, MemoryStore};
//!
//! let cache = Cache::new(MemoryStore::new());
//!
//! // Store a value
//! cache.set("marketplace:", &items).await?;
//!
//! // Retrieve a value
//! let items: Option<Vec<CartItem>> = cache.get("marketplace:").await?;
//!
//! // Delete a value
//! cache.delete("marketplace:").await?;
//! ```

mod error;
mod file;
mod kv;
mod store;

pub use error::{KvError, KvResult};
pub use file::FileStore;
pub use kv::Cache;
pub use store::{KeyValueStore, MemoryStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, FileStore, KeyValueStore, KvError, KvResult, MemoryStore};
}
