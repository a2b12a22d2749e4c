//! Storage error types.

use thiserror::Error;

/// Result type for key-value operations.
pub type KvResult<T> = Result<T, KvError>;

/// Errors that can occur when talking to a key-value store.
#[derive(Error, Debug)]
pub enum KvError {
    /// Filesystem failure in a disk-backed store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to serialize or deserialize a value.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Backend refused or failed the operation.
    #[error("Store operation failed: {0}")]
    Store(String),

    /// Backing file exists but does not hold a key-value object.
    #[error("Corrupt store at {path}: {reason}")]
    Corrupt { path: String, reason: String },
}
