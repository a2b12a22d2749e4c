//! Cart error types.

use thiserror::Error;

/// Errors surfaced by the cart crate.
///
/// Persistence failures never appear here: reads fall back to an empty cart
/// and writes are logged from their own task.
#[derive(Error, Debug)]
pub enum CartError {
    /// A cart handle was requested from a scope no provider wraps.
    #[error("use_cart must be used within a CartProvider")]
    OutsideProvider,

    /// Configuration could not be read.
    #[error("Failed to read config {path}: {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration could not be parsed.
    #[error("Invalid config: {0}")]
    Config(#[from] toml::de::Error),

    /// Stored cart could not be (de)serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
