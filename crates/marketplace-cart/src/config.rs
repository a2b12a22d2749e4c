//! Cart configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CartError;

/// Storage key the cart list is persisted under.
pub const DEFAULT_STORAGE_KEY: &str = "marketplace:";

/// Which list `increment` and `decrement` persist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteMode {
    /// Persist the list produced by the mutation.
    #[default]
    AfterMutation,
    /// Persist the list as it was before the mutation, leaving storage one
    /// step behind memory until the next write. `add_to_cart` is unaffected.
    BeforeMutation,
}

/// What happens to an entry whose quantity drops to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroQuantityPolicy {
    /// Keep the entry with quantity 0.
    #[default]
    Keep,
    /// Remove the entry from the list.
    Prune,
}

/// Cart store configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartConfig {
    /// Key in the key-value store holding the serialized list.
    pub storage_key: String,
    /// Persisted snapshot for increment/decrement.
    pub write_mode: WriteMode,
    /// Zero-quantity handling for decrement.
    pub zero_quantity: ZeroQuantityPolicy,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            write_mode: WriteMode::default(),
            zero_quantity: ZeroQuantityPolicy::default(),
        }
    }
}

impl CartConfig {
    /// Parse from TOML text. Missing fields take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, CartError> {
        Ok(toml::from_str(content)?)
    }

    /// Load from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CartError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| CartError::ConfigRead {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Set the storage key.
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Set the write mode.
    pub fn with_write_mode(mut self, mode: WriteMode) -> Self {
        self.write_mode = mode;
        self
    }

    /// Set the zero-quantity policy.
    pub fn with_zero_quantity(mut self, policy: ZeroQuantityPolicy) -> Self {
        self.zero_quantity = policy;
        self
    }
}
