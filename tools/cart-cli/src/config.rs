//! CLI configuration.

use anyhow::{Context, Result};
use marketplace_cart::CartConfig;
use serde::{Deserialize, Serialize};

/// Default location of the device storage file, relative to the working
/// directory.
pub const DEFAULT_STORAGE_PATH: &str = ".cart/storage.json";

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Cart store settings.
    #[serde(default)]
    pub cart: CartConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }
}

/// Where the cart is stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path of the JSON storage file.
    #[serde(default = "default_storage_path")]
    pub path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

fn default_storage_path() -> String {
    DEFAULT_STORAGE_PATH.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use marketplace_cart::{WriteMode, ZeroQuantityPolicy};

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: CliConfig = toml::from_str("").unwrap();
        assert_eq!(config.storage.path, DEFAULT_STORAGE_PATH);
        assert_eq!(config.cart, CartConfig::default());
    }

    #[test]
    fn test_load_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.toml");
        std::fs::write(
            &path,
            r#"
            [cart]
            write_mode = "before_mutation"
            zero_quantity = "prune"

            [storage]
            path = "data/cart.json"
            "#,
        )
        .unwrap();

        let config = CliConfig::load(path.to_str().unwrap()).unwrap();
        assert_eq!(config.cart.write_mode, WriteMode::BeforeMutation);
        assert_eq!(config.cart.zero_quantity, ZeroQuantityPolicy::Prune);
        assert_eq!(config.storage.path, "data/cart.json");
    }

    #[test]
    fn test_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.json");
        std::fs::write(&path, r#"{"cart":{"storage_key":"k"}}"#).unwrap();

        let config = CliConfig::load(path.to_str().unwrap()).unwrap();
        assert_eq!(config.cart.storage_key, "k");
    }
}
