//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use marketplace_cart::CartStore;
use marketplace_kv::FileStore;

use crate::config::CliConfig;
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Storage file override from the command line.
    pub store_override: Option<String>,
}

impl Context {
    /// Load context from config file.
    pub fn load(
        config_path: Option<&str>,
        store_override: Option<String>,
        output: Output,
    ) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config = if let Some(path) = config_path {
            CliConfig::load(path)?
        } else {
            // Try to find config in current directory or parent directories
            Self::find_config(&cwd).unwrap_or_default()
        };

        Ok(Self {
            config,
            output,
            cwd,
            store_override,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<CliConfig> {
        let config_names = ["cart.toml", ".cart.toml", "cart.json"];

        let mut current = start.to_path_buf();
        loop {
            for name in &config_names {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        return Some(config);
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Path of the storage file in use.
    pub fn storage_path(&self) -> PathBuf {
        let path = self
            .store_override
            .as_deref()
            .unwrap_or(&self.config.storage.path);
        self.resolve_path(path)
    }

    /// Open the cart on the configured storage file.
    pub async fn open_cart(&self) -> CartStore {
        let path = self.storage_path();
        self.output
            .debug(&format!("Using storage file {}", path.display()));
        CartStore::open(FileStore::open(path), self.config.cart.clone()).await
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }
}
