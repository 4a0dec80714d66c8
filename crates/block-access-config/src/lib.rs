//! Configuration management for block-access
//!
//! Provides hierarchical loading of the `block_access.*` settings:
//! 1. Explicit overrides, e.g. CLI arguments (highest precedence)
//! 2. Environment variables (`BLOCK_ACCESS_INTERVALS`, `BLOCK_ACCESS_EXCLUDE_ROLES`)
//! 3. block_access.local.toml (gitignored, local overrides)
//! 4. block_access.toml (project config)
//! 5. ~/.config/block-access/config.toml (user defaults)
//! 6. Built-in defaults: both settings unset, enforcement disabled (lowest precedence)
//!
//! ```toml
//! [block_access]
//! intervals = "mon,tue,wed,thu,fri - 08:00-18:00 ; sat - 08:00-12:00"
//! exclude_roles = "postgres, euler ; postgres, bob, alice"
//! ```
//!
//! A loaded snapshot is published through a [`SettingsHandle`], which the
//! authentication gate reads on every connection attempt.

use anyhow::Result;
use block_access::{AccessSettings, RuleSet};
use serde::{Deserialize, Serialize};
use std::path::Path;

mod error;
mod handle;
mod loader;
mod paths;

pub use error::ConfigError;
pub use handle::SettingsHandle;
pub use loader::{ConfigLoader, LOCAL_CONFIG_FILE, PROJECT_CONFIG_FILE};
pub use paths::user_config_file;

/// Root of a block-access configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockAccessConfig {
    pub block_access: AccessSettings,
}

impl BlockAccessConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        ConfigLoader::new().load()
    }

    /// Load configuration from specific project directory
    pub fn load_from_dir(project_dir: impl AsRef<Path>) -> Result<Self> {
        ConfigLoader::new().with_project_dir(project_dir).load()
    }

    /// Parses the settings, failing on any grammar error.
    pub fn validate(&self) -> Result<RuleSet, ConfigError> {
        Ok(self.block_access.parse()?)
    }

    /// Renders the configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Writes the configuration as TOML to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_toml()?).map_err(|source| ConfigError::WriteError {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Example configuration written by `block-access config init`.
    pub fn example() -> Self {
        Self {
            block_access: AccessSettings::new(
                "mon,tue,wed,thu,fri - 08:00-18:00 ; sat - 08:00-12:00",
                "postgres ; postgres",
            ),
        }
    }
}
