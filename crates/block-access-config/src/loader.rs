//! Configuration loader with multi-source merging

use crate::{BlockAccessConfig, user_config_file};
use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Project configuration, usually checked in.
pub const PROJECT_CONFIG_FILE: &str = "block_access.toml";
/// Local overrides of the project configuration, usually gitignored.
pub const LOCAL_CONFIG_FILE: &str = "block_access.local.toml";

const INTERVALS_KEY: &str = "block_access.intervals";
const EXCLUDE_ROLES_KEY: &str = "block_access.exclude_roles";

/// Configuration loader with builder pattern
pub struct ConfigLoader {
    project_dir: PathBuf,
    env_prefix: String,
    user_config: bool,
    intervals: Option<String>,
    exclude_roles: Option<String>,
}

impl ConfigLoader {
    /// Create a new config loader with default project directory (current dir)
    pub fn new() -> Self {
        Self {
            project_dir: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            env_prefix: "BLOCK_ACCESS".to_string(),
            user_config: true,
            intervals: None,
            exclude_roles: None,
        }
    }

    /// Set the project directory
    pub fn with_project_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.project_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Set the environment variable prefix (default: "BLOCK_ACCESS")
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Path of block_access.toml in the project directory
    pub fn project_config_file(&self) -> PathBuf {
        self.project_dir.join(PROJECT_CONFIG_FILE)
    }

    /// Skip ~/.config/block-access/config.toml
    pub fn without_user_config(mut self) -> Self {
        self.user_config = false;
        self
    }

    /// Override `block_access.intervals` above every other source
    pub fn with_intervals(mut self, intervals: Option<String>) -> Self {
        self.intervals = intervals;
        self
    }

    /// Override `block_access.exclude_roles` above every other source
    pub fn with_exclude_roles(mut self, exclude_roles: Option<String>) -> Self {
        self.exclude_roles = exclude_roles;
        self
    }

    /// Load configuration from all sources with proper precedence
    pub fn load(self) -> Result<BlockAccessConfig> {
        let mut builder = config::Config::builder();

        // 1. Start with built-in defaults
        let defaults = BlockAccessConfig::default();
        builder = builder.add_source(config::Config::try_from(&defaults)?);

        // 2. User config, then 3. project config, then 4. local overrides
        let user_file = if self.user_config {
            user_config_file().ok()
        } else {
            None
        };
        let project_files =
            [PROJECT_CONFIG_FILE, LOCAL_CONFIG_FILE].map(|name| self.project_dir.join(name));
        let files = user_file.into_iter().chain(project_files);

        for path in files.filter(|path| path.exists()) {
            debug!(path = %path.display(), "loading config file");
            builder = builder.add_source(
                config::File::from(path)
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // 5. Environment variables (BLOCK_ACCESS_INTERVALS, BLOCK_ACCESS_EXCLUDE_ROLES).
        // Set explicitly: the key names contain the separator character.
        let prefix = &self.env_prefix;
        builder = builder
            .set_override_option(INTERVALS_KEY, env::var(format!("{prefix}_INTERVALS")).ok())?
            .set_override_option(
                EXCLUDE_ROLES_KEY,
                env::var(format!("{prefix}_EXCLUDE_ROLES")).ok(),
            )?;

        // 6. Explicit overrides
        builder = builder
            .set_override_option(INTERVALS_KEY, self.intervals)?
            .set_override_option(EXCLUDE_ROLES_KEY, self.exclude_roles)?;

        // Build and deserialize
        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Load configuration or return defaults if not found
    pub fn load_or_default(self) -> BlockAccessConfig {
        self.load().unwrap_or_default()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
