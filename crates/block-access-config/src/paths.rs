//! Location of the per-user configuration file.

use crate::ConfigError;
use directories::ProjectDirs;
use std::path::PathBuf;

const USER_CONFIG_FILE: &str = "config.toml";

/// `~/.config/block-access/config.toml` on Linux, the platform equivalent
/// elsewhere.
pub fn user_config_file() -> Result<PathBuf, ConfigError> {
    ProjectDirs::from("org", "block-access", "block-access")
        .map(|dirs| dirs.config_dir().join(USER_CONFIG_FILE))
        .ok_or_else(|| {
            ConfigError::XdgError("no home directory for user configuration".to_string())
        })
}
