//! CLI command implementations.

use anyhow::Result;
use block_access_config::{BlockAccessConfig, ConfigLoader};
use clap::Args;
use std::path::PathBuf;

pub mod check;
pub mod config;
pub mod validate;
pub mod version;

/// Where the `block_access.*` settings come from.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Directory holding block_access.toml and block_access.local.toml.
    #[arg(short = 'C', long, default_value = ".")]
    pub project_dir: PathBuf,

    /// Override block_access.intervals.
    #[arg(long)]
    pub intervals: Option<String>,

    /// Override block_access.exclude_roles.
    #[arg(long)]
    pub exclude_roles: Option<String>,

    /// Ignore ~/.config/block-access/config.toml.
    #[arg(long)]
    pub no_user_config: bool,
}

impl SourceArgs {
    pub fn loader(&self) -> ConfigLoader {
        let loader = ConfigLoader::new()
            .with_project_dir(&self.project_dir)
            .with_intervals(self.intervals.clone())
            .with_exclude_roles(self.exclude_roles.clone());

        if self.no_user_config {
            loader.without_user_config()
        } else {
            loader
        }
    }

    pub fn load(&self) -> Result<BlockAccessConfig> {
        self.loader().load()
    }
}

/// Output format shared by the reporting commands.
#[derive(clap::ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
    #[default]
    Text,
    Toml,
    Json,
}
