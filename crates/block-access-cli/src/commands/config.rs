//! Configuration management commands.

use anyhow::{Context, Result};
use block_access_config::{BlockAccessConfig, ConfigLoader};
use std::path::Path;

use super::{Format, SourceArgs};
use crate::style::colors::SemanticStyle;
use crate::style::{info_table, print_hint, print_success};

/// Show the merged configuration.
pub fn show(source: &SourceArgs, format: Format) -> Result<()> {
    let config = source.load().context("Failed to load configuration")?;

    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&config)?),
        Format::Toml => println!("{}", config.to_toml()?),
        Format::Text => {
            let settings = &config.block_access;
            let enabled = if settings.is_enabled() { "yes" } else { "no" };

            println!("{}", "block-access configuration".header());
            println!(
                "{}",
                info_table(&[
                    (
                        block_access::settings::INTERVALS_SETTING,
                        settings.intervals.as_deref().unwrap_or("(unset)"),
                    ),
                    (
                        block_access::settings::EXCLUDE_ROLES_SETTING,
                        settings.exclude_roles.as_deref().unwrap_or("(unset)"),
                    ),
                    ("enforced", enabled),
                ])
            );
        }
    }

    Ok(())
}

/// Write an example block_access.toml into the project directory.
pub fn init(project_dir: &Path, force: bool) -> Result<()> {
    let path = ConfigLoader::new()
        .with_project_dir(project_dir)
        .project_config_file();
    if path.exists() && !force {
        anyhow::bail!("{} already exists. Use --force to overwrite it.", path.display());
    }

    BlockAccessConfig::example().save(&path)?;

    print_success(&format!("Wrote {}", path.display()));
    print_hint("Run 'block-access validate' to see the resulting rules");
    Ok(())
}
