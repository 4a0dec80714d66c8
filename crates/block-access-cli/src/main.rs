//! block-access operator CLI.
//!
//! Validates `block_access.*` settings and dry-runs login decisions without
//! touching a running server.
//!
//! # Quick Start
//!
//! ```bash
//! # Write an example block_access.toml
//! block-access config init
//!
//! # Show the parsed rules
//! block-access validate
//!
//! # Would bob get in on Tuesday evening?
//! block-access check --user bob --at "2024-06-04 20:05"
//! ```

mod commands;
mod style;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use block_access::Effect;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{Format, SourceArgs};

/// block-access - week day and time window login restrictions.
#[derive(Parser)]
#[command(name = "block-access")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version information.
    Version,

    /// Parse the configured intervals and role groups and print the rules.
    Validate {
        #[command(flatten)]
        source: SourceArgs,

        /// Output format.
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Dry-run the access decision for a user.
    ///
    /// Exits with status 1 when the login would be denied.
    Check {
        /// Role name the client authenticated as.
        #[arg(short, long)]
        user: String,

        /// Instant to evaluate, "YYYY-MM-DD HH:MM" (default: now).
        #[arg(long)]
        at: Option<String>,

        #[command(flatten)]
        source: SourceArgs,

        /// Output format.
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Configuration management.
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the merged configuration.
    Show {
        #[command(flatten)]
        source: SourceArgs,

        /// Output format.
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Write an example block_access.toml.
    Init {
        /// Project directory.
        #[arg(short = 'C', long, default_value = ".")]
        project_dir: PathBuf,

        /// Overwrite an existing block_access.toml.
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<ExitCode> {
    // Logs go to stderr so JSON and TOML output stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    style::set_no_color(cli.no_color || std::env::var_os("NO_COLOR").is_some());

    match cli.command {
        Commands::Version => commands::version::run(),
        Commands::Validate { source, format } => commands::validate::run(&source, format)?,
        Commands::Check {
            user,
            at,
            source,
            format,
        } => {
            let effect = commands::check::run(&source, &user, at.as_deref(), format)?;
            if effect == Effect::Deny {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show { source, format } => commands::config::show(&source, format)?,
            ConfigCommands::Init { project_dir, force } => {
                commands::config::init(&project_dir, force)?;
            }
        },
    }

    Ok(ExitCode::SUCCESS)
}
