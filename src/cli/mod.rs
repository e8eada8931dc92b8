//! Command-line interface for macromsg.
//!
//! The CLI drives the message pipeline against files on disk: a message catalog
//! (TOML or YAML) and JSON macro sources standing in for game objects.
//!
//! # Available Commands
//!
//! - `render` - Substitute one message for a recipient and print it
//! - `keys` - Print the macro map built from a set of sources
//! - `check` - Lint the placeholders of every message in a catalog
//! - `stream` - Dispatch JSON send requests read from stdin, with cooldowns
//!
//! # Global Options
//!
//! All commands support these global options:
//! - `--verbose` - Enable debug output
//! - `--quiet` - Suppress all output except errors
//! - `--config` - Path to a settings file
//!
//! # Example
//!
//! ```bash
//! # See which keys a source produces
//! macromsg keys --source PLAYER=steve.json
//!
//! # Render a message
//! macromsg render --messages messages.toml --key PLAYER.JOINED --recipient steve.json
//!
//! # Check every template before shipping the catalog
//! macromsg check --messages messages.toml --source GRAVE=grave.json
//!
//! # Dispatch events as they arrive
//! tail -f events.jsonl | macromsg stream --messages messages.toml
//! ```

mod check;
pub mod common;
mod keys;
mod render;
mod stream;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::Settings;

/// Main CLI structure for macromsg.
#[derive(Parser, Debug)]
#[command(
    name = "macromsg",
    about = "Placeholder substitution and message dispatch for game server messages",
    version,
    long_about = "macromsg renders message templates such as 'Your grave was created at {GRAVE.LOCATION}' \
                  from capability-described objects, and lints message catalogs for broken placeholders."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Path to the settings file (defaults to $MACROMSG_CONFIG or ~/.macromsg/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Substitute one message for a recipient and print it
    Render(render::RenderCommand),

    /// Print the macro map built from a set of sources
    Keys(keys::KeysCommand),

    /// Lint the placeholders of every message in a catalog
    Check(check::CheckCommand),

    /// Dispatch JSON send requests read line by line from stdin
    Stream(stream::StreamCommand),
}

impl Cli {
    /// Set up logging, load settings and run the selected command.
    pub async fn execute(self) -> Result<()> {
        init_logging(self.log_level());

        let settings = Settings::load(self.config.clone()).await?;
        tracing::debug!("Using settings: {settings:?}");

        match self.command {
            Commands::Render(cmd) => cmd.execute(&settings).await,
            Commands::Keys(cmd) => cmd.execute(&settings).await,
            Commands::Check(cmd) => cmd.execute(&settings).await,
            Commands::Stream(cmd) => cmd.execute(&settings).await,
        }
    }

    /// Log level forced by `--verbose` or `--quiet`; `None` defers to `RUST_LOG`.
    fn log_level(&self) -> Option<&'static str> {
        if self.verbose {
            Some("debug")
        } else if self.quiet {
            Some("error")
        } else {
            None
        }
    }
}

/// Install the global tracing subscriber, writing to stderr.
///
/// `level` overrides `RUST_LOG`; without either only warnings are shown.
/// Calling this more than once is harmless.
pub fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
