//! macromsg CLI entry point
//!
//! Parses the command line, runs the selected command and renders any error
//! with its suggestion before exiting with status 1.
//!
//! - `render` - Substitute one message for a recipient
//! - `keys` - Print the macro map built from a set of sources
//! - `check` - Lint the placeholders of a message catalog

use anyhow::Result;
use clap::Parser;
use macromsg::cli;
use macromsg::core::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
