//! Render one message from a catalog.
//!
//! # Examples
//!
//! ```bash
//! # Render with the recipient and one attached source
//! macromsg render --messages messages.toml --key GRAVE.CREATED \
//!     --recipient steve.json --source GRAVE=grave.json
//!
//! # Emit the substituted message as JSON
//! macromsg render --messages messages.toml --key PLAYER.JOINED --format json
//! ```
//!
//! Without `--recipient` an empty recipient is used, so `{RECIPIENT...}`
//! placeholders stay as written.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::common::{
    Pipeline, SourceArg, load_macros, load_source, parse_source_arg, stdout_sink, validate_format,
};
use crate::capability::JsonSource;
use crate::config::Settings;
use crate::core::MacroError;
use crate::message::{MessageCatalog, SendOutcome};

/// Substitute and print one message.
#[derive(Args, Debug)]
pub struct RenderCommand {
    /// Message catalog (.toml, .yaml or .yml)
    #[arg(short, long)]
    messages: PathBuf,

    /// Record key of the message to render
    #[arg(short, long)]
    key: String,

    /// JSON file describing the recipient
    #[arg(short, long)]
    recipient: Option<PathBuf>,

    /// Extra macro source as BASE=FILE (repeatable)
    #[arg(short, long = "source", value_parser = parse_source_arg)]
    sources: Vec<SourceArg>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    format: String,
}

impl RenderCommand {
    pub async fn execute(self, settings: &Settings) -> Result<()> {
        validate_format(&self.format)?;

        let catalog = MessageCatalog::load(&self.messages, settings.error_policy).await?;
        let recipient = match &self.recipient {
            Some(path) => load_source(path).await?,
            None => JsonSource::default(),
        };
        let macros = load_macros(&self.sources, settings).await?;

        let dispatcher = Pipeline::from_settings(settings)?.dispatcher(catalog, settings);
        let sink = stdout_sink(&self.format);

        match dispatcher.send(&recipient, self.key.as_str(), &macros, sink.as_ref())? {
            SendOutcome::Sent(_) => Ok(()),
            SendOutcome::NotFound => Err(MacroError::MessageNotFound {
                key: self.key,
            }
            .into()),
            SendOutcome::Disabled => {
                eprintln!("Message '{}' is disabled", self.key);
                Ok(())
            }
            SendOutcome::WorldDisabled => {
                eprintln!("Message '{}' is not delivered in the recipient's world", self.key);
                Ok(())
            }
            SendOutcome::Cooling => {
                eprintln!("Message '{}' is cooling down", self.key);
                Ok(())
            }
        }
    }
}
