//! Dump the macro map built from a set of sources.

use anyhow::Result;
use clap::Args;

use super::common::{Pipeline, SourceArg, load_macros, parse_source_arg, validate_format};
use crate::config::Settings;
use crate::extract::MacroStringMap;

/// Print every macro key and its value.
///
/// ```bash
/// macromsg keys --source PLAYER=steve.json --source GRAVE=grave.json
/// macromsg keys --source PLAYER=steve.json --format json
/// ```
#[derive(Args, Debug)]
pub struct KeysCommand {
    /// Macro source as BASE=FILE (repeatable)
    #[arg(short, long = "source", value_parser = parse_source_arg)]
    sources: Vec<SourceArg>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    format: String,
}

impl KeysCommand {
    pub async fn execute(self, settings: &Settings) -> Result<()> {
        validate_format(&self.format)?;

        let macros = load_macros(&self.sources, settings).await?;
        let pipeline = Pipeline::from_settings(settings)?;
        let map = macros.build(&pipeline.registry, &pipeline.extractor);

        if self.format == "json" {
            println!("{}", serde_json::to_string_pretty(&map)?);
        } else {
            print!("{}", render_text(&map));
        }
        Ok(())
    }
}

fn render_text(map: &MacroStringMap) -> String {
    map.iter().map(|(key, value)| format!("{key} = {value}\n")).collect()
}
