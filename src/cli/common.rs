//! Common utilities for CLI commands

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::adapter::AccessorRegistry;
use crate::cache::CooldownMap;
use crate::capability::JsonSource;
use crate::config::Settings;
use crate::core::{Clock, SystemClock};
use crate::extract::FieldExtractor;
use crate::key::{Macro, ValidKey};
use crate::message::{JsonSink, MessageCatalog, MessageDispatcher, MessageSink, WriterSink};
use crate::templating::MacroContext;

/// Output formats accepted by `--format`.
pub const OUTPUT_FORMATS: &[&str] = &["text", "json"];

/// A `BASE=FILE` pair naming a JSON macro source and the base key it is
/// registered under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceArg {
    pub base: ValidKey<Macro>,
    pub path: PathBuf,
}

/// Parse a `--source` value.
pub fn parse_source_arg(raw: &str) -> Result<SourceArg, String> {
    let (base, path) =
        raw.split_once('=').ok_or_else(|| format!("expected BASE=FILE, got '{raw}'"))?;
    if path.is_empty() {
        return Err(format!("missing file for source '{base}'"));
    }
    let base = base.parse::<ValidKey<Macro>>().map_err(|e| e.to_string())?;
    Ok(SourceArg {
        base,
        path: PathBuf::from(path),
    })
}

/// Reject any `--format` value other than the supported ones.
pub fn validate_format(format: &str) -> Result<()> {
    if !OUTPUT_FORMATS.contains(&format) {
        return Err(anyhow::anyhow!(
            "Invalid format '{format}'. Valid formats are: {}",
            OUTPUT_FORMATS.join(", ")
        ));
    }
    Ok(())
}

/// Sink printing delivered messages to stdout in `format`.
pub fn stdout_sink(format: &str) -> Box<dyn MessageSink> {
    if format == "json" {
        Box::new(JsonSink::new(std::io::stdout()))
    } else {
        Box::new(WriterSink::new(std::io::stdout()))
    }
}

/// Read a JSON macro source file.
pub async fn load_source(path: &Path) -> Result<JsonSource> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read macro source: {}", path.display()))?;
    Ok(JsonSource::parse(&text, &path.display().to_string())?)
}

/// Load every `--source` into a [`MacroContext`], in command-line order.
pub async fn load_macros(sources: &[SourceArg], settings: &Settings) -> Result<MacroContext> {
    let mut macros = MacroContext::new(settings.error_policy);
    for source in sources {
        let loaded = load_source(&source.path).await?;
        macros.set_macro(source.base.clone(), Arc::new(loaded))?;
    }
    Ok(macros)
}

/// The registry, extractor and clock shared by the commands.
pub struct Pipeline {
    pub registry: Arc<AccessorRegistry>,
    pub extractor: FieldExtractor,
    pub clock: Arc<dyn Clock>,
}

impl Pipeline {
    /// Build the default pipeline from settings, reading the system clock.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        Ok(Self {
            registry: Arc::new(AccessorRegistry::with_defaults()),
            extractor: settings.field_extractor(clock.clone())?,
            clock,
        })
    }

    /// A dispatcher over `catalog` with a fresh cooldown map, configured from
    /// `settings`.
    pub fn dispatcher(self, catalog: MessageCatalog, settings: &Settings) -> MessageDispatcher {
        MessageDispatcher::new(
            Arc::new(catalog),
            self.registry,
            self.extractor,
            Arc::new(CooldownMap::new(self.clock)),
        )
        .with_policy(settings.error_policy)
        .with_enabled_worlds(settings.enabled_worlds.clone())
    }
}
