//! Dispatch a stream of send requests read from stdin.
//!
//! Each non-empty input line is one JSON request:
//!
//! ```json
//! {"key": "GRAVE.CREATED", "recipient": {"name": "Steve", "uuid": "0f5a2d8e-54c1-4d3b-9a63-3c2b1f7a9e01"}, "sources": {"GRAVE": {"name": "grave"}}}
//! ```
//!
//! `recipient` and `sources` are optional. Sources given with `--source` are
//! attached to every request before the request's own. All requests share one
//! cooldown map, so a message with a repeat delay reaches each recipient at most
//! once per delay; stale cooldowns are swept every `sweep_interval_secs`.
//!
//! # Examples
//!
//! ```bash
//! tail -f events.jsonl | macromsg stream --messages messages.toml --format json
//! ```

use anyhow::Result;
use clap::Args;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use super::common::{Pipeline, SourceArg, load_macros, parse_source_arg, stdout_sink, validate_format};
use crate::capability::JsonSource;
use crate::config::Settings;
use crate::core::MacroError;
use crate::message::{MessageCatalog, MessageDispatcher, MessageSink, SendOutcome};
use crate::templating::MacroContext;

/// Dispatch send requests read line by line from stdin.
#[derive(Args, Debug)]
pub struct StreamCommand {
    /// Message catalog (.toml, .yaml or .yml)
    #[arg(short, long)]
    messages: PathBuf,

    /// Macro source attached to every request as BASE=FILE (repeatable)
    #[arg(short, long = "source", value_parser = parse_source_arg)]
    sources: Vec<SourceArg>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    format: String,
}

/// One line of input.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SendRequest {
    key: String,
    #[serde(default)]
    recipient: Option<Value>,
    #[serde(default)]
    sources: IndexMap<String, Value>,
}

/// Counts of what happened to the requests of one stream.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StreamSummary {
    pub sent: usize,
    pub suppressed: usize,
    pub rejected: usize,
}

impl StreamCommand {
    pub async fn execute(self, settings: &Settings) -> Result<()> {
        validate_format(&self.format)?;

        let catalog = MessageCatalog::load(&self.messages, settings.error_policy).await?;
        let shared = load_macros(&self.sources, settings).await?;
        let dispatcher = Pipeline::from_settings(settings)?.dispatcher(catalog, settings);
        let sink = stdout_sink(&self.format);

        let sweeper = dispatcher.cooldowns().clone().spawn_sweeper(settings.sweep_interval());
        let input = BufReader::new(tokio::io::stdin());
        let result = dispatch_lines(input, &dispatcher, &shared, sink.as_ref()).await;
        sweeper.abort();

        let summary = result?;
        tracing::info!(
            "Stream finished: {} sent, {} suppressed, {} rejected",
            summary.sent,
            summary.suppressed,
            summary.rejected
        );
        Ok(())
    }
}

/// Dispatch every request in `input` until end of input.
///
/// Malformed requests and unknown keys go through the dispatcher's error policy:
/// strict stops at the first one, lenient logs it and moves on.
pub(crate) async fn dispatch_lines<R: AsyncBufRead + Unpin>(
    input: R,
    dispatcher: &MessageDispatcher,
    shared: &MacroContext,
    sink: &dyn MessageSink,
) -> Result<StreamSummary> {
    let policy = dispatcher.policy();
    let mut summary = StreamSummary::default();
    let mut lines = input.lines();
    let mut number = 0usize;

    while let Some(line) = lines.next_line().await? {
        number += 1;
        if line.trim().is_empty() {
            continue;
        }
        let origin = format!("stdin:{number}");

        let (key, recipient, macros) = match parse_request(&line, &origin, shared) {
            Ok(request) => request,
            Err(error) => {
                policy.handle(error, ())?;
                summary.rejected += 1;
                continue;
            }
        };

        match dispatcher.send(&recipient, key.as_str(), &macros, sink)? {
            SendOutcome::Sent(_) => summary.sent += 1,
            SendOutcome::NotFound => {
                policy.handle(
                    MacroError::MessageNotFound {
                        key,
                    },
                    (),
                )?;
                summary.rejected += 1;
            }
            outcome => {
                tracing::debug!("{origin}: {key} not sent ({outcome:?})");
                summary.suppressed += 1;
            }
        }
    }

    Ok(summary)
}

fn parse_request(
    line: &str,
    origin: &str,
    shared: &MacroContext,
) -> Result<(String, JsonSource, MacroContext), MacroError> {
    let request: SendRequest =
        serde_json::from_str(line).map_err(|e| MacroError::SourceParseError {
            file: origin.to_string(),
            reason: e.to_string(),
        })?;

    let recipient = match &request.recipient {
        Some(value) => JsonSource::from_value(value, origin)?,
        None => JsonSource::default(),
    };

    let mut macros = shared.clone();
    for (base, value) in &request.sources {
        let source = JsonSource::from_value(value, origin)?;
        macros.set_macro(base.as_str(), Arc::new(source))?;
    }

    Ok((request.key, recipient, macros))
}
