//! Lint the placeholders of a message catalog.
//!
//! For every message the command lists the placeholders used in the body,
//! title and subtitle. It reports tokens that look like placeholders but are
//! not valid keys (`{player.name}`), and, when macro sources are supplied,
//! placeholders those sources leave without a value.
//!
//! ```bash
//! macromsg check --messages messages.toml
//! macromsg check --messages messages.toml --recipient steve.json --source GRAVE=grave.json
//! ```
//!
//! The command fails when any issue is found, which makes it usable in CI.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;

use super::common::{Pipeline, SourceArg, load_macros, load_source, parse_source_arg};
use crate::config::Settings;
use crate::constants::RECIPIENT_BASE_KEY;
use crate::extract::MacroStringMap;
use crate::message::{MessageCatalog, MessageRecord};
use crate::templating::{PlaceholderIssue, check_template, scan_placeholders};

/// Check message templates for placeholder problems.
#[derive(Args, Debug)]
pub struct CheckCommand {
    /// Message catalog (.toml, .yaml or .yml)
    #[arg(short, long)]
    messages: PathBuf,

    /// JSON file describing a sample recipient
    #[arg(short, long)]
    recipient: Option<PathBuf>,

    /// Macro source as BASE=FILE (repeatable)
    #[arg(short, long = "source", value_parser = parse_source_arg)]
    sources: Vec<SourceArg>,
}

/// Placeholders and issues of one message.
#[derive(Debug, Default)]
struct MessageReport {
    placeholders: Vec<String>,
    issues: Vec<PlaceholderIssue>,
}

impl CheckCommand {
    pub async fn execute(self, settings: &Settings) -> Result<()> {
        let catalog = MessageCatalog::load(&self.messages, settings.error_policy).await?;

        let map = if self.recipient.is_some() || !self.sources.is_empty() {
            let mut macros = load_macros(&self.sources, settings).await?;
            if let Some(path) = &self.recipient {
                macros.set_macro(RECIPIENT_BASE_KEY, Arc::new(load_source(path).await?))?;
            }
            let pipeline = Pipeline::from_settings(settings)?;
            Some(macros.build(&pipeline.registry, &pipeline.extractor))
        } else {
            None
        };

        let mut issue_count = 0;
        let mut failing = 0;
        for (key, record) in catalog.iter() {
            let report = check_record(record, map.as_ref());
            println!("{}", key.to_string().bold());
            if report.placeholders.is_empty() {
                println!("  placeholders: {}", "none".dimmed());
            } else {
                println!("  placeholders: {}", report.placeholders.join(", "));
            }
            for issue in &report.issues {
                println!("  {}: {issue}", "warning".yellow());
            }
            if !report.issues.is_empty() {
                issue_count += report.issues.len();
                failing += 1;
            }
        }

        if issue_count > 0 {
            return Err(anyhow::anyhow!(
                "Found {issue_count} placeholder issue(s) in {failing} message(s)"
            ));
        }
        println!("{} {} message(s) checked", "✓".green(), catalog.len());
        Ok(())
    }
}

fn check_record(record: &MessageRecord, map: Option<&MacroStringMap>) -> MessageReport {
    let mut report = MessageReport::default();
    let templates = std::iter::once(record.body.as_str())
        .chain(record.title.as_deref())
        .chain(record.subtitle.as_deref());
    for template in templates {
        for placeholder in scan_placeholders(template) {
            let placeholder = placeholder.as_placeholder();
            if !report.placeholders.contains(&placeholder) {
                report.placeholders.push(placeholder);
            }
        }
        for issue in check_template(template, map) {
            if !report.issues.contains(&issue) {
                report.issues.push(issue);
            }
        }
    }
    report
}
