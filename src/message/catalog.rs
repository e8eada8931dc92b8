//! Message catalogs loaded from TOML or YAML.
//!
//! A catalog file holds a `messages` table. Tables containing a `body` field are
//! message records; any other table is a group whose name becomes a key segment,
//! so the two TOML documents below define the same record:
//!
//! ```toml
//! [messages."GRAVE.CREATED"]
//! body = "Your grave was created at {GRAVE.LOCATION}"
//! ```
//!
//! ```toml
//! [messages.GRAVE.CREATED]
//! body = "Your grave was created at {GRAVE.LOCATION}"
//! ```
//!
//! YAML catalogs use the same shape:
//!
//! ```yaml
//! messages:
//!   GRAVE:
//!     CREATED:
//!       body: "Your grave was created at {GRAVE.LOCATION}"
//!       repeat_delay: 30000
//! ```

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;

use super::MessageRecord;
use crate::constants::KEY_DELIMITER;
use crate::core::{ErrorPolicy, MacroError};
use crate::key::{Record, RecordKey, ValidKey};

/// Source of message records.
pub trait MessageProvider: Send + Sync {
    /// The record stored under `key`, if any.
    fn get(&self, key: &ValidKey<Record>) -> Option<Arc<MessageRecord>>;
}

/// On-disk catalog format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Toml,
    Yaml,
}

impl CatalogFormat {
    /// Pick the format from a file extension (`.toml`, `.yaml`, `.yml`).
    pub fn from_path(path: &Path) -> Result<Self, MacroError> {
        match path.extension().and_then(|ext| ext.to_str()).map(str::to_ascii_lowercase).as_deref()
        {
            Some("toml") => Ok(Self::Toml),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            _ => Err(MacroError::UnsupportedFormat {
                file: path.display().to_string(),
            }),
        }
    }
}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    messages: IndexMap<String, CatalogEntry>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogEntry {
    Record(MessageRecord),
    Group(IndexMap<String, CatalogEntry>),
}

/// An insertion-ordered set of message records.
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    messages: IndexMap<ValidKey<Record>, Arc<MessageRecord>>,
}

impl MessageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a record.
    pub fn insert(&mut self, key: ValidKey<Record>, record: MessageRecord) -> &mut Self {
        self.messages.insert(key, Arc::new(record));
        self
    }

    /// Parse a catalog document.
    ///
    /// `origin` names the document in errors. Records under invalid keys are an
    /// error under [`ErrorPolicy::Strict`] and are skipped otherwise.
    pub fn parse(
        text: &str,
        format: CatalogFormat,
        origin: &str,
        policy: ErrorPolicy,
    ) -> Result<Self, MacroError> {
        let parse_error = |reason: String| MacroError::CatalogParseError {
            file: origin.to_string(),
            reason,
        };
        let file: CatalogFile = match format {
            CatalogFormat::Toml => toml::from_str(text).map_err(|e| parse_error(e.to_string()))?,
            CatalogFormat::Yaml => {
                serde_yaml::from_str(text).map_err(|e| parse_error(e.to_string()))?
            }
        };

        let mut catalog = Self::new();
        for (name, entry) in file.messages {
            catalog.add_entry(&name, entry, policy)?;
        }
        tracing::debug!("Parsed {} message(s) from {origin}", catalog.len());
        Ok(catalog)
    }

    fn add_entry(
        &mut self,
        path: &str,
        entry: CatalogEntry,
        policy: ErrorPolicy,
    ) -> Result<(), MacroError> {
        match entry {
            CatalogEntry::Record(record) => {
                if let Some(key) = RecordKey::parse(path).require(policy)? {
                    self.insert(key, record);
                }
            }
            CatalogEntry::Group(children) => {
                for (name, child) in children {
                    self.add_entry(&format!("{path}{KEY_DELIMITER}{name}"), child, policy)?;
                }
            }
        }
        Ok(())
    }

    /// Load a catalog file, picking the format from its extension.
    pub async fn load(path: &Path, policy: ErrorPolicy) -> Result<Self> {
        let format = CatalogFormat::from_path(path)?;
        let text = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read message catalog: {}", path.display()))?;
        let catalog = Self::parse(&text, format, &path.display().to_string(), policy)?;
        tracing::info!("Loaded {} message(s) from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn get(&self, key: &str) -> Option<&Arc<MessageRecord>> {
        self.messages.get(key)
    }

    /// Keys in file order.
    pub fn keys(&self) -> impl Iterator<Item = &ValidKey<Record>> {
        self.messages.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ValidKey<Record>, &Arc<MessageRecord>)> {
        self.messages.iter()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl MessageProvider for MessageCatalog {
    fn get(&self, key: &ValidKey<Record>) -> Option<Arc<MessageRecord>> {
        self.messages.get(key).cloned()
    }
}
