//! User settings for the message pipeline.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::fs;

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, CONFIG_PATH_ENV, DEFAULT_SWEEP_INTERVAL_SECS,
};
use crate::core::{Clock, ErrorPolicy, MacroError};
use crate::extract::{DurationUnit, FieldExtractor, InstantStyle, LocaleContext, parse_zone};

/// Settings read from `config.toml`.
///
/// Every field has a default, so an empty file (or no file at all) is valid.
///
/// # Examples
///
/// ```rust
/// use macromsg::config::Settings;
/// use macromsg::core::ErrorPolicy;
///
/// let settings: Settings = toml::from_str("locale = \"de-DE\"\nerror_policy = \"strict\"").unwrap();
/// assert_eq!(settings.locale, "de-DE");
/// assert_eq!(settings.error_policy, ErrorPolicy::Strict);
/// assert_eq!(settings.timezone, "+00:00");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Locale tag used for instant formatting.
    #[serde(default = "default_locale")]
    pub locale: String,

    /// `UTC`, `Z` or a `+HH:MM` / `-HH:MM` offset.
    #[serde(default = "default_timezone")]
    pub timezone: String,

    #[serde(default)]
    pub duration_unit: DurationUnit,

    #[serde(default)]
    pub instant_style: InstantStyle,

    #[serde(default)]
    pub error_policy: ErrorPolicy,

    /// Worlds in which messages are delivered. Empty means every world.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enabled_worlds: Vec<String>,

    /// Period of the cooldown sweeper in seconds.
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

fn default_locale() -> String {
    "en-US".to_string()
}

fn default_timezone() -> String {
    "+00:00".to_string()
}

const fn default_sweep_interval_secs() -> u64 {
    DEFAULT_SWEEP_INTERVAL_SECS
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            timezone: default_timezone(),
            duration_unit: DurationUnit::default(),
            instant_style: InstantStyle::default(),
            error_policy: ErrorPolicy::default(),
            enabled_worlds: Vec::new(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

impl Settings {
    /// Load settings, looking in order at `path`, the `MACROMSG_CONFIG`
    /// environment variable and `~/.macromsg/config.toml`.
    ///
    /// A file that does not exist yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, or if
    /// no explicit path is given and the home directory cannot be determined.
    pub async fn load(path: Option<PathBuf>) -> Result<Self> {
        let path = match path {
            Some(path) => path,
            None => Self::default_path()?,
        };
        if path.exists() {
            Self::load_from(&path).await
        } else {
            tracing::debug!("No settings file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load settings from a specific file.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        let settings = Self::parse(&content, &path.display().to_string())?;
        tracing::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Parse a settings document. `origin` names it in errors.
    pub fn parse(content: &str, origin: &str) -> Result<Self, MacroError> {
        toml::from_str(content).map_err(|e| MacroError::ConfigParseError {
            file: origin.to_string(),
            reason: e.to_string(),
        })
    }

    /// The settings file used when no explicit path is given.
    ///
    /// `MACROMSG_CONFIG` wins over `~/.macromsg/config.toml`.
    pub fn default_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            if !path.is_empty() {
                return Ok(PathBuf::from(path));
            }
        }
        let home = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?;
        Ok(home.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// The locale and time zone described by these settings.
    pub fn locale_context(&self) -> Result<LocaleContext, MacroError> {
        Ok(LocaleContext::new(self.locale.clone(), parse_zone(&self.timezone)?))
    }

    /// A [`FieldExtractor`] configured from these settings.
    pub fn field_extractor(&self, clock: Arc<dyn Clock>) -> Result<FieldExtractor, MacroError> {
        Ok(FieldExtractor::new(clock)
            .with_locale(self.locale_context()?)
            .with_duration_unit(self.duration_unit)
            .with_instant_style(self.instant_style))
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs.max(1))
    }
}
