//! Message definitions and their substituted form.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::constants::{DEFAULT_TITLE_FADE_IN, DEFAULT_TITLE_FADE_OUT, DEFAULT_TITLE_STAY};
use crate::key::{Record, ValidKey};

/// An immutable message definition.
///
/// Durations are written as integer milliseconds in catalog files:
///
/// ```toml
/// [messages."GRAVE.CREATED"]
/// body = "Your grave was created at {GRAVE.LOCATION}"
/// title = "Grave created"
/// repeat_delay = 30000
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MessageRecord {
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default = "default_fade_in", with = "duration_millis")]
    pub title_fade_in: Duration,
    #[serde(default = "default_stay", with = "duration_millis")]
    pub title_stay: Duration,
    #[serde(default = "default_fade_out", with = "duration_millis")]
    pub title_fade_out: Duration,
    /// Minimum time between two deliveries to the same recipient; zero disables
    /// the cooldown.
    #[serde(default, with = "duration_millis")]
    pub repeat_delay: Duration,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_fade_in() -> Duration {
    DEFAULT_TITLE_FADE_IN
}

fn default_stay() -> Duration {
    DEFAULT_TITLE_STAY
}

fn default_fade_out() -> Duration {
    DEFAULT_TITLE_FADE_OUT
}

const fn default_enabled() -> bool {
    true
}

impl MessageRecord {
    /// An enabled record with only a body and default timings.
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            title: None,
            subtitle: None,
            title_fade_in: DEFAULT_TITLE_FADE_IN,
            title_stay: DEFAULT_TITLE_STAY,
            title_fade_out: DEFAULT_TITLE_FADE_OUT,
            repeat_delay: Duration::ZERO,
            enabled: true,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn with_repeat_delay(mut self, delay: Duration) -> Self {
        self.repeat_delay = delay;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        u64::try_from(duration.as_millis()).unwrap_or(u64::MAX).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

/// A message record after substitution. Never mutated once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinalMessageRecord {
    key: ValidKey<Record>,
    #[serde(skip)]
    record: Arc<MessageRecord>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    subtitle: Option<String>,
}

impl FinalMessageRecord {
    pub fn new(
        key: ValidKey<Record>,
        record: Arc<MessageRecord>,
        message: String,
        title: Option<String>,
        subtitle: Option<String>,
    ) -> Self {
        Self {
            key,
            record,
            message,
            title,
            subtitle,
        }
    }

    pub fn key(&self) -> &ValidKey<Record> {
        &self.key
    }

    /// The definition this message was built from.
    pub fn record(&self) -> &MessageRecord {
        &self.record
    }

    /// The substituted body.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn subtitle(&self) -> Option<&str> {
        self.subtitle.as_deref()
    }

    pub fn title_fade_in(&self) -> Duration {
        self.record.title_fade_in
    }

    pub fn title_stay(&self) -> Duration {
        self.record.title_stay
    }

    pub fn title_fade_out(&self) -> Duration {
        self.record.title_fade_out
    }

    pub fn repeat_delay(&self) -> Duration {
        self.record.repeat_delay
    }
}
