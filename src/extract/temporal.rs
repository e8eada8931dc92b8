//! Locale-aware formatting of durations and instants.

use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::core::MacroError;

/// Locale and time zone used by temporal formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleContext {
    /// BCP 47 style tag such as `en-US` or `de-DE`.
    pub locale: String,
    pub zone: FixedOffset,
}

impl LocaleContext {
    pub fn new(locale: impl Into<String>, zone: FixedOffset) -> Self {
        Self {
            locale: locale.into(),
            zone,
        }
    }

    /// `true` for US English, which orders month before day and uses a 12-hour clock.
    pub fn is_us(&self) -> bool {
        self.locale.eq_ignore_ascii_case("en-US") || self.locale.eq_ignore_ascii_case("en_US")
    }
}

impl Default for LocaleContext {
    fn default() -> Self {
        Self::new("en-US", utc_offset())
    }
}

fn utc_offset() -> FixedOffset {
    Utc.fix()
}

/// Parse a time zone given as `UTC`, `Z` or `+HH:MM` / `-HH:MM`.
pub fn parse_zone(raw: &str) -> Result<FixedOffset, MacroError> {
    let invalid = || MacroError::InvalidSetting {
        name: "timezone".to_string(),
        value: raw.to_string(),
    };

    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("utc") || trimmed.eq_ignore_ascii_case("z") {
        return Ok(utc_offset());
    }

    let (sign, rest) = match trimmed.split_at_checked(1) {
        Some(("+", rest)) => (1, rest),
        Some(("-", rest)) => (-1, rest),
        _ => return Err(invalid()),
    };
    let (hours, minutes) = rest.split_once(':').unwrap_or((rest, "0"));
    let hours: i32 = hours.parse().map_err(|_| invalid())?;
    let minutes: i32 = minutes.parse().map_err(|_| invalid())?;
    if minutes >= 60 {
        return Err(invalid());
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}

/// Rounding unit for formatted durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationUnit {
    Seconds,
    #[default]
    Minutes,
    Hours,
    Days,
}

impl DurationUnit {
    fn seconds(self) -> u64 {
        match self {
            Self::Seconds => 1,
            Self::Minutes => 60,
            Self::Hours => 3_600,
            Self::Days => 86_400,
        }
    }

    fn plural(self) -> &'static str {
        match self {
            Self::Seconds => "seconds",
            Self::Minutes => "minutes",
            Self::Hours => "hours",
            Self::Days => "days",
        }
    }
}

impl FromStr for DurationUnit {
    type Err = MacroError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "seconds" => Ok(Self::Seconds),
            "minutes" => Ok(Self::Minutes),
            "hours" => Ok(Self::Hours),
            "days" => Ok(Self::Days),
            _ => Err(MacroError::InvalidSetting {
                name: "duration_unit".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for DurationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.plural())
    }
}

/// Display style for formatted instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstantStyle {
    Short,
    #[default]
    Medium,
    Long,
    Full,
}

impl InstantStyle {
    fn pattern(self, us: bool) -> &'static str {
        match (self, us) {
            (Self::Short, true) => "%-m/%-d/%y, %-I:%M %p",
            (Self::Medium, true) => "%b %-d, %Y, %-I:%M:%S %p",
            (Self::Long, true) => "%B %-d, %Y at %-I:%M:%S %p %:z",
            (Self::Full, true) => "%A, %B %-d, %Y at %-I:%M:%S %p %:z",
            (Self::Short, false) => "%d/%m/%y %H:%M",
            (Self::Medium, false) => "%-d %b %Y, %H:%M:%S",
            (Self::Long, false) => "%-d %B %Y at %H:%M:%S %:z",
            (Self::Full, false) => "%A, %-d %B %Y at %H:%M:%S %:z",
        }
    }
}

impl FromStr for InstantStyle {
    type Err = MacroError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "short" => Ok(Self::Short),
            "medium" => Ok(Self::Medium),
            "long" => Ok(Self::Long),
            "full" => Ok(Self::Full),
            _ => Err(MacroError::InvalidSetting {
                name: "instant_style".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Render a duration as English words, rounded half-up to `unit`.
///
/// Components smaller than the unit are dropped and zero components are
/// skipped, so 93 784 seconds in minutes reads `1 day, 2 hours, 3 minutes`.
/// A duration that rounds to nothing reads `0 <unit>`.
pub fn format_duration(duration: Duration, unit: DurationUnit) -> String {
    let unit_millis = u128::from(unit.seconds()) * 1000;
    let units = (duration.as_millis() + unit_millis / 2) / unit_millis;
    let mut remaining = units.saturating_mul(u128::from(unit.seconds()));

    let mut parts = Vec::new();
    for (size, singular, plural) in [
        (86_400u128, "day", "days"),
        (3_600, "hour", "hours"),
        (60, "minute", "minutes"),
        (1, "second", "seconds"),
    ] {
        if size < u128::from(unit.seconds()) {
            break;
        }
        let count = remaining / size;
        remaining %= size;
        if count > 0 {
            parts.push(format!("{count} {}", if count == 1 { singular } else { plural }));
        }
    }

    if parts.is_empty() {
        format!("0 {}", unit.plural())
    } else {
        parts.join(", ")
    }
}

/// Render an instant in the context's zone using the style's locale pattern.
pub fn format_instant(instant: DateTime<Utc>, locale: &LocaleContext, style: InstantStyle) -> String {
    instant.with_timezone(&locale.zone).format(style.pattern(locale.is_us())).to_string()
}
