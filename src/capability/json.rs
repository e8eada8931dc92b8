//! A macro source backed by a JSON object.
//!
//! Used by the command line to feed ad-hoc objects into the pipeline. Each
//! capability is exposed only if the corresponding field is present and has the
//! expected shape; anything else in the object is ignored.
//!
//! ```json
//! {
//!   "name": "Steve",
//!   "uuid": "0b2ad3a4-5c7e-4b0a-9c55-3e0d2f5b8a11",
//!   "location": { "world": "overworld", "x": 11.5, "y": 64, "z": -3.2 },
//!   "expiration": "2024-05-01T12:00:00Z"
//! }
//! ```

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::time::Duration;
use uuid::Uuid;

use super::{
    Actor, DisplayNameable, Durationable, Expirable, Identifiable, Instantable, Killable,
    Linkable, Locatable, Location, Lootable, MacroSource, Nameable, Ownable, PluralNameable,
    Protectable, Quantifiable, Versioned,
};
use crate::core::MacroError;

/// Capabilities parsed out of a JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonSource {
    plural_name: Option<String>,
    display_name: Option<String>,
    name: Option<String>,
    duration: Option<Duration>,
    expiration: Option<DateTime<Utc>>,
    instant: Option<DateTime<Utc>>,
    owner: Option<Actor>,
    killer: Option<Actor>,
    looter: Option<Actor>,
    location: Option<Location>,
    quantity: Option<i64>,
    protection_expiration: Option<DateTime<Utc>>,
    uuid: Option<Uuid>,
    url: Option<String>,
    version: Option<String>,
}

impl JsonSource {
    /// Parse JSON text. `origin` names the input in error messages.
    pub fn parse(text: &str, origin: &str) -> Result<Self, MacroError> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| MacroError::SourceParseError {
                file: origin.to_string(),
                reason: e.to_string(),
            })?;
        Self::from_value(&value, origin)
    }

    /// Build from an already parsed value, which must be an object.
    pub fn from_value(value: &Value, origin: &str) -> Result<Self, MacroError> {
        let object = value.as_object().ok_or_else(|| MacroError::SourceParseError {
            file: origin.to_string(),
            reason: "expected a JSON object".to_string(),
        })?;

        Ok(Self {
            plural_name: string_field(object, "plural_name"),
            display_name: string_field(object, "display_name"),
            name: string_field(object, "name"),
            duration: object.get("duration_secs").and_then(Value::as_u64).map(Duration::from_secs),
            expiration: instant_field(object, "expiration"),
            instant: instant_field(object, "instant"),
            owner: object.get("owner").and_then(parse_actor),
            killer: object.get("killer").and_then(parse_actor),
            looter: object.get("looter").and_then(parse_actor),
            location: object.get("location").and_then(parse_location),
            quantity: object.get("quantity").and_then(Value::as_i64),
            protection_expiration: instant_field(object, "protection_expiration"),
            uuid: string_field(object, "uuid").and_then(|raw| Uuid::parse_str(&raw).ok()),
            url: string_field(object, "url"),
            version: string_field(object, "version"),
        })
    }
}

fn string_field(object: &Map<String, Value>, field: &str) -> Option<String> {
    object.get(field).and_then(Value::as_str).map(str::to_string)
}

fn instant_field(object: &Map<String, Value>, field: &str) -> Option<DateTime<Utc>> {
    object
        .get(field)
        .and_then(Value::as_str)
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|instant| instant.with_timezone(&Utc))
}

fn parse_actor(value: &Value) -> Option<Actor> {
    match value {
        Value::String(name) => Some(Actor::new(name.clone(), None)),
        Value::Object(object) => {
            let name = string_field(object, "name")?;
            let uuid = string_field(object, "uuid").and_then(|raw| Uuid::parse_str(&raw).ok());
            Some(Actor::new(name, uuid))
        }
        _ => None,
    }
}

fn parse_location(value: &Value) -> Option<Location> {
    let object = value.as_object()?;
    let coordinate = |axis: &str| object.get(axis).and_then(Value::as_f64);
    Some(Location {
        world: string_field(object, "world"),
        x: coordinate("x")?,
        y: coordinate("y")?,
        z: coordinate("z")?,
    })
}

impl PluralNameable for JsonSource {
    fn plural_name(&self) -> String {
        self.plural_name.clone().unwrap_or_default()
    }
}

impl DisplayNameable for JsonSource {
    fn display_name(&self) -> String {
        self.display_name.clone().unwrap_or_default()
    }
}

impl Nameable for JsonSource {
    fn name(&self) -> String {
        self.name.clone().unwrap_or_default()
    }
}

impl Durationable for JsonSource {
    fn duration(&self) -> Duration {
        self.duration.unwrap_or_default()
    }
}

impl Expirable for JsonSource {
    fn expiration(&self) -> DateTime<Utc> {
        self.expiration.unwrap_or_default()
    }
}

impl Instantable for JsonSource {
    fn instant(&self) -> DateTime<Utc> {
        self.instant.unwrap_or_default()
    }
}

impl Ownable for JsonSource {
    fn owner(&self) -> Actor {
        self.owner.clone().unwrap_or_else(|| Actor::new("", None))
    }
}

impl Killable for JsonSource {
    fn killer(&self) -> Actor {
        self.killer.clone().unwrap_or_else(|| Actor::new("", None))
    }
}

impl Lootable for JsonSource {
    fn looter(&self) -> Actor {
        self.looter.clone().unwrap_or_else(|| Actor::new("", None))
    }
}

impl Locatable for JsonSource {
    fn location(&self) -> Location {
        self.location.clone().unwrap_or_else(|| Location::new(None, 0.0, 0.0, 0.0))
    }
}

impl Quantifiable for JsonSource {
    fn quantity(&self) -> i64 {
        self.quantity.unwrap_or_default()
    }
}

impl Protectable for JsonSource {
    fn protection_expiration(&self) -> DateTime<Utc> {
        self.protection_expiration.unwrap_or_default()
    }
}

impl Identifiable for JsonSource {
    fn uuid(&self) -> Uuid {
        self.uuid.unwrap_or_default()
    }
}

impl Linkable for JsonSource {
    fn url(&self) -> String {
        self.url.clone().unwrap_or_default()
    }
}

impl Versioned for JsonSource {
    fn version(&self) -> String {
        self.version.clone().unwrap_or_default()
    }
}

impl MacroSource for JsonSource {
    fn as_plural_nameable(&self) -> Option<&dyn PluralNameable> {
        self.plural_name.as_ref().map(|_| self as &dyn PluralNameable)
    }

    fn as_display_nameable(&self) -> Option<&dyn DisplayNameable> {
        self.display_name.as_ref().map(|_| self as &dyn DisplayNameable)
    }

    fn as_nameable(&self) -> Option<&dyn Nameable> {
        self.name.as_ref().map(|_| self as &dyn Nameable)
    }

    fn as_durationable(&self) -> Option<&dyn Durationable> {
        self.duration.as_ref().map(|_| self as &dyn Durationable)
    }

    fn as_expirable(&self) -> Option<&dyn Expirable> {
        self.expiration.as_ref().map(|_| self as &dyn Expirable)
    }

    fn as_instantable(&self) -> Option<&dyn Instantable> {
        self.instant.as_ref().map(|_| self as &dyn Instantable)
    }

    fn as_ownable(&self) -> Option<&dyn Ownable> {
        self.owner.as_ref().map(|_| self as &dyn Ownable)
    }

    fn as_killable(&self) -> Option<&dyn Killable> {
        self.killer.as_ref().map(|_| self as &dyn Killable)
    }

    fn as_lootable(&self) -> Option<&dyn Lootable> {
        self.looter.as_ref().map(|_| self as &dyn Lootable)
    }

    fn as_locatable(&self) -> Option<&dyn Locatable> {
        self.location.as_ref().map(|_| self as &dyn Locatable)
    }

    fn as_quantifiable(&self) -> Option<&dyn Quantifiable> {
        self.quantity.as_ref().map(|_| self as &dyn Quantifiable)
    }

    fn as_protectable(&self) -> Option<&dyn Protectable> {
        self.protection_expiration.as_ref().map(|_| self as &dyn Protectable)
    }

    fn as_identifiable(&self) -> Option<&dyn Identifiable> {
        self.uuid.as_ref().map(|_| self as &dyn Identifiable)
    }

    fn as_linkable(&self) -> Option<&dyn Linkable> {
        self.url.as_ref().map(|_| self as &dyn Linkable)
    }

    fn as_versioned(&self) -> Option<&dyn Versioned> {
        self.version.as_ref().map(|_| self as &dyn Versioned)
    }
}
