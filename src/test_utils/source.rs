//! Builder for macro sources with an arbitrary capability set.

use chrono::{DateTime, Utc};
use std::time::Duration;
use uuid::Uuid;

use crate::capability::{
    Actor, DisplayNameable, Durationable, Expirable, Identifiable, Instantable, Killable, Linkable,
    Locatable, Location, Lootable, MacroSource, Nameable, Ownable, PluralNameable, Protectable,
    Quantifiable, Versioned,
};

/// A macro source exposing exactly the capabilities that were set on it.
///
/// ```rust,no_run
/// use macromsg::capability::Location;
/// use macromsg::test_utils::TestSource;
///
/// let grave = TestSource::new()
///     .name("grave")
///     .location(Location::new(Some("test-world"), 11.0, 12.0, 13.0))
///     .quantity(3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TestSource {
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
    protection: Option<DateTime<Utc>>,
    uuid: Option<Uuid>,
    url: Option<String>,
    version: Option<String>,
}

impl TestSource {
    /// A source with no capabilities.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plural_name(mut self, value: impl Into<String>) -> Self {
        self.plural_name = Some(value.into());
        self
    }

    pub fn display_name(mut self, value: impl Into<String>) -> Self {
        self.display_name = Some(value.into());
        self
    }

    pub fn name(mut self, value: impl Into<String>) -> Self {
        self.name = Some(value.into());
        self
    }

    pub fn duration(mut self, value: Duration) -> Self {
        self.duration = Some(value);
        self
    }

    pub fn expiration(mut self, value: DateTime<Utc>) -> Self {
        self.expiration = Some(value);
        self
    }

    pub fn instant(mut self, value: DateTime<Utc>) -> Self {
        self.instant = Some(value);
        self
    }

    pub fn owner(mut self, value: Actor) -> Self {
        self.owner = Some(value);
        self
    }

    pub fn killer(mut self, value: Actor) -> Self {
        self.killer = Some(value);
        self
    }

    pub fn looter(mut self, value: Actor) -> Self {
        self.looter = Some(value);
        self
    }

    pub fn location(mut self, value: Location) -> Self {
        self.location = Some(value);
        self
    }

    pub fn quantity(mut self, value: i64) -> Self {
        self.quantity = Some(value);
        self
    }

    pub fn protection(mut self, value: DateTime<Utc>) -> Self {
        self.protection = Some(value);
        self
    }

    pub fn uuid(mut self, value: Uuid) -> Self {
        self.uuid = Some(value);
        self
    }

    /// Shorthand for `uuid(Uuid::new_v4())`.
    pub fn random_uuid(self) -> Self {
        self.uuid(Uuid::new_v4())
    }

    pub fn url(mut self, value: impl Into<String>) -> Self {
        self.url = Some(value.into());
        self
    }

    pub fn version(mut self, value: impl Into<String>) -> Self {
        self.version = Some(value.into());
        self
    }

    /// The identity set with [`uuid`](Self::uuid), if any.
    pub fn id(&self) -> Option<Uuid> {
        self.uuid
    }
}

fn missing(facet: &str) -> ! {
    panic!("TestSource has no {facet}; its as_* accessor should have returned None")
}

impl PluralNameable for TestSource {
    fn plural_name(&self) -> String {
        self.plural_name.clone().unwrap_or_else(|| missing("plural name"))
    }
}

impl DisplayNameable for TestSource {
    fn display_name(&self) -> String {
        self.display_name.clone().unwrap_or_else(|| missing("display name"))
    }
}

impl Nameable for TestSource {
    fn name(&self) -> String {
        self.name.clone().unwrap_or_else(|| missing("name"))
    }
}

impl Durationable for TestSource {
    fn duration(&self) -> Duration {
        self.duration.unwrap_or_else(|| missing("duration"))
    }
}

impl Expirable for TestSource {
    fn expiration(&self) -> DateTime<Utc> {
        self.expiration.unwrap_or_else(|| missing("expiration"))
    }
}

impl Instantable for TestSource {
    fn instant(&self) -> DateTime<Utc> {
        self.instant.unwrap_or_else(|| missing("instant"))
    }
}

impl Ownable for TestSource {
    fn owner(&self) -> Actor {
        self.owner.clone().unwrap_or_else(|| missing("owner"))
    }
}

impl Killable for TestSource {
    fn killer(&self) -> Actor {
        self.killer.clone().unwrap_or_else(|| missing("killer"))
    }
}

impl Lootable for TestSource {
    fn looter(&self) -> Actor {
        self.looter.clone().unwrap_or_else(|| missing("looter"))
    }
}

impl Locatable for TestSource {
    fn location(&self) -> Location {
        self.location.clone().unwrap_or_else(|| missing("location"))
    }
}

impl Quantifiable for TestSource {
    fn quantity(&self) -> i64 {
        self.quantity.unwrap_or_else(|| missing("quantity"))
    }
}

impl Protectable for TestSource {
    fn protection_expiration(&self) -> DateTime<Utc> {
        self.protection.unwrap_or_else(|| missing("protection"))
    }
}

impl Identifiable for TestSource {
    fn uuid(&self) -> Uuid {
        self.uuid.unwrap_or_else(|| missing("uuid"))
    }
}

impl Linkable for TestSource {
    fn url(&self) -> String {
        self.url.clone().unwrap_or_else(|| missing("url"))
    }
}

impl Versioned for TestSource {
    fn version(&self) -> String {
        self.version.clone().unwrap_or_else(|| missing("version"))
    }
}

impl MacroSource for TestSource {
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
        self.duration.map(|_| self as &dyn Durationable)
    }

    fn as_expirable(&self) -> Option<&dyn Expirable> {
        self.expiration.map(|_| self as &dyn Expirable)
    }

    fn as_instantable(&self) -> Option<&dyn Instantable> {
        self.instant.map(|_| self as &dyn Instantable)
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
        self.quantity.map(|_| self as &dyn Quantifiable)
    }

    fn as_protectable(&self) -> Option<&dyn Protectable> {
        self.protection.map(|_| self as &dyn Protectable)
    }

    fn as_identifiable(&self) -> Option<&dyn Identifiable> {
        self.uuid.map(|_| self as &dyn Identifiable)
    }

    fn as_linkable(&self) -> Option<&dyn Linkable> {
        self.url.as_ref().map(|_| self as &dyn Linkable)
    }

    fn as_versioned(&self) -> Option<&dyn Versioned> {
        self.version.as_ref().map(|_| self as &dyn Versioned)
    }
}
