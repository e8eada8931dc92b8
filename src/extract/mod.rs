//! Field extraction: capability views to flat string maps.
//!
//! For every (base key, adapter, view) triple the [`FieldExtractor`] writes a handful
//! of entries into a [`MacroStringMap`]:
//!
//! - facet specific sub-keys such as `BASE.NAME` or `BASE.LOCATION.X` are written
//!   unconditionally, so entries from different adapters never collide;
//! - the bare base key is written with `put_if_absent`, so the first adapter in
//!   registry order that produces a value for it wins.
//!
//! Temporal facets are formatted against an explicit [`LocaleContext`]; remaining
//! times of expirable and protected objects are measured against the injected
//! [`Clock`]. Extraction never fails: a view that does not match the adapter's facet
//! contributes nothing.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use macromsg::adapter::AccessorRegistry;
//! use macromsg::capability::JsonSource;
//! use macromsg::core::SystemClock;
//! use macromsg::extract::FieldExtractor;
//! use macromsg::key::{Macro, ValidKey};
//!
//! let source = JsonSource::parse(
//!     r#"{"name": "Steve", "location": {"world": "test-world", "x": 11, "y": 12, "z": 13}}"#,
//!     "inline",
//! )?;
//! let extractor = FieldExtractor::new(Arc::new(SystemClock));
//! let base: ValidKey<Macro> = "PLAYER".parse()?;
//! let map = extractor.extract_source(&base, &source, &AccessorRegistry::with_defaults());
//!
//! assert_eq!(map.get("PLAYER"), Some("Steve"));
//! assert_eq!(map.get("PLAYER.LOCATION"), Some("test-world [11, 12, 13]"));
//! assert_eq!(map.get("PLAYER.LOCATION.X"), Some("11"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod map;
mod temporal;


pub use map::MacroStringMap;
pub use temporal::{
    DurationUnit, InstantStyle, LocaleContext, format_duration, format_instant, parse_zone,
};

use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;

use crate::adapter::{AccessorRegistry, Adapter, Facet, View};
use crate::capability::{Actor, Location, MacroSource};
use crate::constants::NO_WORLD;
use crate::core::Clock;
use crate::key::{Macro, MacroField, ValidKey};

/// Converts adapted views into placeholder entries.
#[derive(Clone)]
pub struct FieldExtractor {
    locale: LocaleContext,
    duration_unit: DurationUnit,
    instant_style: InstantStyle,
    clock: Arc<dyn Clock>,
}

impl FieldExtractor {
    /// An extractor with the default locale (`en-US`, UTC), minute rounding and the
    /// medium instant style.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            locale: LocaleContext::default(),
            duration_unit: DurationUnit::default(),
            instant_style: InstantStyle::default(),
            clock,
        }
    }

    pub fn with_locale(mut self, locale: LocaleContext) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_duration_unit(mut self, unit: DurationUnit) -> Self {
        self.duration_unit = unit;
        self
    }

    pub fn with_instant_style(mut self, style: InstantStyle) -> Self {
        self.instant_style = style;
        self
    }

    pub fn locale(&self) -> &LocaleContext {
        &self.locale
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Extract one adapter's view into a fresh map.
    pub fn extract(
        &self,
        base: &ValidKey<Macro>,
        adapter: &dyn Adapter,
        view: View<'_>,
    ) -> MacroStringMap {
        let mut map = MacroStringMap::new();
        self.extract_into(&mut map, base, adapter, view);
        map
    }

    /// Extract one adapter's view into `map`.
    ///
    /// Base key precedence is decided by what `map` already holds, so calling this
    /// for several adapters in registry order yields first-registered-wins.
    pub fn extract_into(
        &self,
        map: &mut MacroStringMap,
        base: &ValidKey<Macro>,
        adapter: &dyn Adapter,
        view: View<'_>,
    ) {
        tracing::trace!("Extracting {base} with adapter '{}'", adapter.name());

        match (adapter.facet(), view) {
            (Facet::PluralName, View::PluralName(v)) => {
                put_scalar(map, base, MacroField::NamePlural, v.plural_name());
            }
            (Facet::DisplayName, View::DisplayName(v)) => {
                put_scalar(map, base, MacroField::DisplayName, v.display_name());
            }
            (Facet::Name, View::Name(v)) => {
                put_scalar(map, base, MacroField::Name, v.name());
            }
            (Facet::Duration, View::Duration(v)) => {
                self.put_duration(map, base, v.duration());
            }
            (Facet::Expiration, View::Expiration(v)) => {
                self.put_deadline(map, base, MacroField::Expiration, v.expiration());
            }
            (Facet::Instant, View::Instant(v)) => {
                self.put_instant(map, base, v.instant());
            }
            (Facet::Owner, View::Owner(v)) => {
                put_actor(map, base, MacroField::Owner, v.owner());
            }
            (Facet::Killer, View::Killer(v)) => {
                put_actor(map, base, MacroField::Killer, v.killer());
            }
            (Facet::Looter, View::Looter(v)) => {
                put_actor(map, base, MacroField::Looter, v.looter());
            }
            (Facet::Location, View::Location(v)) => {
                put_location(map, base, &v.location());
            }
            (Facet::Quantity, View::Quantity(v)) => {
                put_scalar(map, base, MacroField::Quantity, v.quantity().to_string());
            }
            (Facet::Protection, View::Protection(v)) => {
                self.put_deadline(map, base, MacroField::Protection, v.protection_expiration());
            }
            (Facet::Identity, View::Identity(v)) => {
                put_scalar(map, base, MacroField::Uuid, v.uuid().to_string());
            }
            (Facet::Url, View::Url(v)) => {
                put_scalar(map, base, MacroField::Url, v.url());
            }
            (Facet::Version, View::Version(v)) => {
                put_scalar(map, base, MacroField::Version, v.version());
            }
            (facet, view) => {
                tracing::trace!("No extraction for facet '{facet}' with {view:?}");
            }
        }
    }

    /// Run every adapter in `registry` that supports `source`, in registry order.
    pub fn extract_source(
        &self,
        base: &ValidKey<Macro>,
        source: &dyn MacroSource,
        registry: &AccessorRegistry,
    ) -> MacroStringMap {
        let mut map = MacroStringMap::new();
        self.extract_source_into(&mut map, base, source, registry);
        map
    }

    /// Like [`extract_source`](Self::extract_source), accumulating into `map`.
    pub fn extract_source_into(
        &self,
        map: &mut MacroStringMap,
        base: &ValidKey<Macro>,
        source: &dyn MacroSource,
        registry: &AccessorRegistry,
    ) {
        for adapter in registry.get_matching(Some(source)) {
            if let Some(view) = adapter.view(source) {
                self.extract_into(map, base, adapter, view);
            }
        }
    }

    fn put_duration(&self, map: &mut MacroStringMap, base: &ValidKey<Macro>, duration: Duration) {
        let text = format_duration(duration, self.duration_unit);
        map.put(base.child(MacroField::Duration), text.clone());
        map.put_if_absent(base, text);
    }

    fn put_instant(&self, map: &mut MacroStringMap, base: &ValidKey<Macro>, instant: DateTime<Utc>) {
        let text = format_instant(instant, &self.locale, self.instant_style);
        map.put(base.child(MacroField::Instant), text.clone());
        map.put_if_absent(base, text);
    }

    /// Composite of duration and instant under `BASE.<field>`; the base receives
    /// the remaining time.
    fn put_deadline(
        &self,
        map: &mut MacroStringMap,
        base: &ValidKey<Macro>,
        field: MacroField,
        deadline: DateTime<Utc>,
    ) {
        let sub = base.child(field);
        let remaining = (deadline - self.clock.now()).to_std().unwrap_or(Duration::ZERO);
        self.put_duration(map, &sub, remaining);
        self.put_instant(map, &sub, deadline);
        map.put_if_absent(base, format_duration(remaining, self.duration_unit));
    }
}

impl std::fmt::Debug for FieldExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldExtractor")
            .field("locale", &self.locale)
            .field("duration_unit", &self.duration_unit)
            .field("instant_style", &self.instant_style)
            .finish_non_exhaustive()
    }
}

fn put_scalar(map: &mut MacroStringMap, base: &ValidKey<Macro>, field: MacroField, value: String) {
    map.put(base.child(field), value.clone());
    map.put_if_absent(base, value);
}

fn put_actor(map: &mut MacroStringMap, base: &ValidKey<Macro>, field: MacroField, actor: Actor) {
    let sub = base.child(field);
    map.put(&sub, actor.name.clone());
    if let Some(uuid) = actor.uuid {
        map.put(sub.child(MacroField::Uuid), uuid.to_string());
    }
    map.put_if_absent(base, actor.name);
}

fn put_location(map: &mut MacroStringMap, base: &ValidKey<Macro>, location: &Location) {
    let (x, y, z) = location.block_coordinates();
    let world = location.world.as_deref().unwrap_or(NO_WORLD);
    let text = format!("{world} [{x}, {y}, {z}]");

    let sub = base.child(MacroField::Location);
    map.put(&sub, text.clone());
    map.put(sub.child(MacroField::String), text.clone());
    map.put(sub.child(MacroField::World), world);
    map.put(sub.child(MacroField::X), x.to_string());
    map.put(sub.child(MacroField::Y), y.to_string());
    map.put(sub.child(MacroField::Z), z.to_string());
    map.put_if_absent(base, text);
}
