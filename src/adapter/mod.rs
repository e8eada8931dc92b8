//! Capability adapters.
//!
//! An adapter tests whether a [`MacroSource`] exposes one capability and, if it
//! does, hands out the narrow [`View`] onto it. Adapters are stateless and are
//! consulted in registration order by the [`AccessorRegistry`]; that order is the
//! only thing deciding which facet claims a bare base placeholder.
//!
//! The fifteen built-in facets are covered by [`FacetAdapter`]. Hosts can register
//! their own [`Adapter`] implementations alongside them without touching the
//! dispatch code.

mod registry;

pub use registry::AccessorRegistry;

use std::fmt;

use crate::capability::{
    DisplayNameable, Durationable, Expirable, Identifiable, Instantable, Killable, Linkable,
    Locatable, Lootable, MacroSource, Nameable, Ownable, PluralNameable, Protectable,
    Quantifiable, Versioned,
};

/// The built-in capability facets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facet {
    PluralName,
    DisplayName,
    Name,
    Duration,
    Expiration,
    Instant,
    Owner,
    Killer,
    Looter,
    Location,
    Quantity,
    Protection,
    Identity,
    Url,
    Version,
}

impl Facet {
    /// Default registry order: more specific, higher-value facets first.
    pub const DEFAULT_ORDER: [Facet; 15] = [
        Self::PluralName,
        Self::DisplayName,
        Self::Name,
        Self::Duration,
        Self::Expiration,
        Self::Instant,
        Self::Owner,
        Self::Killer,
        Self::Looter,
        Self::Location,
        Self::Quantity,
        Self::Protection,
        Self::Identity,
        Self::Url,
        Self::Version,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PluralName => "plural-name",
            Self::DisplayName => "display-name",
            Self::Name => "name",
            Self::Duration => "duration",
            Self::Expiration => "expiration",
            Self::Instant => "instant",
            Self::Owner => "owner",
            Self::Killer => "killer",
            Self::Looter => "looter",
            Self::Location => "location",
            Self::Quantity => "quantity",
            Self::Protection => "protection",
            Self::Identity => "identity",
            Self::Url => "url",
            Self::Version => "version",
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An adapted view onto one capability of a source.
#[derive(Clone, Copy)]
pub enum View<'a> {
    PluralName(&'a dyn PluralNameable),
    DisplayName(&'a dyn DisplayNameable),
    Name(&'a dyn Nameable),
    Duration(&'a dyn Durationable),
    Expiration(&'a dyn Expirable),
    Instant(&'a dyn Instantable),
    Owner(&'a dyn Ownable),
    Killer(&'a dyn Killable),
    Looter(&'a dyn Lootable),
    Location(&'a dyn Locatable),
    Quantity(&'a dyn Quantifiable),
    Protection(&'a dyn Protectable),
    Identity(&'a dyn Identifiable),
    Url(&'a dyn Linkable),
    Version(&'a dyn Versioned),
}

impl View<'_> {
    /// The facet this view belongs to.
    pub fn facet(&self) -> Facet {
        match self {
            View::PluralName(_) => Facet::PluralName,
            View::DisplayName(_) => Facet::DisplayName,
            View::Name(_) => Facet::Name,
            View::Duration(_) => Facet::Duration,
            View::Expiration(_) => Facet::Expiration,
            View::Instant(_) => Facet::Instant,
            View::Owner(_) => Facet::Owner,
            View::Killer(_) => Facet::Killer,
            View::Looter(_) => Facet::Looter,
            View::Location(_) => Facet::Location,
            View::Quantity(_) => Facet::Quantity,
            View::Protection(_) => Facet::Protection,
            View::Identity(_) => Facet::Identity,
            View::Url(_) => Facet::Url,
            View::Version(_) => Facet::Version,
        }
    }
}

impl fmt::Debug for View<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "View({})", self.facet())
    }
}

/// A strategy probing sources for one capability.
pub trait Adapter: Send + Sync {
    /// The facet whose extraction rules apply to this adapter's views.
    fn facet(&self) -> Facet;

    /// The adapted view, or `None` if the source lacks the capability.
    fn view<'a>(&self, source: &'a dyn MacroSource) -> Option<View<'a>>;

    /// Whether the source exposes the capability.
    fn supports(&self, source: &dyn MacroSource) -> bool {
        self.view(source).is_some()
    }

    /// Name used in logs.
    fn name(&self) -> &str {
        self.facet().as_str()
    }
}

/// Built-in adapter for one [`Facet`], probing through [`MacroSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FacetAdapter {
    facet: Facet,
}

impl FacetAdapter {
    pub const fn new(facet: Facet) -> Self {
        Self {
            facet,
        }
    }
}

impl Adapter for FacetAdapter {
    fn facet(&self) -> Facet {
        self.facet
    }

    fn view<'a>(&self, source: &'a dyn MacroSource) -> Option<View<'a>> {
        match self.facet {
            Facet::PluralName => source.as_plural_nameable().map(View::PluralName),
            Facet::DisplayName => source.as_display_nameable().map(View::DisplayName),
            Facet::Name => source.as_nameable().map(View::Name),
            Facet::Duration => source.as_durationable().map(View::Duration),
            Facet::Expiration => source.as_expirable().map(View::Expiration),
            Facet::Instant => source.as_instantable().map(View::Instant),
            Facet::Owner => source.as_ownable().map(View::Owner),
            Facet::Killer => source.as_killable().map(View::Killer),
            Facet::Looter => source.as_lootable().map(View::Looter),
            Facet::Location => source.as_locatable().map(View::Location),
            Facet::Quantity => source.as_quantifiable().map(View::Quantity),
            Facet::Protection => source.as_protectable().map(View::Protection),
            Facet::Identity => source.as_identifiable().map(View::Identity),
            Facet::Url => source.as_linkable().map(View::Url),
            Facet::Version => source.as_versioned().map(View::Version),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::JsonSource;
    use serde_json::json;

    #[test]
    fn test_facet_adapter_views_match_facet() {
        let source = JsonSource::from_value(
            &json!({
                "plural_name": "Graves", "display_name": "Grave", "name": "grave",
                "duration_secs": 60, "expiration": "2024-01-01T00:00:00Z",
                "instant": "2024-01-01T00:00:00Z", "owner": "a", "killer": "b", "looter": "c",
                "location": { "x": 0, "y": 0, "z": 0 }, "quantity": 1,
                "protection_expiration": "2024-01-01T00:00:00Z",
                "uuid": "0b2ad3a4-5c7e-4b0a-9c55-3e0d2f5b8a11", "url": "u", "version": "v"
            }),
            "t",
        )
        .unwrap();

        for facet in Facet::DEFAULT_ORDER {
            let adapter = FacetAdapter::new(facet);
            let view = adapter.view(&source).unwrap_or_else(|| panic!("{facet} should match"));
            assert_eq!(view.facet(), facet);
            assert!(adapter.supports(&source));
        }
    }

    #[test]
    fn test_facet_adapter_rejects_missing_capability() {
        let source = JsonSource::from_value(&json!({ "name": "grave" }), "t").unwrap();
        assert!(FacetAdapter::new(Facet::Name).supports(&source));
        assert!(!FacetAdapter::new(Facet::Location).supports(&source));
        assert_eq!(FacetAdapter::new(Facet::Location).name(), "location");
    }
}
