//! Sub-key segments produced by built-in extraction.

use std::borrow::Cow;
use std::fmt;

use super::KeySegment;

/// Segment names appended under a base key by the field extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MacroField {
    /// Written by the name facet.
    Name,
    /// Written by the display-name facet.
    DisplayName,
    /// Written by the plural-name facet.
    NamePlural,
    /// Identity facet, and the id of an owner, killer or looter.
    Uuid,
    /// Location facet; holds the `<world> [x, y, z]` text.
    Location,
    /// `LOCATION.STRING`, same text as `LOCATION`.
    String,
    /// `LOCATION.WORLD`, `-` when the world is unknown.
    World,
    /// `LOCATION.X`, truncated block coordinate.
    X,
    /// `LOCATION.Y`, truncated block coordinate.
    Y,
    /// `LOCATION.Z`, truncated block coordinate.
    Z,
    /// Written by the quantity facet.
    Quantity,
    /// Duration facet, and the remaining time under a deadline.
    Duration,
    /// Instant facet, and the formatted instant under a deadline.
    Instant,
    /// Deadline written by the expiration facet.
    Expiration,
    /// Deadline written by the protection facet.
    Protection,
    /// Actor written by the owner facet.
    Owner,
    /// Actor written by the killer facet.
    Killer,
    /// Actor written by the looter facet.
    Looter,
    /// Written by the url facet.
    Url,
    /// Written by the version facet.
    Version,
}

impl MacroField {
    /// Every field, in declaration order.
    pub const ALL: [MacroField; 20] = [
        Self::Name,
        Self::DisplayName,
        Self::NamePlural,
        Self::Uuid,
        Self::Location,
        Self::String,
        Self::World,
        Self::X,
        Self::Y,
        Self::Z,
        Self::Quantity,
        Self::Duration,
        Self::Instant,
        Self::Expiration,
        Self::Protection,
        Self::Owner,
        Self::Killer,
        Self::Looter,
        Self::Url,
        Self::Version,
    ];

    /// The symbolic name used as the key segment.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "NAME",
            Self::DisplayName => "DISPLAY_NAME",
            Self::NamePlural => "NAME_PLURAL",
            Self::Uuid => "UUID",
            Self::Location => "LOCATION",
            Self::String => "STRING",
            Self::World => "WORLD",
            Self::X => "X",
            Self::Y => "Y",
            Self::Z => "Z",
            Self::Quantity => "QUANTITY",
            Self::Duration => "DURATION",
            Self::Instant => "INSTANT",
            Self::Expiration => "EXPIRATION",
            Self::Protection => "PROTECTION",
            Self::Owner => "OWNER",
            Self::Killer => "KILLER",
            Self::Looter => "LOOTER",
            Self::Url => "URL",
            Self::Version => "VERSION",
        }
    }
}

impl KeySegment for MacroField {
    fn segment(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

impl fmt::Display for MacroField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
