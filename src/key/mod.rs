//! Validated hierarchical keys.
//!
//! Keys name both message records (`GRAVE.CREATED`) and placeholder values
//! (`PLAYER.LOCATION.X`). A key is a sequence of segments joined by `.` where every
//! segment matches `[A-Z][A-Z0-9_]*`.
//!
//! Parsing never fails: [`Key::parse`] returns either a [`ValidKey`] or an
//! [`InvalidKey`] carrying an [`InvalidReason`]. Invalid keys flow through the
//! pipeline as ordinary values until a caller unwraps them with
//! [`Key::is_valid`], [`Key::into_valid`] or [`Key::require`].
//!
//! Two flavors share the same algebra: [`RecordKey`] for message lookups and
//! [`MacroKey`] for placeholders. The flavor is a zero-sized type parameter, so a
//! record key cannot be used where a macro key is expected.
//!
//! ```rust
//! use macromsg::key::{MacroKey, MacroField};
//!
//! let key = MacroKey::parse("PLAYER").append("LOCATION").append(MacroField::X);
//! assert_eq!(key.to_string(), "PLAYER.LOCATION.X");
//! assert_eq!(key.is_valid().unwrap().as_placeholder(), "{PLAYER.LOCATION.X}");
//! ```

mod field;

#[cfg(test)]
mod key_tests;

pub use field::MacroField;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::{Borrow, Cow};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::str::FromStr;

use crate::constants::{KEY_DELIMITER, PLACEHOLDER_CLOSE, PLACEHOLDER_OPEN};
use crate::core::{ErrorPolicy, MacroError};

/// Marker trait distinguishing the key flavors.
pub trait KeyFlavor: 'static {
    /// Short name used in debug output.
    const NAME: &'static str;
}

/// Flavor of keys that identify message records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Record;

/// Flavor of keys that name placeholder values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Macro;

impl KeyFlavor for Record {
    const NAME: &'static str = "RecordKey";
}

impl KeyFlavor for Macro {
    const NAME: &'static str = "MacroKey";
}

/// A key identifying a message record.
pub type RecordKey = Key<Record>;

/// A key naming a placeholder value.
pub type MacroKey = Key<Macro>;

/// Why a key failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidReason {
    /// No input was supplied.
    Null,
    /// The input was empty or whitespace only.
    Blank,
    /// At least one segment does not match `[A-Z][A-Z0-9_]*`.
    Malformed,
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Null => "null",
            Self::Blank => "blank",
            Self::Malformed => "malformed",
        })
    }
}

/// A rejected key: the reason plus the raw input, when there was one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InvalidKey {
    reason: InvalidReason,
    raw: Option<String>,
}

impl InvalidKey {
    fn new(reason: InvalidReason, raw: Option<&str>) -> Self {
        Self {
            reason,
            raw: raw.map(str::to_string),
        }
    }

    /// Why validation failed.
    pub fn reason(&self) -> InvalidReason {
        self.reason
    }

    /// The rejected input (`None` for a null input).
    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    /// Convert into the error reported at public entry points.
    pub fn to_error(&self) -> MacroError {
        MacroError::InvalidKey {
            raw: self.raw.clone().unwrap_or_else(|| "<null>".to_string()),
            reason: self.reason,
        }
    }
}

impl fmt::Display for InvalidKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.raw {
            Some(raw) => write!(f, "invalid key '{raw}' ({})", self.reason),
            None => write!(f, "invalid key ({})", self.reason),
        }
    }
}

impl std::error::Error for InvalidKey {}

/// Anything that can be appended to a key as a single segment.
///
/// Implemented for string types and for enums with a symbolic name such as
/// [`MacroField`]. The symbolic name is validated with the same segment grammar.
pub trait KeySegment {
    /// The segment text.
    fn segment(&self) -> Cow<'_, str>;
}

impl KeySegment for str {
    fn segment(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl KeySegment for String {
    fn segment(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

impl<T: KeySegment + ?Sized> KeySegment for &T {
    fn segment(&self) -> Cow<'_, str> {
        (**self).segment()
    }
}

/// Check a single segment against `[A-Z][A-Z0-9_]*`.
pub fn is_valid_segment(segment: &str) -> bool {
    let mut chars = segment.chars();
    matches!(chars.next(), Some(first) if first.is_ascii_uppercase())
        && chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

fn validate(raw: &str) -> Result<(), InvalidReason> {
    if raw.trim().is_empty() {
        return Err(InvalidReason::Blank);
    }
    if raw.split(KEY_DELIMITER).all(is_valid_segment) {
        Ok(())
    } else {
        Err(InvalidReason::Malformed)
    }
}

/// A key that passed validation.
///
/// Equality, ordering and hashing are structural over the full path. `ValidKey`
/// borrows as `str`, so maps keyed by it can be queried with a plain string.
pub struct ValidKey<F: KeyFlavor> {
    path: String,
    flavor: PhantomData<fn() -> F>,
}

impl<F: KeyFlavor> ValidKey<F> {
    /// Wrap a path that is already known to be valid.
    fn from_trusted(path: String) -> Self {
        debug_assert!(validate(&path).is_ok(), "untrusted key path: {path}");
        Self {
            path,
            flavor: PhantomData,
        }
    }

    /// The dotted path.
    pub fn as_str(&self) -> &str {
        &self.path
    }

    /// Iterate over the path segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.path.split(KEY_DELIMITER)
    }

    /// Number of segments (always at least one).
    pub fn len(&self) -> usize {
        self.segments().count()
    }

    /// Always `false`; a valid key has at least one segment.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The first segment as a key of its own.
    pub fn base(&self) -> ValidKey<F> {
        match self.path.split_once(KEY_DELIMITER) {
            Some((base, _)) => Self::from_trusted(base.to_string()),
            None => self.clone(),
        }
    }

    /// `true` if this key consists of a single segment.
    pub fn is_base(&self) -> bool {
        !self.path.contains(KEY_DELIMITER)
    }

    /// The key without its last segment, or `None` for a base key.
    pub fn parent(&self) -> Option<ValidKey<F>> {
        self.path
            .rsplit_once(KEY_DELIMITER)
            .map(|(parent, _)| Self::from_trusted(parent.to_string()))
    }

    /// Append one segment.
    ///
    /// Returns an invalid key if the segment is blank, malformed, or contains the
    /// delimiter: append never adds more than one segment.
    pub fn append(&self, segment: impl KeySegment) -> Key<F> {
        let segment = segment.segment();
        if segment.trim().is_empty() {
            return Key::Invalid(InvalidKey::new(InvalidReason::Blank, Some(&segment)));
        }
        if !is_valid_segment(&segment) {
            return Key::Invalid(InvalidKey::new(InvalidReason::Malformed, Some(&segment)));
        }
        Key::Valid(Self::from_trusted(format!("{}{KEY_DELIMITER}{segment}", self.path)))
    }

    /// Append a built-in field. Infallible because field names are valid segments.
    pub fn child(&self, field: MacroField) -> ValidKey<F> {
        Self::from_trusted(format!("{}{KEY_DELIMITER}{}", self.path, field.as_str()))
    }

    /// `true` if `self` equals `prefix` or lies underneath it.
    pub fn starts_with(&self, prefix: &ValidKey<F>) -> bool {
        self.path == prefix.path
            || (self.path.starts_with(&prefix.path)
                && self.path[prefix.path.len()..].starts_with(KEY_DELIMITER))
    }

    /// The key wrapped in placeholder delimiters, e.g. `{BASE.SUB}`.
    pub fn as_placeholder(&self) -> String {
        format!("{PLACEHOLDER_OPEN}{}{PLACEHOLDER_CLOSE}", self.path)
    }
}

impl<F: KeyFlavor> Clone for ValidKey<F> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            flavor: PhantomData,
        }
    }
}

impl<F: KeyFlavor> PartialEq for ValidKey<F> {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl<F: KeyFlavor> Eq for ValidKey<F> {}

impl<F: KeyFlavor> PartialOrd for ValidKey<F> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<F: KeyFlavor> Ord for ValidKey<F> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.path.cmp(&other.path)
    }
}

// Must hash exactly like `str` for the `Borrow<str>` lookups to work.
impl<F: KeyFlavor> Hash for ValidKey<F> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.as_str().hash(state);
    }
}

impl<F: KeyFlavor> Borrow<str> for ValidKey<F> {
    fn borrow(&self) -> &str {
        &self.path
    }
}

impl<F: KeyFlavor> AsRef<str> for ValidKey<F> {
    fn as_ref(&self) -> &str {
        &self.path
    }
}

impl<F: KeyFlavor> fmt::Display for ValidKey<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

impl<F: KeyFlavor> fmt::Debug for ValidKey<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", F::NAME, self.path)
    }
}

impl<F: KeyFlavor> FromStr for ValidKey<F> {
    type Err = InvalidKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Key::parse(s).into_valid()
    }
}

impl<F: KeyFlavor> Serialize for ValidKey<F> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.path)
    }
}

impl<'de, F: KeyFlavor> Deserialize<'de> for ValidKey<F> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Result of parsing a key: valid, or invalid with a reason.
pub enum Key<F: KeyFlavor> {
    /// A key that passed validation.
    Valid(ValidKey<F>),
    /// A rejected key.
    Invalid(InvalidKey),
}

impl<F: KeyFlavor> Key<F> {
    /// Parse a dotted key. Never fails; bad input yields [`Key::Invalid`].
    ///
    /// Blank input is classified as [`InvalidReason::Blank`] before the segment
    /// grammar is checked.
    pub fn parse(raw: &str) -> Self {
        match validate(raw) {
            Ok(()) => Key::Valid(ValidKey::from_trusted(raw.to_string())),
            Err(reason) => Key::Invalid(InvalidKey::new(reason, Some(raw))),
        }
    }

    /// Parse an optional input; `None` yields [`InvalidReason::Null`].
    pub fn from_option(raw: Option<&str>) -> Self {
        match raw {
            Some(raw) => Self::parse(raw),
            None => Key::Invalid(InvalidKey::new(InvalidReason::Null, None)),
        }
    }

    /// Build a single-segment key from an enum or string segment.
    pub fn from_segment(segment: impl KeySegment) -> Self {
        let segment = segment.segment();
        if segment.contains(KEY_DELIMITER) {
            return Key::Invalid(InvalidKey::new(InvalidReason::Malformed, Some(&segment)));
        }
        Self::parse(&segment)
    }

    /// The valid key, if any. This is the only way to get a key usable for map
    /// storage or placeholder generation.
    pub fn is_valid(&self) -> Option<&ValidKey<F>> {
        match self {
            Key::Valid(key) => Some(key),
            Key::Invalid(_) => None,
        }
    }

    /// Consume into the valid key or the rejection.
    pub fn into_valid(self) -> Result<ValidKey<F>, InvalidKey> {
        match self {
            Key::Valid(key) => Ok(key),
            Key::Invalid(invalid) => Err(invalid),
        }
    }

    /// Why the key is invalid, or `None` if it is valid.
    pub fn invalid_reason(&self) -> Option<InvalidReason> {
        match self {
            Key::Valid(_) => None,
            Key::Invalid(invalid) => Some(invalid.reason()),
        }
    }

    /// The first segment; invalid keys stay invalid.
    pub fn base(&self) -> Key<F> {
        match self {
            Key::Valid(key) => Key::Valid(key.base()),
            Key::Invalid(invalid) => Key::Invalid(invalid.clone()),
        }
    }

    /// Append one segment; invalid keys stay invalid.
    pub fn append(&self, segment: impl KeySegment) -> Key<F> {
        match self {
            Key::Valid(key) => key.append(segment),
            Key::Invalid(invalid) => Key::Invalid(invalid.clone()),
        }
    }

    /// Unwrap at a public entry point.
    ///
    /// Returns `Ok(Some(key))` for a valid key. For an invalid key the policy
    /// decides: strict returns the error, lenient logs it and yields `Ok(None)`.
    pub fn require(self, policy: ErrorPolicy) -> Result<Option<ValidKey<F>>, MacroError> {
        match self {
            Key::Valid(key) => Ok(Some(key)),
            Key::Invalid(invalid) => policy.handle(invalid.to_error(), None),
        }
    }
}

impl<F: KeyFlavor> Clone for Key<F> {
    fn clone(&self) -> Self {
        match self {
            Key::Valid(key) => Key::Valid(key.clone()),
            Key::Invalid(invalid) => Key::Invalid(invalid.clone()),
        }
    }
}

impl<F: KeyFlavor> PartialEq for Key<F> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Key::Valid(a), Key::Valid(b)) => a == b,
            (Key::Invalid(a), Key::Invalid(b)) => a == b,
            _ => false,
        }
    }
}

impl<F: KeyFlavor> Eq for Key<F> {}

impl<F: KeyFlavor> fmt::Debug for Key<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Valid(key) => write!(f, "Valid({key:?})"),
            Key::Invalid(invalid) => write!(f, "Invalid({invalid:?})"),
        }
    }
}

impl<F: KeyFlavor> fmt::Display for Key<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Valid(key) => key.fmt(f),
            Key::Invalid(invalid) => invalid.fmt(f),
        }
    }
}

impl<F: KeyFlavor> From<ValidKey<F>> for Key<F> {
    fn from(key: ValidKey<F>) -> Self {
        Key::Valid(key)
    }
}

impl<F: KeyFlavor> From<&ValidKey<F>> for Key<F> {
    fn from(key: &ValidKey<F>) -> Self {
        Key::Valid(key.clone())
    }
}

impl<F: KeyFlavor> From<&str> for Key<F> {
    fn from(raw: &str) -> Self {
        Key::parse(raw)
    }
}

impl<F: KeyFlavor> From<MacroField> for Key<F> {
    fn from(field: MacroField) -> Self {
        Key::Valid(ValidKey::from_trusted(field.as_str().to_string()))
    }
}
