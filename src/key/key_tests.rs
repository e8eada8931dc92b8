use std::collections::HashMap;
use std::collections::HashSet;

use crate::core::{ErrorPolicy, MacroError};
use crate::key::{
    InvalidReason, KeySegment, MacroField, MacroKey, RecordKey, ValidKey, is_valid_segment,
};

#[test]
fn test_parse_round_trip() {
    for raw in ["A", "PLAYER", "PLAYER.LOCATION", "PLAYER.LOCATION.X", "A1_B.C_2", "X__"] {
        let key = MacroKey::parse(raw);
        let valid = key.is_valid().unwrap_or_else(|| panic!("{raw} should be valid"));
        assert_eq!(valid.to_string(), raw);
        assert_eq!(MacroKey::parse(&valid.to_string()), key);
    }
}

#[test]
fn test_append_composes_single_segments() {
    let key = MacroKey::parse("A").append("B").append("C");
    assert_eq!(key.to_string(), "A.B.C");
    assert_eq!(key.is_valid().unwrap().len(), 3);
}

#[test]
fn test_append_rejects_multi_segment_input() {
    let key = MacroKey::parse("A").append("B.C");
    assert_eq!(key.invalid_reason(), Some(InvalidReason::Malformed));
}

#[test]
fn test_append_rejects_bad_segments() {
    let base = MacroKey::parse("A");
    assert_eq!(base.append("").invalid_reason(), Some(InvalidReason::Blank));
    assert_eq!(base.append("lower").invalid_reason(), Some(InvalidReason::Malformed));
    assert_eq!(base.append("1ABC").invalid_reason(), Some(InvalidReason::Malformed));
}

#[test]
fn test_append_enum_segment() {
    let key = MacroKey::parse("PLAYER").append(MacroField::DisplayName);
    assert_eq!(key.to_string(), "PLAYER.DISPLAY_NAME");
}

#[test]
fn test_invalid_reasons_are_distinguishable() {
    assert_eq!(MacroKey::from_option(None).invalid_reason(), Some(InvalidReason::Null));
    assert_eq!(MacroKey::parse("").invalid_reason(), Some(InvalidReason::Blank));
    assert_eq!(MacroKey::parse("   ").invalid_reason(), Some(InvalidReason::Blank));
    assert_eq!(MacroKey::parse("123BAD").invalid_reason(), Some(InvalidReason::Malformed));
    assert_eq!(MacroKey::parse("has space").invalid_reason(), Some(InvalidReason::Malformed));
    assert_eq!(MacroKey::parse("A..B").invalid_reason(), Some(InvalidReason::Malformed));
    assert_eq!(MacroKey::parse("A.").invalid_reason(), Some(InvalidReason::Malformed));
    assert_eq!(MacroKey::parse(".A").invalid_reason(), Some(InvalidReason::Malformed));
    assert_eq!(MacroKey::parse("player").invalid_reason(), Some(InvalidReason::Malformed));
}

#[test]
fn test_invalid_propagates_through_operations() {
    let invalid = MacroKey::parse("bad key");
    let appended = invalid.append("X");
    assert_eq!(appended.invalid_reason(), Some(InvalidReason::Malformed));
    assert_eq!(invalid.base().invalid_reason(), Some(InvalidReason::Malformed));
    assert!(appended.is_valid().is_none());
}

#[test]
fn test_base_and_parent() {
    let key: ValidKey<crate::key::Macro> = "PLAYER.LOCATION.X".parse().unwrap();
    assert_eq!(key.base().as_str(), "PLAYER");
    assert!(key.base().is_base());
    assert_eq!(key.parent().unwrap().as_str(), "PLAYER.LOCATION");
    assert!(key.base().parent().is_none());
    assert_eq!(MacroKey::parse("A.B").base().to_string(), "A");
}

#[test]
fn test_starts_with() {
    let parent: ValidKey<crate::key::Macro> = "PLAYER".parse().unwrap();
    let child: ValidKey<crate::key::Macro> = "PLAYER.NAME".parse().unwrap();
    let other: ValidKey<crate::key::Macro> = "PLAYERS.NAME".parse().unwrap();
    assert!(child.starts_with(&parent));
    assert!(parent.starts_with(&parent));
    assert!(!other.starts_with(&parent));
}

#[test]
fn test_as_placeholder() {
    let key = MacroKey::parse("BASE").append("SUB");
    assert_eq!(key.is_valid().unwrap().as_placeholder(), "{BASE.SUB}");
}

#[test]
fn test_child_matches_append() {
    let base: ValidKey<crate::key::Macro> = "ITEM".parse().unwrap();
    for field in MacroField::ALL {
        assert!(is_valid_segment(field.as_str()), "{field} must be a valid segment");
        assert_eq!(base.append(field).is_valid(), Some(&base.child(field)));
    }
}

#[test]
fn test_equality_and_hash_are_structural() {
    let a = MacroKey::parse("A").append("B").into_valid().unwrap();
    let b: ValidKey<crate::key::Macro> = "A.B".parse().unwrap();
    assert_eq!(a, b);

    let mut set = HashSet::new();
    set.insert(a);
    assert!(set.contains(&b));
    // Borrow<str> lookups hash like the plain string
    assert!(set.contains("A.B"));
}

#[test]
fn test_from_segment() {
    assert_eq!(MacroKey::from_segment(MacroField::Owner).to_string(), "OWNER");
    assert_eq!(MacroKey::from_segment("A.B").invalid_reason(), Some(InvalidReason::Malformed));
    assert_eq!("NAME".segment(), "NAME");
}

#[test]
fn test_require_follows_policy() {
    let valid = RecordKey::parse("GRAVE.CREATED").require(ErrorPolicy::Strict).unwrap();
    assert_eq!(valid.unwrap().as_str(), "GRAVE.CREATED");

    let strict = RecordKey::parse("grave").require(ErrorPolicy::Strict);
    assert!(matches!(
        strict,
        Err(MacroError::InvalidKey {
            reason: InvalidReason::Malformed,
            ..
        })
    ));

    let lenient = RecordKey::from_option(None).require(ErrorPolicy::Lenient).unwrap();
    assert!(lenient.is_none());
}

#[test]
fn test_serde_round_trip() {
    let mut map: HashMap<String, ValidKey<crate::key::Record>> = HashMap::new();
    map.insert("k".to_string(), "GRAVE.CREATED".parse().unwrap());
    let json = serde_json::to_string(&map).unwrap();
    assert_eq!(json, r#"{"k":"GRAVE.CREATED"}"#);

    let back: HashMap<String, ValidKey<crate::key::Record>> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, map);

    let bad: Result<ValidKey<crate::key::Record>, _> = serde_json::from_str(r#""grave""#);
    assert!(bad.is_err());
}

#[test]
fn test_debug_shows_flavor() {
    let key: ValidKey<crate::key::Record> = "A".parse().unwrap();
    assert_eq!(format!("{key:?}"), "RecordKey(A)");
}
