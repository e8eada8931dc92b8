//! Placeholder scanning and substitution.

use regex::{Captures, Regex};
use std::sync::LazyLock;

use super::MacroStringMap;
use crate::key::{Macro, MacroKey, ValidKey};

/// `{` + dot-separated `[A-Z][A-Z0-9_]*` segments + `}`.
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{([A-Z][A-Z0-9_]*(?:\.[A-Z][A-Z0-9_]*)*)\}")
        .expect("placeholder pattern is a valid regex")
});

/// Anything brace-delimited that is made of key-like characters. Used only for
/// diagnostics; substitution ignores tokens that are not valid placeholders.
static CANDIDATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{([A-Za-z0-9_.]+)\}").expect("candidate pattern is a valid regex")
});

/// Replace every placeholder that has a value in `macros`.
///
/// Scanning is a single left-to-right pass; substituted values are never scanned
/// again. Unresolved placeholders and any text that is not a placeholder are
/// copied through unchanged.
pub fn substitute(template: &str, macros: &MacroStringMap) -> String {
    if macros.is_empty() {
        return template.to_string();
    }
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| match macros.get(&caps[1]) {
            Some(value) => value.to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// The distinct placeholders in `template`, in order of first appearance.
pub fn scan_placeholders(template: &str) -> Vec<ValidKey<Macro>> {
    let mut found: Vec<ValidKey<Macro>> = Vec::new();
    for caps in PLACEHOLDER.captures_iter(template) {
        if let Ok(key) = MacroKey::parse(&caps[1]).into_valid() {
            if !found.contains(&key) {
                found.push(key);
            }
        }
    }
    found
}

/// Brace-delimited tokens that look like placeholders but fail key validation,
/// in order of appearance.
pub(crate) fn scan_candidates(template: &str) -> impl Iterator<Item = &str> {
    CANDIDATE
        .captures_iter(template)
        .filter_map(|caps| caps.get(1))
        .map(|token| token.as_str())
        .filter(|token| MacroKey::parse(token).is_valid().is_none())
}
