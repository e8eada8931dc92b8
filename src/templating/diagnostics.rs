//! Placeholder diagnostics used by `macromsg check`.

use std::fmt;
use strsim::levenshtein;

use super::MacroStringMap;
use super::renderer::{scan_candidates, scan_placeholders};
use crate::key::{InvalidReason, MacroKey};

/// Maximum edit distance for a suggestion, as a percentage of the token length.
const SIMILARITY_THRESHOLD_PERCENT: usize = 50;

/// A problem found in a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaceholderIssue {
    /// A brace-delimited token that is not a valid key and is therefore never
    /// substituted.
    Malformed {
        token: String,
        reason: InvalidReason,
        /// The upper-cased token, when that would be valid.
        suggestion: Option<String>,
    },
    /// A valid placeholder with no value in the supplied map.
    Unresolved {
        placeholder: String,
        /// Up to three close matches from the map, closest first.
        suggestions: Vec<String>,
    },
}

impl fmt::Display for PlaceholderIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed {
                token,
                reason,
                suggestion,
            } => {
                write!(f, "'{{{token}}}' is not a placeholder ({reason})")?;
                if let Some(suggestion) = suggestion {
                    write!(f, "; did you mean '{{{suggestion}}}'?")?;
                }
                Ok(())
            }
            Self::Unresolved {
                placeholder,
                suggestions,
            } => {
                write!(f, "'{{{placeholder}}}' has no value")?;
                if !suggestions.is_empty() {
                    let quoted: Vec<String> =
                        suggestions.iter().map(|s| format!("'{{{s}}}'")).collect();
                    write!(f, "; similar: {}", quoted.join(", "))?;
                }
                Ok(())
            }
        }
    }
}

/// Check a template for malformed tokens and, when `macros` is given, for
/// placeholders that would stay unresolved.
pub fn check_template(template: &str, macros: Option<&MacroStringMap>) -> Vec<PlaceholderIssue> {
    let mut issues: Vec<PlaceholderIssue> = scan_candidates(template)
        .map(|token| {
            let reason = MacroKey::parse(token).invalid_reason().unwrap_or(InvalidReason::Malformed);
            let upper = token.to_ascii_uppercase();
            let suggestion = MacroKey::parse(&upper).is_valid().map(|_| upper);
            PlaceholderIssue::Malformed {
                token: token.to_string(),
                reason,
                suggestion,
            }
        })
        .collect();

    if let Some(macros) = macros {
        let available: Vec<&str> = macros.keys().map(|k| k.as_str()).collect();
        for placeholder in scan_placeholders(template) {
            if macros.contains_key(placeholder.as_str()) {
                continue;
            }
            issues.push(PlaceholderIssue::Unresolved {
                suggestions: find_similar(placeholder.as_str(), &available),
                placeholder: placeholder.to_string(),
            });
        }
    }

    issues
}

/// Find similar keys using Levenshtein distance.
fn find_similar(target: &str, available: &[&str]) -> Vec<String> {
    let mut scored: Vec<(&str, usize)> =
        available.iter().map(|key| (*key, levenshtein(target, key))).collect();

    scored.sort_by_key(|(_, distance)| *distance);

    scored
        .into_iter()
        .filter(|(_, distance)| *distance <= target.len() * SIMILARITY_THRESHOLD_PERCENT / 100)
        .take(3)
        .map(|(key, _)| key.to_string())
        .collect()
}
