//! Template substitution for message records.
//!
//! Templates are plain strings containing placeholder tokens: `{` followed by a
//! valid macro key followed by `}`, e.g. `{PLAYER.X}`. There is no
//! escaping mechanism and no control flow; this is not a general
//! template language.
//!
//! # Substitution
//!
//! [`substitute`] walks the template once, left to right. Every placeholder with a
//! value in the [`MacroStringMap`] is replaced; everything else, including
//! unresolved placeholders and stray braces, is copied through literally.
//! Substituted values are never re-scanned, so a value that itself looks like a
//! placeholder is emitted as-is.
//!
//! ```rust
//! use macromsg::extract::MacroStringMap;
//! use macromsg::templating::substitute;
//!
//! let mut macros = MacroStringMap::new();
//! macros.put("PLAYER", "Steve");
//!
//! assert_eq!(
//!     substitute("{PLAYER} died at {GRAVE.LOCATION}", &macros),
//!     "Steve died at {GRAVE.LOCATION}"
//! );
//! ```
//!
//! # Sources
//!
//! A [`MacroContext`] collects the objects attached to one message under their
//! base keys and turns them into a map through the accessor registry and field
//! extractor.
//!
//! # Diagnostics
//!
//! [`check_template`] reports tokens that look like placeholders but are not valid
//! keys, and placeholders that a given map cannot resolve.

mod context;
mod diagnostics;
mod renderer;


pub use context::MacroContext;
pub use diagnostics::{PlaceholderIssue, check_template};
pub use renderer::{scan_placeholders, substitute};

pub use crate::extract::MacroStringMap;
