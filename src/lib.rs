//! macromsg - placeholder substitution and message dispatch
//!
//! macromsg turns message templates such as
//! `"Your grave was created at {GRAVE.LOCATION}"` into final text by extracting
//! named values from arbitrary domain objects. Objects are never inspected by
//! concrete type: they describe themselves through capability views (name,
//! location, owner, expiration, ...), and every capability an object exposes
//! contributes a family of keys to a flat macro map.
//!
//! # Architecture Overview
//!
//! ```text
//! MacroSource ──as_*───▶ AccessorRegistry ──adapters in order──▶ FieldExtractor
//!                                                                    │
//!                                                                    ▼
//! MessageCatalog ──record──▶ MessageDispatcher ◀── MacroStringMap ───┘
//!                                 │   │
//!                     substitute  │   └──▶ CooldownMap (per recipient + message)
//!                                 ▼
//!                            MessageSink
//! ```
//!
//! Adapter order is the only precedence rule. When two capabilities could both
//! claim a bare `{BASE}` placeholder, the adapter registered first wins; every
//! qualified sub-key (`{BASE.NAME}`, `{BASE.LOCATION.X}`) is always written.
//!
//! # Core Modules
//!
//! ## Pipeline
//! - [`key`] - Validated hierarchical keys for records and placeholders
//! - [`capability`] - Capability views and the [`MacroSource`](capability::MacroSource) trait
//! - [`adapter`] - Facet adapters and the ordered [`AccessorRegistry`](adapter::AccessorRegistry)
//! - [`extract`] - The [`FieldExtractor`](extract::FieldExtractor) and locale-aware formatting
//! - [`templating`] - Placeholder substitution, macro contexts and diagnostics
//!
//! ## Delivery
//! - [`message`] - Message records, catalogs, sinks and the dispatcher
//! - [`cache`] - Per-recipient cooldowns with a background sweeper
//!
//! ## Supporting Modules
//! - [`core`] - Errors, the strict/lenient error policy and clocks
//! - [`config`] - Settings file loading
//! - [`cli`] - The `macromsg` command-line front end
//! - [`constants`] - Delimiters, default timings and environment variable names
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use macromsg::adapter::AccessorRegistry;
//! use macromsg::capability::JsonSource;
//! use macromsg::core::{ErrorPolicy, SystemClock};
//! use macromsg::extract::FieldExtractor;
//! use macromsg::templating::{MacroContext, substitute};
//!
//! # fn main() -> anyhow::Result<()> {
//! let grave = JsonSource::parse(
//!     r#"{"name": "grave", "location": {"world": "overworld", "x": 1, "y": 64, "z": 2}}"#,
//!     "grave.json",
//! )?;
//!
//! let mut macros = MacroContext::new(ErrorPolicy::Strict);
//! macros.set_macro("GRAVE", Arc::new(grave))?;
//!
//! let registry = AccessorRegistry::with_defaults();
//! let extractor = FieldExtractor::new(Arc::new(SystemClock));
//! let map = macros.build(&registry, &extractor);
//!
//! assert_eq!(
//!     substitute("Your {GRAVE} is in {GRAVE.LOCATION.WORLD}", &map),
//!     "Your grave is in overworld"
//! );
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod cache;
pub mod capability;
pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod extract;
pub mod key;
pub mod message;
pub mod templating;

// test_utils is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
