//! Core types for macromsg
//!
//! This module holds the pieces every other module leans on:
//!
//! - [`MacroError`] / [`ErrorContext`] / [`user_friendly_error`] - typed errors and
//!   their CLI presentation
//! - [`ErrorPolicy`] - the injected strict/lenient decision made at public entry points
//! - [`Clock`] - the time source used by cooldowns and expiration extraction
//!
//! # Error Handling Pattern
//!
//! ```rust
//! use macromsg::core::{ErrorPolicy, MacroError};
//!
//! let error = MacroError::MessageNotFound { key: "A".to_string() };
//! // Lenient callers get the fallback and a warning in the log
//! let value = ErrorPolicy::Lenient.handle(error, String::new()).unwrap();
//! assert!(value.is_empty());
//! ```

pub mod clock;
pub mod error;
pub mod policy;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{ErrorContext, MacroError, user_friendly_error};
pub use policy::ErrorPolicy;
