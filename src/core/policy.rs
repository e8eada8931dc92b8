//! Failure policy for public entry points.
//!
//! Internally every validation failure is a value (an invalid key, an empty map).
//! At the outermost entry points the pipeline has to decide whether such a value is
//! fatal. [`ErrorPolicy`] makes that decision: `Strict` turns it into an error,
//! `Lenient` logs it and carries on with a safe default. The policy is passed in
//! by the caller (usually from [`Settings`](crate::config::Settings)), so the same
//! code runs strict under test and lenient in production.

use serde::{Deserialize, Serialize};

use super::error::MacroError;

/// How entry points react to caller errors such as malformed keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Return the error to the caller.
    Strict,
    /// Log a warning and substitute the fallback value.
    #[default]
    Lenient,
}

impl ErrorPolicy {
    /// Apply the policy to `error`.
    ///
    /// Returns `Err(error)` when strict, otherwise logs it and returns `Ok(fallback)`.
    pub fn handle<T>(self, error: MacroError, fallback: T) -> Result<T, MacroError> {
        match self {
            Self::Strict => Err(error),
            Self::Lenient => {
                tracing::warn!("{error}; continuing with default");
                Ok(fallback)
            }
        }
    }

    /// Like [`handle`](Self::handle), with the fallback built lazily.
    pub fn handle_with<T>(
        self,
        error: MacroError,
        fallback: impl FnOnce() -> T,
    ) -> Result<T, MacroError> {
        match self {
            Self::Strict => Err(error),
            Self::Lenient => {
                tracing::warn!("{error}; continuing with default");
                Ok(fallback())
            }
        }
    }

    /// `true` for [`ErrorPolicy::Strict`].
    pub fn is_strict(self) -> bool {
        matches!(self, Self::Strict)
    }
}
