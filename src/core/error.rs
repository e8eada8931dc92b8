//! Error handling for macromsg
//!
//! This module provides the error types and user-friendly error reporting for the
//! message pipeline. The error system follows two principles:
//! 1. **Strongly-typed errors** for precise error handling in code
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! Only genuine caller errors live here. Absence (an object without a capability,
//! a placeholder without a value, a message that is still cooling down) is a normal
//! return value and never surfaces as a [`MacroError`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use macromsg::core::{MacroError, user_friendly_error};
//!
//! let error = MacroError::MessageNotFound {
//!     key: "GRAVE.CREATED".to_string(),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // Shows colored error with suggestions
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

use crate::key::InvalidReason;

/// The main error type for macromsg operations
///
/// # Error Categories
///
/// ## Validation
/// - [`InvalidKey`] - A record or macro key failed validation
/// - [`MissingIdentity`] - A recipient exposes no stable identity
///
/// ## Messages
/// - [`MessageNotFound`] - No message record exists for a key
/// - [`CatalogParseError`] - A message catalog file could not be parsed
/// - [`DeliveryFailed`] - A sink rejected a message
///
/// ## Configuration and input files
/// - [`ConfigParseError`] - The settings file is malformed
/// - [`InvalidSetting`] - A setting has an unusable value
/// - [`SourceParseError`] - A JSON macro source file could not be parsed
/// - [`UnsupportedFormat`] - A file extension is not recognized
/// - [`IoError`] - Standard I/O errors from [`std::io::Error`]
///
/// [`InvalidKey`]: MacroError::InvalidKey
/// [`MissingIdentity`]: MacroError::MissingIdentity
/// [`MessageNotFound`]: MacroError::MessageNotFound
/// [`CatalogParseError`]: MacroError::CatalogParseError
/// [`DeliveryFailed`]: MacroError::DeliveryFailed
/// [`ConfigParseError`]: MacroError::ConfigParseError
/// [`InvalidSetting`]: MacroError::InvalidSetting
/// [`SourceParseError`]: MacroError::SourceParseError
/// [`UnsupportedFormat`]: MacroError::UnsupportedFormat
/// [`IoError`]: MacroError::IoError
#[derive(Error, Debug)]
pub enum MacroError {
    /// A key failed validation at a public entry point.
    ///
    /// # Fields
    /// - `raw`: The input that was rejected (`<null>` for a missing value)
    /// - `reason`: Why validation failed
    #[error("Invalid key '{raw}': {reason}")]
    InvalidKey {
        /// The rejected input
        raw: String,
        /// Classification of the failure
        reason: InvalidReason,
    },

    /// A recipient has no `Identifiable` capability, so no cooldown can be tracked.
    #[error("Recipient has no identity ({context})")]
    MissingIdentity {
        /// Where the identity was required
        context: String,
    },

    /// No message record is registered for the key
    #[error("Message '{key}' not found")]
    MessageNotFound {
        /// The record key that was looked up
        key: String,
    },

    /// Message catalog parsing error
    #[error("Invalid message catalog syntax in {file}")]
    CatalogParseError {
        /// Path to the catalog file that failed to parse
        file: String,
        /// Specific reason for the parsing failure
        reason: String,
    },

    /// A message sink failed to deliver a message
    #[error("Failed to deliver message '{key}': {reason}")]
    DeliveryFailed {
        /// The record key of the message being delivered
        key: String,
        /// The reason reported by the sink
        reason: String,
    },

    /// Settings file parsing error
    #[error("Invalid settings file syntax in {file}")]
    ConfigParseError {
        /// Path to the settings file that failed to parse
        file: String,
        /// Specific reason for the parsing failure
        reason: String,
    },

    /// A setting holds a value that cannot be used
    #[error("Invalid value '{value}' for setting '{name}'")]
    InvalidSetting {
        /// Name of the setting
        name: String,
        /// The rejected value
        value: String,
    },

    /// A JSON macro source could not be parsed
    #[error("Invalid macro source in {file}")]
    SourceParseError {
        /// Path to the source file
        file: String,
        /// Specific reason for the parsing failure
        reason: String,
    },

    /// File extension not recognized
    #[error("Unsupported file format: {file}")]
    UnsupportedFormat {
        /// Path of the file
        file: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

impl Clone for MacroError {
    fn clone(&self) -> Self {
        match self {
            Self::InvalidKey {
                raw,
                reason,
            } => Self::InvalidKey {
                raw: raw.clone(),
                reason: *reason,
            },
            Self::MissingIdentity {
                context,
            } => Self::MissingIdentity {
                context: context.clone(),
            },
            Self::MessageNotFound {
                key,
            } => Self::MessageNotFound {
                key: key.clone(),
            },
            Self::CatalogParseError {
                file,
                reason,
            } => Self::CatalogParseError {
                file: file.clone(),
                reason: reason.clone(),
            },
            Self::DeliveryFailed {
                key,
                reason,
            } => Self::DeliveryFailed {
                key: key.clone(),
                reason: reason.clone(),
            },
            Self::ConfigParseError {
                file,
                reason,
            } => Self::ConfigParseError {
                file: file.clone(),
                reason: reason.clone(),
            },
            Self::InvalidSetting {
                name,
                value,
            } => Self::InvalidSetting {
                name: name.clone(),
                value: value.clone(),
            },
            Self::SourceParseError {
                file,
                reason,
            } => Self::SourceParseError {
                file: file.clone(),
                reason: reason.clone(),
            },
            Self::UnsupportedFormat {
                file,
            } => Self::UnsupportedFormat {
                file: file.clone(),
            },
            // io::Error is not Clone; keep the kind and message
            Self::IoError(e) => Self::IoError(std::io::Error::new(e.kind(), e.to_string())),
            Self::Other {
                message,
            } => Self::Other {
                message: message.clone(),
            },
        }
    }
}

/// Error context wrapper that provides user-friendly error information
///
/// `ErrorContext` wraps a [`MacroError`] and adds optional suggestions and details
/// for display in the terminal.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: MacroError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: MacroError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    ///
    /// - Error message: Red and bold
    /// - Details: Yellow
    /// - Suggestion: Green
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// Recognizes [`MacroError`] variants, [`std::io::Error`], TOML and JSON parse
/// errors. Anything else is wrapped as [`MacroError::Other`] with the full
/// error chain as the message.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(macro_error) = error.downcast_ref::<MacroError>() {
        return create_error_context(macro_error.clone());
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(MacroError::Other {
                    message: format!("{error:#}"),
                })
                .with_suggestion("Check that the file exists and the path is correct");
            }
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(MacroError::Other {
                    message: format!("{error:#}"),
                })
                .with_suggestion("Check the file permissions");
            }
            _ => {}
        }
    }

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return ErrorContext::new(MacroError::Other {
            message: toml_error.to_string(),
        })
        .with_suggestion("Check the TOML syntax. Verify quotes, brackets, and table names")
        .with_details("TOML parsing errors are usually caused by missing quotes or mismatched brackets");
    }

    if let Some(json_error) = error.downcast_ref::<serde_json::Error>() {
        return ErrorContext::new(MacroError::Other {
            message: json_error.to_string(),
        })
        .with_suggestion("Check the JSON syntax of the macro source file");
    }

    ErrorContext::new(MacroError::Other {
        message: format!("{error:#}"),
    })
}

fn create_error_context(error: MacroError) -> ErrorContext {
    match &error {
        MacroError::InvalidKey {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Keys are dot-separated segments of uppercase letters, digits and '_', each starting with a letter (e.g. PLAYER.LOCATION.X)"),
        MacroError::MissingIdentity {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Give the recipient a 'uuid' so cooldowns can be tracked")
            .with_details("Cooldowns are keyed by recipient identity and message key"),
        MacroError::MessageNotFound {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check the key against the [messages] tables of the catalog file"),
        MacroError::CatalogParseError {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Each message is a table under [messages] with at least a 'body' field"),
        MacroError::ConfigParseError {
            ..
        }
        | MacroError::InvalidSetting {
            ..
        } => ErrorContext::new(error).with_suggestion(format!(
            "Fix the settings file or point {} at another one",
            crate::constants::CONFIG_PATH_ENV
        )),
        MacroError::SourceParseError {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("A macro source must be a JSON object (e.g. {\"name\": \"Steve\"})"),
        MacroError::UnsupportedFormat {
            ..
        } => ErrorContext::new(error).with_suggestion("Use a .toml, .yaml or .yml file"),
        _ => ErrorContext::new(error),
    }
}
