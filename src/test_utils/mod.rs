//! Test utilities for macromsg
//!
//! This module provides helpers shared by unit and integration tests:
//! - One-time tracing initialization that cooperates with the test harness
//! - [`TestSource`], a builder for macro sources exposing any set of capabilities
//! - [`RecordingSink`], a message sink that keeps every delivery for inspection
//!
//! # Example
//!
//! ```rust,no_run
//! use macromsg::test_utils::{TestSource, init_test_logging};
//!
//! init_test_logging(None);
//! let steve = TestSource::new().name("Steve").random_uuid();
//! ```

mod sink;
mod source;

pub use sink::{Delivery, RecordingSink};
pub use source::TestSource;

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Initializes the tracing subscriber only once regardless of how many times it
/// is called. Uses `level` when given, otherwise `RUST_LOG`; with neither set
/// logging stays off.
///
/// ```bash
/// RUST_LOG=macromsg=trace cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}
