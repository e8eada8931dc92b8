//! Integration test suite for macromsg
//!
//! End-to-end tests that drive the library and the `macromsg` binary against
//! real files in temporary directories.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **pipeline**: Sources through extraction and substitution to a sink
//! - **cooldown**: Cooldown behavior under concurrent dispatch
//! - **catalog**: Loading TOML and YAML catalogs from disk
//! - **cli**: The `render`, `keys` and `check` commands

// Shared test utilities (from parent tests/ directory)
#[path = "../common/mod.rs"]
mod common;
#[path = "../fixtures/mod.rs"]
mod fixtures;

mod catalog;
mod cli;
mod cooldown;
mod pipeline;
