//! Configuration management for macromsg
//!
//! Settings live in a single TOML file. Every key is optional:
//!
//! ```toml
//! locale = "en-US"              # locale used for instants
//! timezone = "+00:00"           # "UTC", "Z" or an offset
//! duration_unit = "minutes"     # seconds | minutes | hours | days
//! instant_style = "medium"      # short | medium | long | full
//! error_policy = "lenient"      # strict | lenient
//! enabled_worlds = []           # empty = every world
//! sweep_interval_secs = 60      # cooldown sweeper period
//! ```
//!
//! # Location
//!
//! The file is looked up in order:
//!
//! 1. The path given with `--config`
//! 2. The `MACROMSG_CONFIG` environment variable
//! 3. `~/.macromsg/config.toml`
//!
//! A missing file is not an error; the defaults above apply.

mod settings;

pub use settings::Settings;
