//! Global constants used throughout the macromsg codebase.
//!
//! This module contains delimiters, default display timings, and environment
//! variable names that are shared across multiple modules. Defining them
//! centrally keeps the placeholder syntax and the defaults discoverable.

use std::time::Duration;

/// Separator between key segments (`PLAYER.OWNER.UUID`).
pub const KEY_DELIMITER: char = '.';

/// Opening delimiter of a placeholder token.
pub const PLACEHOLDER_OPEN: char = '{';

/// Closing delimiter of a placeholder token.
pub const PLACEHOLDER_CLOSE: char = '}';

/// Base key under which the message recipient is registered as a macro source.
pub const RECIPIENT_BASE_KEY: &str = "RECIPIENT";

/// Text used in place of a world name when a location has no world.
pub const NO_WORLD: &str = "-";

/// Default title fade-in time (500 milliseconds).
pub const DEFAULT_TITLE_FADE_IN: Duration = Duration::from_millis(500);

/// Default time a title stays on screen (3.5 seconds).
pub const DEFAULT_TITLE_STAY: Duration = Duration::from_millis(3500);

/// Default title fade-out time (1 second).
pub const DEFAULT_TITLE_FADE_OUT: Duration = Duration::from_millis(1000);

/// Default period of the background cooldown sweeper, in seconds.
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;

/// Environment variable overriding the settings file location.
pub const CONFIG_PATH_ENV: &str = "MACROMSG_CONFIG";

/// Directory under the user's home holding the default settings file.
pub const CONFIG_DIR_NAME: &str = ".macromsg";

/// File name of the default settings file.
pub const CONFIG_FILE_NAME: &str = "config.toml";
