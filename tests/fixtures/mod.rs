//! Sample catalogs and macro sources.

#![allow(dead_code)]

/// A TOML catalog mixing quoted and nested keys.
pub const MESSAGES_TOML: &str = r#"
[messages."GRAVE.CREATED"]
body = "Your {GRAVE} was created at {GRAVE.LOCATION}"
title = "Grave created"
subtitle = "{GRAVE.QUANTITY} items inside"
repeat_delay = 30000

[messages.PLAYER.JOINED]
body = "Welcome {RECIPIENT}"

[messages.PLAYER.QUIT]
body = "Goodbye"
enabled = false
"#;

/// The same shape as YAML.
pub const MESSAGES_YAML: &str = r#"
messages:
  GRAVE:
    PROTECTED:
      body: "{GRAVE} is protected for {GRAVE.PROTECTION}"
  PLAYER:
    JOINED:
      body: "Welcome {RECIPIENT.DISPLAY_NAME}"
"#;

/// A catalog with placeholder mistakes for `check`.
pub const BROKEN_TOML: &str = r#"
[messages.BROKEN]
body = "Hello {player.name}, your grave is at {GRAVE.LOCATON}"

[messages.FINE]
body = "Nothing to see"
"#;

pub const STEVE_JSON: &str = r#"{
  "name": "Steve",
  "display_name": "Steve the Brave",
  "uuid": "0f5a2d8e-54c1-4d3b-9a63-3c2b1f7a9e01",
  "location": { "world": "overworld", "x": 10, "y": 64, "z": -3 }
}"#;

pub const GRAVE_JSON: &str = r#"{
  "name": "grave",
  "quantity": 12,
  "owner": { "name": "Steve", "uuid": "0f5a2d8e-54c1-4d3b-9a63-3c2b1f7a9e01" },
  "location": { "world": "overworld", "x": 1, "y": 64, "z": 2 }
}"#;
