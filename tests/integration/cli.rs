use predicates::prelude::*;

use crate::common::TestWorkspace;
use crate::fixtures::{BROKEN_TOML, GRAVE_JSON, MESSAGES_TOML, STEVE_JSON};

fn workspace() -> TestWorkspace {
    let workspace = TestWorkspace::new().unwrap();
    workspace.write("messages.toml", MESSAGES_TOML).unwrap();
    workspace.write("broken.toml", BROKEN_TOML).unwrap();
    workspace.write("steve.json", STEVE_JSON).unwrap();
    workspace.write("grave.json", GRAVE_JSON).unwrap();
    workspace
}

#[test]
fn test_render_text() {
    let workspace = workspace();
    let output = workspace
        .run_macromsg(&[
            "render",
            "--messages",
            "messages.toml",
            "--key",
            "GRAVE.CREATED",
            "--recipient",
            "steve.json",
            "--source",
            "GRAVE=grave.json",
        ])
        .unwrap();

    output.assert_success();
    assert_eq!(
        output.stdout,
        "[GRAVE.CREATED] Your grave was created at overworld [1, 64, 2]\n\
         [GRAVE.CREATED] title: Grave created\n\
         [GRAVE.CREATED] subtitle: 12 items inside\n"
    );
}

#[test]
fn test_render_json() {
    let workspace = workspace();
    let output = workspace
        .run_macromsg(&[
            "render",
            "-m",
            "messages.toml",
            "-k",
            "PLAYER.JOINED",
            "-r",
            "steve.json",
            "--format",
            "json",
        ])
        .unwrap();

    output.assert_success();
    let value: serde_json::Value = serde_json::from_str(output.stdout.trim()).unwrap();
    assert_eq!(value["key"], "PLAYER.JOINED");
    assert_eq!(value["message"], "Welcome Steve the Brave");
    assert!(value.get("title").is_none());
}

#[test]
fn test_render_without_recipient_keeps_placeholders() {
    let workspace = workspace();
    workspace
        .run_macromsg(&["render", "-m", "messages.toml", "-k", "PLAYER.JOINED"])
        .unwrap()
        .assert_success()
        .assert_stdout_contains("[PLAYER.JOINED] Welcome {RECIPIENT}");
}

#[test]
fn test_render_unknown_and_disabled_messages() {
    let workspace = workspace();
    workspace
        .run_macromsg(&["render", "-m", "messages.toml", "-k", "NOPE"])
        .unwrap()
        .assert_failure()
        .assert_stderr_contains("Message 'NOPE' not found");

    let output =
        workspace.run_macromsg(&["render", "-m", "messages.toml", "-k", "PLAYER.QUIT"]).unwrap();
    output.assert_success().assert_stderr_contains("is disabled");
    assert!(output.stdout.is_empty());
}

#[test]
fn test_render_respects_enabled_worlds() {
    let workspace = workspace();
    workspace.write("config.toml", "enabled_worlds = [\"nether\"]\n").unwrap();
    let output = workspace
        .run_macromsg(&["render", "-m", "messages.toml", "-k", "PLAYER.JOINED", "-r", "steve.json"])
        .unwrap();
    output.assert_success().assert_stderr_contains("not delivered in the recipient's world");
    assert!(output.stdout.is_empty());
}

#[test]
fn test_explicit_config_flag_wins() {
    let workspace = workspace();
    workspace.write("config.toml", "enabled_worlds = [\"nether\"]\n").unwrap();
    workspace.write("other.toml", "locale = \"en-GB\"\n").unwrap();
    workspace
        .run_macromsg(&[
            "--config",
            "other.toml",
            "render",
            "-m",
            "messages.toml",
            "-k",
            "PLAYER.JOINED",
            "-r",
            "steve.json",
        ])
        .unwrap()
        .assert_success()
        .assert_stdout_contains("Welcome Steve the Brave");
}

#[test]
fn test_malformed_settings_fail() {
    let workspace = workspace();
    workspace.write("config.toml", "error_policy = \"sometimes\"\n").unwrap();
    workspace
        .run_macromsg(&["keys"])
        .unwrap()
        .assert_failure()
        .assert_stderr_contains("Invalid settings file syntax");
}

#[test]
fn test_keys_text_and_json() {
    let workspace = workspace();
    workspace
        .run_macromsg(&["keys", "--source", "PLAYER=steve.json"])
        .unwrap()
        .assert_success()
        .assert_stdout_contains("PLAYER.DISPLAY_NAME = Steve the Brave\n")
        .assert_stdout_contains("PLAYER = Steve the Brave\n")
        .assert_stdout_contains("PLAYER.NAME = Steve\n")
        .assert_stdout_contains("PLAYER.LOCATION.WORLD = overworld\n");

    let output =
        workspace.run_macromsg(&["keys", "-s", "GRAVE=grave.json", "-f", "json"]).unwrap();
    output.assert_success();
    let value: serde_json::Value = serde_json::from_str(&output.stdout).unwrap();
    assert_eq!(value["GRAVE"], "grave");
    assert_eq!(value["GRAVE.OWNER"], "Steve");
    assert_eq!(value["GRAVE.QUANTITY"], "12");
}

#[test]
fn test_keys_rejects_bad_arguments() {
    let workspace = workspace();
    workspace
        .run_macromsg(&["keys", "--source", "player=steve.json"])
        .unwrap()
        .assert_failure();
    workspace
        .run_macromsg(&["keys", "--format", "yaml"])
        .unwrap()
        .assert_failure()
        .assert_stderr_contains("Invalid format 'yaml'");
    workspace
        .run_macromsg(&["keys", "--source", "PLAYER=missing.json"])
        .unwrap()
        .assert_failure()
        .assert_stderr_contains("Failed to read macro source");
}

#[test]
fn test_check_clean_catalog() {
    let workspace = workspace();
    workspace
        .run_macromsg(&["check", "--messages", "messages.toml"])
        .unwrap()
        .assert_success()
        .assert_stdout_contains("GRAVE.CREATED")
        .assert_stdout_contains("placeholders: {GRAVE}, {GRAVE.LOCATION}, {GRAVE.QUANTITY}")
        .assert_stdout_contains("3 message(s) checked");
}

#[test]
fn test_check_reports_malformed_tokens() {
    let workspace = workspace();
    workspace
        .run_macromsg(&["check", "--messages", "broken.toml"])
        .unwrap()
        .assert_failure()
        .assert_stdout_contains("did you mean '{PLAYER.NAME}'?")
        .assert_stderr_contains("Found 1 placeholder issue(s) in 1 message(s)");
}

#[test]
fn test_check_reports_unresolved_with_sources() {
    let workspace = workspace();
    workspace
        .run_macromsg(&["check", "-m", "broken.toml", "-s", "GRAVE=grave.json"])
        .unwrap()
        .assert_failure()
        .assert_stdout_contains("'{GRAVE.LOCATON}' has no value")
        .assert_stdout_contains("similar: '{GRAVE.LOCATION}'")
        .assert_stderr_contains("Found 2 placeholder issue(s)");

    // the recipient resolves {RECIPIENT}; the grave resolves the rest
    workspace
        .run_macromsg(&["check", "-m", "messages.toml", "-r", "steve.json", "-s", "GRAVE=grave.json"])
        .unwrap()
        .assert_success();
}

#[test]
fn test_help_lists_commands() {
    let mut cmd = assert_cmd::Command::cargo_bin("macromsg").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("render"))
        .stdout(predicate::str::contains("keys"))
        .stdout(predicate::str::contains("check"));
}

fn request(key: &str, sources: &[(&str, &str)]) -> String {
    let steve: serde_json::Value = serde_json::from_str(STEVE_JSON).unwrap();
    let sources: serde_json::Map<String, serde_json::Value> = sources
        .iter()
        .map(|(base, json)| (base.to_string(), serde_json::from_str(json).unwrap()))
        .collect();
    serde_json::json!({ "key": key, "recipient": steve, "sources": sources }).to_string()
}

#[test]
fn test_stream_applies_cooldowns_across_requests() {
    let workspace = workspace();
    workspace.write("config.toml", "sweep_interval_secs = 1\n").unwrap();
    let input = [
        request("PLAYER.JOINED", &[]),
        request("GRAVE.CREATED", &[("GRAVE", GRAVE_JSON)]),
        request("GRAVE.CREATED", &[("GRAVE", GRAVE_JSON)]),
        request("PLAYER.QUIT", &[]),
    ]
    .join("\n");

    let output = workspace
        .run_macromsg_with_input(&["stream", "--messages", "messages.toml"], &input)
        .unwrap();
    output.assert_success();
    assert_eq!(
        output.stdout,
        "[PLAYER.JOINED] Welcome Steve the Brave\n\
         [GRAVE.CREATED] Your grave was created at overworld [1, 64, 2]\n\
         [GRAVE.CREATED] title: Grave created\n\
         [GRAVE.CREATED] subtitle: 12 items inside\n"
    );
}

#[test]
fn test_stream_strict_policy_stops_on_bad_request() {
    let workspace = workspace();
    workspace.write("config.toml", "error_policy = \"strict\"\n").unwrap();
    let input = format!("{}\nnot json\n{}\n", request("PLAYER.JOINED", &[]), request("PLAYER.JOINED", &[]));

    let output = workspace
        .run_macromsg_with_input(&["stream", "-m", "messages.toml", "-f", "json"], &input)
        .unwrap();
    output.assert_failure().assert_stderr_contains("stdin:2");
    let lines: Vec<&str> = output.stdout.lines().collect();
    assert_eq!(lines.len(), 1);
    let value: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(value["message"], "Welcome Steve the Brave");
}
