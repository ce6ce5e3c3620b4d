// Settings file loading.

use std::fs;
use std::time::Duration;
use webscout_core::config::{AgentSettings, ConfigError, load_settings};

fn write_settings(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("agent.toml");
    fs::write(&path, content).expect("write settings");
    (dir, path)
}

#[test]
fn partial_file_overrides_only_named_values() {
    let (_dir, path) = write_settings(
        r#"
max_tool_rounds = 3
tool_timeout_secs = 30
system_prompt = "Answer briefly."

[server]
package = "firecrawl-mcp@1.2.0"
"#,
    );

    let settings = load_settings(Some(&path)).expect("valid settings");
    let defaults = AgentSettings::default();

    assert_eq!(settings.max_tool_rounds, 3);
    assert_eq!(settings.tool_timeout, Duration::from_secs(30));
    assert_eq!(settings.system_prompt, "Answer briefly.");
    assert_eq!(settings.server.package, "firecrawl-mcp@1.2.0");
    assert_eq!(settings.server.runner_args, defaults.server.runner_args);
    assert_eq!(settings.handshake_timeout, defaults.handshake_timeout);
    assert_eq!(settings.max_input_chars, 175_000);
}

#[test]
fn explicit_missing_file_is_not_found() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = load_settings(Some(&dir.path().join("nope.toml"))).expect_err("missing");
    assert!(matches!(err, ConfigError::NotFound { .. }));
}

#[test]
fn zero_round_cap_is_invalid() {
    let (_dir, path) = write_settings("max_tool_rounds = 0\n");
    let err = load_settings(Some(&path)).expect_err("invalid");
    assert!(matches!(
        err,
        ConfigError::Invalid {
            field: "max_tool_rounds",
            ..
        }
    ));
}

#[test]
fn unknown_keys_are_parse_errors() {
    let (_dir, path) = write_settings("max_steps = 4\n");
    let err = load_settings(Some(&path)).expect_err("unknown key");
    assert!(matches!(err, ConfigError::Parse { .. }));
}
