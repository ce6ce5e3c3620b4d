// Preflight against the real process environment and credentials files.

use serial_test::serial;
use std::env;
use std::fs;
use std::path::PathBuf;
use webscout_core::config::{
    ConfigError, Platform, ProcessEnv, load_env_file, model_preflight, preflight,
};

const KEYS: [&str; 8] = [
    "FIRECRAWL_API_KEY",
    "FIRECRAWL_API_Key",
    "KIMI_K2_HF_BASE",
    "Kimi_K2_HF_Base",
    "KIMI_K2_HF_TOKEN",
    "Kimi_K2_HF_Token",
    "KIMI_K2_HF_MODEL",
    "Kimi_K2_HF_Model",
];

fn clear_keys() {
    for key in KEYS {
        unsafe {
            env::remove_var(key);
        }
    }
}

fn npx_found(name: &str) -> Option<PathBuf> {
    Some(PathBuf::from(format!("/usr/local/bin/{name}")))
}

#[test]
#[serial]
fn missing_tool_server_key_is_the_only_problem_reported() {
    clear_keys();
    unsafe {
        env::set_var("KIMI_K2_HF_BASE", "https://router.huggingface.co/v1");
        env::set_var("KIMI_K2_HF_TOKEN", "hf_token");
    }

    let err = preflight(&ProcessEnv, "npx", Platform::Posix, &npx_found).expect_err("fails");

    assert_eq!(err.problems(), ["Missing FIRECRAWL_API_KEY"]);
    assert_eq!(err.to_string(), "Preflight failed:\n - Missing FIRECRAWL_API_KEY");
    clear_keys();
}

#[test]
#[serial]
fn legacy_names_are_accepted_and_blank_values_ignored() {
    clear_keys();
    unsafe {
        env::set_var("FIRECRAWL_API_KEY", "   ");
        env::set_var("FIRECRAWL_API_Key", "fc-legacy");
        env::set_var("Kimi_K2_HF_Base", "https://legacy.example/v1");
        env::set_var("Kimi_K2_HF_Token", "hf_legacy");
    }

    let checked = preflight(&ProcessEnv, "npx", Platform::Posix, &npx_found).expect("passes");

    assert_eq!(checked.config.tool_server_key, "fc-legacy");
    assert_eq!(checked.config.base_url, "https://legacy.example/v1");
    assert_eq!(checked.config.model, "moonshotai/Kimi-K2-Instruct:fireworks-ai");
    clear_keys();
}

#[test]
#[serial]
fn windows_prefers_cmd_shim() {
    clear_keys();
    unsafe {
        env::set_var("FIRECRAWL_API_KEY", "fc");
        env::set_var("KIMI_K2_HF_BASE", "https://router.huggingface.co/v1");
        env::set_var("KIMI_K2_HF_TOKEN", "hf");
    }
    let only_cmd = |name: &str| -> Option<PathBuf> {
        name.ends_with(".cmd")
            .then(|| PathBuf::from(format!("C:\\nodejs\\{name}")))
    };

    let checked = preflight(&ProcessEnv, "npx", Platform::Windows, &only_cmd).expect("passes");

    assert_eq!(checked.tool_runner, PathBuf::from("C:\\nodejs\\npx.cmd"));
    clear_keys();
}

#[test]
#[serial]
fn credentials_file_fills_gaps_without_overriding() {
    clear_keys();
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("keys.env");
    fs::write(
        &path,
        "FIRECRAWL_API_KEY=fc-from-file\nKIMI_K2_HF_BASE=https://file.example/v1\nKIMI_K2_HF_TOKEN=hf-file\n",
    )
    .expect("write keys file");
    unsafe {
        env::set_var("KIMI_K2_HF_TOKEN", "hf-from-shell");
    }

    assert!(load_env_file(Some(&path)).expect("keys file parses"));
    let config = model_preflight(&ProcessEnv).expect("passes");

    assert_eq!(config.base_url, "https://file.example/v1");
    assert_eq!(config.api_token, "hf-from-shell");
    assert_eq!(env::var("FIRECRAWL_API_KEY").as_deref(), Ok("fc-from-file"));
    clear_keys();
}

#[test]
#[serial]
fn absent_credentials_file_is_not_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    assert!(!load_env_file(Some(&dir.path().join("missing.env"))).expect("absent is fine"));
}

#[test]
#[serial]
fn malformed_credentials_file_is_reported() {
    clear_keys();
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("keys.env");
    fs::write(&path, "KIMI_K2_HF_BASE=https://file.example/v1\nnot a valid line\n")
        .expect("write keys file");

    let err = load_env_file(Some(&path)).expect_err("parse failure surfaces");

    assert!(matches!(err, ConfigError::EnvFile { .. }), "got {err:?}");
    assert!(err.to_string().contains("keys.env"));
    clear_keys();
}
