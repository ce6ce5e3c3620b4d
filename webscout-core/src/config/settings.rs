//! # Agent Settings
//!
//! Optional tuning knobs read from `config/agent.toml`. Every field has a
//! default, so the file may be absent or partial.
//!
//! ```toml
//! max_tool_rounds = 8
//! handshake_timeout_secs = 90
//! tool_timeout_secs = 180
//! request_timeout_secs = 120
//! max_input_chars = 175000
//! system_prompt = "You can scrape/crawl/extract data using Firecrawl MCP tools."
//!
//! [server]
//! runner = "npx"
//! package = "firecrawl-mcp"
//! runner_args = ["-y"]
//! ```

use super::error::ConfigError;
use crate::constants::{AUTO_CONFIRM_FLAG, TOOL_RUNNER, TOOL_SERVER_PACKAGE};
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_MAX_TOOL_ROUNDS: usize = 8;
pub const DEFAULT_HANDSHAKE_TIMEOUT_SECS: u64 = 90;
pub const DEFAULT_TOOL_TIMEOUT_SECS: u64 = 180;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_MAX_INPUT_CHARS: usize = 175_000;
pub const DEFAULT_SYSTEM_PROMPT: &str = "You can scrape/crawl/extract data using Firecrawl MCP tools. \
Decide when to use tools; think step by step.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentSettings {
    pub max_tool_rounds: usize,
    pub handshake_timeout: Duration,
    pub tool_timeout: Duration,
    pub request_timeout: Duration,
    pub max_input_chars: usize,
    pub system_prompt: String,
    pub server: ServerSettings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub runner: String,
    pub package: String,
    pub runner_args: Vec<String>,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            max_tool_rounds: DEFAULT_MAX_TOOL_ROUNDS,
            handshake_timeout: Duration::from_secs(DEFAULT_HANDSHAKE_TIMEOUT_SECS),
            tool_timeout: Duration::from_secs(DEFAULT_TOOL_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            server: ServerSettings::default(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            runner: TOOL_RUNNER.to_string(),
            package: TOOL_SERVER_PACKAGE.to_string(),
            runner_args: vec![AUTO_CONFIRM_FLAG.to_string()],
        }
    }
}

/// Raw settings structure for deserialization from TOML
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub(super) struct RawSettings {
    pub max_tool_rounds: Option<usize>,
    pub handshake_timeout_secs: Option<u64>,
    pub tool_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub max_input_chars: Option<usize>,
    pub system_prompt: Option<String>,
    #[serde(default)]
    pub server: RawServerSettings,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub(super) struct RawServerSettings {
    pub runner: Option<String>,
    pub package: Option<String>,
    pub runner_args: Option<Vec<String>>,
}

impl RawSettings {
    pub(super) fn validate(self) -> Result<AgentSettings, ConfigError> {
        let defaults = AgentSettings::default();

        let max_tool_rounds = positive("max_tool_rounds", self.max_tool_rounds)?
            .unwrap_or(defaults.max_tool_rounds);
        let max_input_chars = positive("max_input_chars", self.max_input_chars)?
            .unwrap_or(defaults.max_input_chars);
        let handshake_timeout = seconds("handshake_timeout_secs", self.handshake_timeout_secs)?
            .unwrap_or(defaults.handshake_timeout);
        let tool_timeout =
            seconds("tool_timeout_secs", self.tool_timeout_secs)?.unwrap_or(defaults.tool_timeout);
        let request_timeout = seconds("request_timeout_secs", self.request_timeout_secs)?
            .unwrap_or(defaults.request_timeout);

        let system_prompt = match self.system_prompt {
            Some(prompt) if prompt.trim().is_empty() => {
                return Err(ConfigError::Invalid {
                    field: "system_prompt",
                    reason: "must not be blank".to_string(),
                });
            }
            Some(prompt) => prompt.trim().to_string(),
            None => defaults.system_prompt,
        };

        let server = self.server.validate(defaults.server)?;

        Ok(AgentSettings {
            max_tool_rounds,
            handshake_timeout,
            tool_timeout,
            request_timeout,
            max_input_chars,
            system_prompt,
            server,
        })
    }
}

impl RawServerSettings {
    fn validate(self, defaults: ServerSettings) -> Result<ServerSettings, ConfigError> {
        let runner = non_blank("server.runner", self.runner)?.unwrap_or(defaults.runner);
        let package = non_blank("server.package", self.package)?.unwrap_or(defaults.package);
        Ok(ServerSettings {
            runner: expand(&runner),
            package,
            runner_args: self
                .runner_args
                .map(|args| args.iter().map(|arg| expand(arg)).collect())
                .unwrap_or(defaults.runner_args),
        })
    }
}

fn expand(value: &str) -> String {
    shellexpand::full(value)
        .map(|cow| cow.into_owned())
        .unwrap_or_else(|_| value.to_string())
}

fn positive(field: &'static str, value: Option<usize>) -> Result<Option<usize>, ConfigError> {
    match value {
        Some(0) => Err(ConfigError::Invalid {
            field,
            reason: "must be at least 1".to_string(),
        }),
        other => Ok(other),
    }
}

fn seconds(field: &'static str, value: Option<u64>) -> Result<Option<Duration>, ConfigError> {
    match value {
        Some(0) => Err(ConfigError::Invalid {
            field,
            reason: "timeout must be at least one second".to_string(),
        }),
        other => Ok(other.map(Duration::from_secs)),
    }
}

fn non_blank(field: &'static str, value: Option<String>) -> Result<Option<String>, ConfigError> {
    match value {
        Some(text) if text.trim().is_empty() => Err(ConfigError::Invalid {
            field,
            reason: "must not be blank".to_string(),
        }),
        other => Ok(other.map(|text| text.trim().to_string())),
    }
}
