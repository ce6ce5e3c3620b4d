//! Startup validation.
//!
//! Runs before any child process or network session exists and reports every
//! problem at once rather than stopping at the first.

use super::app::{AgentConfig, ModelConfig};
use super::env::{self, EnvKey, EnvSource};
use super::error::PreflightError;
use super::runner::{ExecutableLookup, Platform, resolve_executable};
use crate::constants::DEFAULT_MODEL;
use std::path::PathBuf;
use tracing::debug;

/// A validated configuration plus the resolved tool-runner path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preflight {
    pub config: AgentConfig,
    pub tool_runner: PathBuf,
}

pub fn preflight(
    source: &impl EnvSource,
    runner: &str,
    platform: Platform,
    lookup: &impl ExecutableLookup,
) -> Result<Preflight, PreflightError> {
    let mut problems = Vec::new();

    let mut required = |key: EnvKey| {
        let value = key.lookup(source);
        if value.is_none() {
            problems.push(format!("Missing {}", key.name));
        }
        value
    };
    let tool_server_key = required(env::FIRECRAWL_API_KEY);
    let base_url = required(env::MODEL_BASE_URL);
    let api_token = required(env::MODEL_TOKEN);
    let model = env::MODEL_ID
        .lookup(source)
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    let tool_runner = resolve_executable(runner, platform, lookup);
    if tool_runner.is_none() {
        problems.push(format!("{runner} not found on PATH (install Node.js LTS)."));
    }

    match (tool_server_key, base_url, api_token, tool_runner) {
        (Some(tool_server_key), Some(base_url), Some(api_token), Some(tool_runner))
            if problems.is_empty() =>
        {
            debug!(runner = %tool_runner.display(), model = %model, "Preflight passed");
            Ok(Preflight {
                config: AgentConfig {
                    base_url,
                    api_token,
                    model,
                    tool_server_key,
                },
                tool_runner,
            })
        }
        _ => Err(PreflightError::new(problems)),
    }
}

/// Model credentials only; used when no tool server will be started.
pub fn model_preflight(source: &impl EnvSource) -> Result<ModelConfig, PreflightError> {
    let base_url = env::MODEL_BASE_URL.lookup(source);
    let api_token = env::MODEL_TOKEN.lookup(source);
    let model = env::MODEL_ID
        .lookup(source)
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    match (base_url, api_token) {
        (Some(base_url), Some(api_token)) => Ok(ModelConfig {
            base_url,
            api_token,
            model,
        }),
        (base_url, api_token) => {
            let mut problems = Vec::new();
            if base_url.is_none() {
                problems.push(format!("Missing {}", env::MODEL_BASE_URL.name));
            }
            if api_token.is_none() {
                problems.push(format!("Missing {}", env::MODEL_TOKEN.name));
            }
            Err(PreflightError::new(problems))
        }
    }
}
