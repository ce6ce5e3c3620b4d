use crate::config::AgentSettings;
use crate::config::settings::{DEFAULT_MAX_INPUT_CHARS, DEFAULT_MAX_TOOL_ROUNDS, DEFAULT_SYSTEM_PROMPT};
use serde::Serialize;
use serde_json::Value;

/// One tool invocation made while answering a turn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentStep {
    pub tool: String,
    pub input: Value,
    pub success: bool,
    pub output: String,
}

#[derive(Debug, Clone)]
pub struct AgentOutcome {
    pub response: String,
    pub steps: Vec<AgentStep>,
}

#[derive(Debug, Clone)]
pub struct AgentOptions {
    pub system_prompt: String,
    pub max_tool_rounds: usize,
    pub max_input_chars: usize,
}

impl AgentOptions {
    pub fn from_settings(settings: &AgentSettings) -> Self {
        Self {
            system_prompt: settings.system_prompt.clone(),
            max_tool_rounds: settings.max_tool_rounds,
            max_input_chars: settings.max_input_chars,
        }
    }
}

impl Default for AgentOptions {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            max_tool_rounds: DEFAULT_MAX_TOOL_ROUNDS,
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
        }
    }
}
