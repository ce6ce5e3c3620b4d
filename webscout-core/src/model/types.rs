//! Model types - Request, Reply, and Error types

use crate::types::{ChatMessage, ToolCall, ToolDescriptor};
use reqwest::StatusCode;
use thiserror::Error;

/// Model request: full conversation plus the tools the model may request.
#[derive(Debug, Clone, Default)]
pub struct ModelRequest {
    pub messages: Vec<ChatMessage>,
    pub tools: Vec<ToolDescriptor>,
}

impl ModelRequest {
    /// A single user prompt with no tools.
    pub fn prompt(text: impl Into<String>) -> Self {
        Self {
            messages: vec![ChatMessage::user(text)],
            tools: Vec::new(),
        }
    }
}

/// What the model decided to do.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelReply {
    /// Final textual answer for the user.
    Answer(String),
    /// One or more tool invocations to run before asking again. `thought`
    /// holds any text the model emitted alongside the calls.
    ToolCalls {
        thought: Option<String>,
        calls: Vec<ToolCall>,
    },
}

/// Model errors
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to build HTTP client for provider '{provider}': {source}")]
    Setup {
        provider: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("network error calling provider '{provider}': {source}")]
    Network {
        provider: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("provider '{provider}' returned invalid response: {reason}")]
    InvalidResponse { provider: String, reason: String },
}

impl ModelError {
    pub fn network(provider: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            provider: provider.into(),
            source,
        }
    }

    pub fn invalid_response(provider: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            provider: provider.into(),
            reason: reason.into(),
        }
    }

    /// Short explanation suitable for printing inline in the REPL.
    pub fn user_message(&self) -> String {
        match self {
            ModelError::Setup { provider, .. } => {
                format!("Could not initialise the HTTP client for '{provider}'.")
            }
            ModelError::Network { provider, source } => {
                if source.is_connect() {
                    format!("Cannot connect to model provider '{provider}'.")
                } else if source.is_timeout() {
                    format!("Request to '{provider}' timed out.")
                } else if let Some(status) = source.status() {
                    match status {
                        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                            format!("Model provider '{provider}' rejected the credentials.")
                        }
                        StatusCode::NOT_FOUND => format!("Endpoint '{provider}' was not found."),
                        StatusCode::TOO_MANY_REQUESTS => {
                            format!("Model provider '{provider}' is rate limiting requests.")
                        }
                        StatusCode::SERVICE_UNAVAILABLE | StatusCode::BAD_GATEWAY => {
                            format!("Model provider '{provider}' is currently unavailable.")
                        }
                        _ => format!("Request to '{provider}' failed: {}", status.as_u16()),
                    }
                } else {
                    format!("Network error talking to '{provider}'.")
                }
            }
            ModelError::InvalidResponse { provider, reason } => {
                format!("Response from '{provider}' was not understood: {reason}")
            }
        }
    }
}
