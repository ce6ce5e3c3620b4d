use super::error::ToolInvokeError;
use crate::types::ToolDescriptor;
use async_trait::async_trait;
use serde_json::Value;

/// Text returned by a tool call, flagged when the server reported a tool-level failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub text: String,
    pub is_error: bool,
}

impl ToolOutput {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

/// A connected tool server with a fixed, discovered tool set.
#[async_trait]
pub trait ToolServer: Send + Sync {
    /// Tools discovered during the handshake.
    fn tools(&self) -> &[ToolDescriptor];

    /// Guidance text the server sent with its `initialize` result, if any.
    fn instructions(&self) -> Option<&str> {
        None
    }

    fn has_tool(&self, name: &str) -> bool {
        self.tools().iter().any(|tool| tool.name == name)
    }

    async fn invoke(&self, tool: &str, arguments: Value) -> Result<ToolOutput, ToolInvokeError>;
}
