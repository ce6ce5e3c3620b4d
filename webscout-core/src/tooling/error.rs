use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolInvokeError {
    #[error("failed to spawn MCP server '{server}': {source}")]
    Spawn {
        server: String,
        #[source]
        source: std::io::Error,
    },
    #[error("tool server unavailable: '{server}' exited during startup ({status})")]
    Unavailable { server: String, status: String },
    #[error("MCP server '{server}' did not complete the handshake within {after:?}")]
    HandshakeTimeout { server: String, after: Duration },
    #[error("MCP server '{server}' transport error: {message}")]
    Transport { server: String, message: String },
    #[error("MCP server '{server}' terminated unexpectedly")]
    Terminated { server: String },
    #[error("tool '{tool}' was not advertised by the MCP server")]
    UnknownTool { tool: String },
    #[error("MCP server '{server}' returned invalid JSON: {source}")]
    InvalidJson {
        server: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("MCP server '{server}' returned JSON-RPC error {code}: {message}")]
    Rpc {
        server: String,
        code: i64,
        message: String,
    },
    #[error("MCP server '{server}' did not answer '{method}' within {after:?}")]
    Timeout {
        server: String,
        method: String,
        after: Duration,
    },
}

impl ToolInvokeError {
    /// Whether the session can no longer reach the tool server.
    ///
    /// Fatal errors end the interactive session; the rest are reported back to
    /// the model as observations.
    pub fn is_session_fatal(&self) -> bool {
        matches!(
            self,
            ToolInvokeError::Spawn { .. }
                | ToolInvokeError::Unavailable { .. }
                | ToolInvokeError::HandshakeTimeout { .. }
                | ToolInvokeError::Transport { .. }
                | ToolInvokeError::Terminated { .. }
        )
    }
}
