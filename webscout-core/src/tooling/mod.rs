//! # Tooling Module
//!
//! Lifecycle of the MCP tool server: spawning the child process, the
//! `initialize` / `tools/list` handshake, and sequential `tools/call`
//! invocations over its stdio pipes.

mod error;
mod interface;
mod process;
mod protocol;
mod session;

pub use error::ToolInvokeError;
pub use interface::{ToolOutput, ToolServer};
pub use process::ToolServerProcess;
pub use session::{McpSession, SessionTimeouts};
