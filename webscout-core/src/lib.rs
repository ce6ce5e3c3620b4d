//! Agent orchestration over an MCP tool server and an OpenAI-compatible model.
//!
//! ## Modules
//!
//! - [`config`] - Preflight checks, credentials, tuning settings
//! - [`tooling`] - Tool-server process and MCP session
//! - [`model`] - Chat-completions client
//! - [`agent`] - Reason/act/observe loop
//! - [`repl`] - Interactive shell
//! - [`server`] - Stateless `/chat` companion endpoint

pub mod agent;
pub mod config;
pub mod constants;
pub mod domain;
pub mod model;
pub mod repl;
pub mod server;
pub mod tooling;


pub use agent::{Agent, AgentError, AgentOptions, AgentOutcome, AgentState};
pub use domain::types;
pub use repl::{ReplError, ReplExit};
