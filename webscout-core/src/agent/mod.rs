//! # Agent Module
//!
//! A ReAct-style loop that owns one conversation and one tool server. Each
//! user turn alternates between asking the model for its next move and
//! running the tools it requests, until the model answers in plain text.
//!
//! ## Key Types
//!
//! - [`Agent`] - The loop itself
//! - [`AgentOptions`] - Round cap, input cap and system prompt
//! - [`AgentOutcome`] - Final answer plus the tool steps taken
//! - [`AgentState`] - Where the loop currently is
//! - [`AgentError`] - Per-turn and session-fatal failures

mod errors;
mod instructions;
mod models;
mod runner;
mod state;


pub use errors::AgentError;
pub use instructions::compose_system_prompt;
pub use models::{AgentOptions, AgentOutcome, AgentStep};
pub use runner::Agent;
pub use state::AgentState;
