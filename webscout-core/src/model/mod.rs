//! Model infrastructure module
//!
//! # Structure
//! - `types` - Request, Reply, Error types
//! - `traits` - ModelProvider trait
//! - `adapter` - OpenAI wire-format adapters
//! - `clients` - HTTP client implementations

pub mod adapter;
pub mod clients;
pub mod traits;
pub mod types;

// Re-exports for convenience
pub use clients::OpenAIClient;
pub use traits::ModelProvider;
pub use types::{ModelError, ModelReply, ModelRequest};
