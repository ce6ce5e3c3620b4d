//! Model traits

use super::types::{ModelError, ModelReply, ModelRequest};
use async_trait::async_trait;

/// A remote chat-completion capability.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Identifier used in logs and error messages.
    fn id(&self) -> &str;

    /// Ask the model for its next move given the conversation and available tools.
    async fn complete(&self, request: ModelRequest) -> Result<ModelReply, ModelError>;

    /// Single-prompt completion with no tools; returns the raw text.
    async fn complete_text(&self, prompt: &str) -> Result<String, ModelError> {
        match self.complete(ModelRequest::prompt(prompt)).await? {
            ModelReply::Answer(text) => Ok(text),
            ModelReply::ToolCalls {
                thought: Some(text),
                ..
            } => Ok(text),
            ModelReply::ToolCalls { thought: None, .. } => Err(ModelError::invalid_response(
                self.id(),
                "requested tools although none were offered",
            )),
        }
    }
}
