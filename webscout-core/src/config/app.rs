use std::fmt;

/// Credentials and model selection, validated once at startup.
#[derive(Clone, PartialEq, Eq)]
pub struct AgentConfig {
    pub base_url: String,
    pub api_token: String,
    pub model: String,
    pub tool_server_key: String,
}

impl AgentConfig {
    pub fn model_config(&self) -> ModelConfig {
        ModelConfig {
            base_url: self.base_url.clone(),
            api_token: self.api_token.clone(),
            model: self.model.clone(),
        }
    }
}

/// The model half of [`AgentConfig`], all the companion endpoint needs.
#[derive(Clone, PartialEq, Eq)]
pub struct ModelConfig {
    pub base_url: String,
    pub api_token: String,
    pub model: String,
}

impl fmt::Debug for ModelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelConfig")
            .field("base_url", &self.base_url)
            .field("api_token", &"<redacted>")
            .field("model", &self.model)
            .finish()
    }
}

impl fmt::Debug for AgentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentConfig")
            .field("base_url", &self.base_url)
            .field("api_token", &"<redacted>")
            .field("model", &self.model)
            .field("tool_server_key", &"<redacted>")
            .finish()
    }
}
