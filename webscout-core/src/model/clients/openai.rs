//! OpenAI-compatible client implementation

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, info};

use super::base::HttpClientBase;
use crate::config::ModelConfig;
use crate::model::adapter::MessageAdapter;
use crate::model::traits::ModelProvider;
use crate::model::types::{ModelError, ModelReply, ModelRequest};
use crate::types::ToolCall;

const PROVIDER_ID: &str = "openai-compatible";
const CHAT_COMPLETIONS_PATH: &str = "chat/completions";
const FALLBACK_CALL_PREFIX: &str = "webscout_call_";

/// Chat-completions client for any OpenAI-compatible endpoint.
///
/// Decoding temperature is pinned to zero so tool selection stays consistent.
/// Tool calls that arrive without an id get one from a counter shared by all
/// clones, so ids never repeat within a conversation.
#[derive(Clone)]
pub struct OpenAIClient {
    base: HttpClientBase,
    model: String,
    next_call_id: Arc<AtomicU64>,
}

impl OpenAIClient {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ModelError> {
        Ok(Self {
            base: HttpClientBase::new(
                PROVIDER_ID.to_string(),
                endpoint.into(),
                api_key.into(),
                timeout,
            )?,
            model: model.into(),
            next_call_id: Arc::new(AtomicU64::new(1)),
        })
    }

    pub fn from_config(config: &ModelConfig, timeout: Duration) -> Result<Self, ModelError> {
        Self::new(
            config.base_url.clone(),
            config.api_token.clone(),
            config.model.clone(),
            timeout,
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn fallback_call_id(&self) -> String {
        let n = self.next_call_id.fetch_add(1, Ordering::Relaxed);
        format!("{FALLBACK_CALL_PREFIX}{n}")
    }

    fn decode(&self, response: OpenAIResponse) -> Result<ModelReply, ModelError> {
        let message = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .ok_or_else(|| ModelError::invalid_response(&self.base.id, "missing message"))?;

        let text = message.content.filter(|text| !text.trim().is_empty());
        let raw_calls = message.tool_calls.unwrap_or_default();

        if raw_calls.is_empty() {
            return text
                .map(ModelReply::Answer)
                .ok_or_else(|| ModelError::invalid_response(&self.base.id, "missing content"));
        }

        let calls = raw_calls
            .into_iter()
            .map(|call| {
                let arguments = parse_arguments(call.function.arguments.as_deref()).map_err(
                    |reason| {
                        ModelError::invalid_response(
                            &self.base.id,
                            format!(
                                "arguments for tool '{}' are not valid JSON: {reason}",
                                call.function.name
                            ),
                        )
                    },
                )?;
                Ok(ToolCall {
                    id: call
                        .id
                        .filter(|id| !id.trim().is_empty())
                        .unwrap_or_else(|| self.fallback_call_id()),
                    name: call.function.name,
                    arguments,
                })
            })
            .collect::<Result<Vec<_>, ModelError>>()?;

        Ok(ModelReply::ToolCalls {
            thought: text,
            calls,
        })
    }
}

fn parse_arguments(raw: Option<&str>) -> Result<Value, serde_json::Error> {
    match raw.map(str::trim) {
        None | Some("") => Ok(json!({})),
        Some(text) => serde_json::from_str(text),
    }
}

#[async_trait]
impl ModelProvider for OpenAIClient {
    fn id(&self) -> &str {
        &self.base.id
    }

    async fn complete(&self, request: ModelRequest) -> Result<ModelReply, ModelError> {
        let url = self.base.build_url(CHAT_COMPLETIONS_PATH);
        let tools = MessageAdapter::tools_to_openai(&request.tools);

        let payload = OpenAIRequest {
            model: self.model.clone(),
            messages: MessageAdapter::to_openai_format(&request.messages),
            temperature: 0.0,
            stream: false,
            tools,
        };

        info!(
            provider = self.base.id.as_str(),
            model = self.model.as_str(),
            messages = request.messages.len(),
            tools = request.tools.len(),
            "Sending request to OpenAI-compatible provider"
        );

        let response: OpenAIResponse = self.base.post_with_bearer(&url, &payload).await?;
        let reply = self.decode(response)?;
        debug!(
            tool_calls = match &reply {
                ModelReply::ToolCalls { calls, .. } => calls.len(),
                ModelReply::Answer(_) => 0,
            },
            "Received response from OpenAI-compatible provider"
        );
        Ok(reply)
    }
}

#[derive(Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<Value>,
    temperature: f32,
    stream: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Value>,
}

#[derive(Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Deserialize)]
struct OpenAIChoice {
    message: Option<OpenAIMessage>,
}

#[derive(Deserialize)]
struct OpenAIMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<OpenAIToolCall>>,
}

#[derive(Deserialize)]
struct OpenAIToolCall {
    #[serde(default)]
    id: Option<String>,
    function: OpenAIFunction,
}

#[derive(Deserialize)]
struct OpenAIFunction {
    name: String,
    #[serde(default)]
    arguments: Option<String>,
}
