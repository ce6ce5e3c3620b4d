//! Message adapters - convert conversation and tool types to the OpenAI wire format

use crate::types::{ChatMessage, MessageRole, ToolDescriptor};
use serde_json::{Map, Value, json};

/// Adapter for converting messages to different API formats
pub struct MessageAdapter;

impl MessageAdapter {
    /// Convert messages to OpenAI chat-completions format
    pub fn to_openai_format(messages: &[ChatMessage]) -> Vec<Value> {
        messages.iter().map(Self::message_to_openai).collect()
    }

    fn message_to_openai(message: &ChatMessage) -> Value {
        let mut object = Map::new();
        object.insert("role".into(), json!(message.role.as_str()));

        match message.role {
            MessageRole::Assistant if !message.tool_calls.is_empty() => {
                let content = if message.content.is_empty() {
                    Value::Null
                } else {
                    json!(message.content)
                };
                object.insert("content".into(), content);
                let calls = message
                    .tool_calls
                    .iter()
                    .map(|call| {
                        json!({
                            "id": call.id,
                            "type": "function",
                            "function": {
                                "name": call.name,
                                "arguments": call.arguments.to_string(),
                            }
                        })
                    })
                    .collect();
                object.insert("tool_calls".into(), Value::Array(calls));
            }
            MessageRole::Tool => {
                object.insert("content".into(), json!(message.content));
                if let Some(id) = &message.tool_call_id {
                    object.insert("tool_call_id".into(), json!(id));
                }
            }
            _ => {
                object.insert("content".into(), json!(message.content));
            }
        }

        Value::Object(object)
    }

    /// Convert discovered tools to OpenAI function declarations
    pub fn tools_to_openai(tools: &[ToolDescriptor]) -> Vec<Value> {
        tools
            .iter()
            .map(|tool| {
                let parameters = if tool.input_schema.is_object() {
                    tool.input_schema.clone()
                } else {
                    json!({"type": "object", "properties": {}})
                };
                json!({
                    "type": "function",
                    "function": {
                        "name": tool.name,
                        "description": tool.description.clone().unwrap_or_default(),
                        "parameters": parameters,
                    }
                })
            })
            .collect()
    }
}
