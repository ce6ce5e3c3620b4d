//! JSON-RPC frame classification and MCP payload decoding.

use super::interface::ToolOutput;
use crate::types::ToolDescriptor;
use serde_json::{Value, json};

pub(crate) const PROTOCOL_VERSION: &str = "2025-06-18";

/// Classification of an inbound JSON-RPC frame.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Inbound {
    /// Answer to one of our requests (has `id`, no `method`).
    Response { key: String },
    /// Request from the server (has `id` and `method`).
    Request { method: String },
    /// Notification from the server (has `method`, no `id`).
    Notification { method: String },
    /// Anything else; dropped.
    Unrecognised,
}

pub(crate) fn classify(frame: &Value) -> Inbound {
    let method = frame.get("method").and_then(Value::as_str);
    match (frame.get("id"), method) {
        (Some(_), Some(method)) => Inbound::Request {
            method: method.to_string(),
        },
        (Some(id), None) => match response_key(id) {
            Some(key) => Inbound::Response { key },
            None => Inbound::Unrecognised,
        },
        (None, Some(method)) => Inbound::Notification {
            method: method.to_string(),
        },
        (None, None) => Inbound::Unrecognised,
    }
}

pub(crate) fn response_key(id: &Value) -> Option<String> {
    match id {
        Value::String(value) => Some(value.clone()),
        Value::Number(num) => Some(num.to_string()),
        _ => None,
    }
}

/// Extracts `(code, message)` from a JSON-RPC error response.
pub(crate) fn rpc_error(frame: &Value) -> Option<(i64, String)> {
    let error = frame.get("error")?.as_object()?;
    Some((
        error.get("code").and_then(Value::as_i64).unwrap_or(-32000),
        error
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unknown error")
            .to_string(),
    ))
}

pub(crate) fn initialize_params() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "clientInfo": {
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
        },
        "capabilities": {}
    })
}

/// Decodes a `tools/list` result. Nameless entries and repeated names are skipped.
pub(crate) fn tool_descriptors(result: &Value) -> Vec<ToolDescriptor> {
    let mut tools: Vec<ToolDescriptor> = Vec::new();
    let Some(array) = result.get("tools").and_then(Value::as_array) else {
        return tools;
    };
    for tool in array {
        let Some(name) = tool.get("name").and_then(Value::as_str) else {
            continue;
        };
        if tools.iter().any(|existing| existing.name == name) {
            continue;
        }
        tools.push(ToolDescriptor {
            name: name.to_string(),
            description: tool
                .get("description")
                .and_then(Value::as_str)
                .map(str::to_string),
            input_schema: tool
                .get("inputSchema")
                .cloned()
                .unwrap_or_else(|| json!({"type": "object", "properties": {}})),
        });
    }
    tools
}

/// Flattens a `tools/call` result into text for the model.
///
/// Text content items are joined with newlines; other item kinds are kept as
/// compact JSON so the model still sees them.
pub(crate) fn tool_output(result: &Value) -> ToolOutput {
    let is_error = result
        .get("isError")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    let text = match result.get("content").and_then(Value::as_array) {
        Some(items) if !items.is_empty() => items
            .iter()
            .map(|item| match item.get("text").and_then(Value::as_str) {
                Some(text) if item.get("type").and_then(Value::as_str) == Some("text") => {
                    text.to_string()
                }
                _ => item.to_string(),
            })
            .collect::<Vec<_>>()
            .join("\n"),
        _ => match result.get("structuredContent") {
            Some(structured) => structured.to_string(),
            None => result.to_string(),
        },
    };

    ToolOutput { text, is_error }
}
