//! MCP client session over a child process's stdio.
//!
//! Frames are newline-delimited JSON-RPC 2.0 messages. A background task reads
//! the child's stdout and completes pending requests by id; writes go through
//! a single buffered writer.

use super::error::ToolInvokeError;
use super::interface::{ToolOutput, ToolServer};
use super::process::ToolServerProcess;
use super::protocol::{self, Inbound};
use crate::config::ServerConfig;
use crate::types::ToolDescriptor;
use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::process::{ChildStdin, ChildStdout};
use tokio::sync::{Mutex as AsyncMutex, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

type Responder = oneshot::Sender<Result<Value, ToolInvokeError>>;

/// Bounds on how long the session waits for the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTimeouts {
    /// Covers `initialize` through `tools/list`.
    pub handshake: Duration,
    /// Covers a single `tools/call`.
    pub tool_call: Duration,
}

/// A connected MCP server whose tool set was fixed at discovery time.
pub struct McpSession {
    inner: Arc<SessionInner>,
    process: AsyncMutex<Option<ToolServerProcess>>,
    reader: JoinHandle<()>,
    tools: Vec<ToolDescriptor>,
    instructions: Option<String>,
    call_lock: AsyncMutex<()>,
    tool_timeout: Duration,
}

struct SessionInner {
    server: String,
    writer: AsyncMutex<Option<BufWriter<ChildStdin>>>,
    pending: AsyncMutex<HashMap<String, Responder>>,
    id_counter: AtomicU64,
    closed: AtomicBool,
}

struct Handshake {
    tools: Vec<ToolDescriptor>,
    instructions: Option<String>,
}

impl McpSession {
    /// Spawns the server, performs the handshake, and discovers its tools.
    ///
    /// The child is torn down on every failure path.
    pub async fn connect(
        config: &ServerConfig,
        timeouts: SessionTimeouts,
    ) -> Result<Self, ToolInvokeError> {
        let (mut process, stdin, stdout) = ToolServerProcess::spawn(config)?;
        let inner = Arc::new(SessionInner {
            server: config.name.clone(),
            writer: AsyncMutex::new(Some(BufWriter::new(stdin))),
            pending: AsyncMutex::new(HashMap::new()),
            id_counter: AtomicU64::new(1),
            closed: AtomicBool::new(false),
        });
        let reader = tokio::spawn(Arc::clone(&inner).reader_loop(stdout));

        let outcome = tokio::time::timeout(timeouts.handshake, inner.handshake()).await;
        let failure = match outcome {
            Ok(Ok(handshake)) => {
                info!(
                    server = %config.name,
                    tools = handshake.tools.len(),
                    "MCP handshake completed"
                );
                return Ok(Self {
                    inner,
                    process: AsyncMutex::new(Some(process)),
                    reader,
                    tools: handshake.tools,
                    instructions: handshake.instructions,
                    call_lock: AsyncMutex::new(()),
                    tool_timeout: timeouts.tool_call,
                });
            }
            Ok(Err(
                ToolInvokeError::Terminated { .. } | ToolInvokeError::Transport { .. },
            )) => {
                let status = match process.exit_status() {
                    Some(status) => status.to_string(),
                    None => "stdout closed".to_string(),
                };
                ToolInvokeError::Unavailable {
                    server: config.name.clone(),
                    status,
                }
            }
            Ok(Err(err)) => err,
            Err(_) => ToolInvokeError::HandshakeTimeout {
                server: config.name.clone(),
                after: timeouts.handshake,
            },
        };

        warn!(server = %config.name, error = %failure, "MCP handshake failed");
        inner.close_writer().await;
        process.shutdown().await;
        reader.abort();
        Err(failure)
    }

    pub fn server_name(&self) -> &str {
        &self.inner.server
    }

    /// Whether the server's stdout has closed.
    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::SeqCst)
    }

    /// Process id of the child, while it is owned by this session.
    pub async fn process_id(&self) -> Option<u32> {
        self.process.lock().await.as_ref().and_then(ToolServerProcess::id)
    }

    /// Closes the pipe and terminates the child.
    pub async fn shutdown(&self) {
        self.inner.close_writer().await;
        if let Some(process) = self.process.lock().await.take() {
            process.shutdown().await;
        }
        self.reader.abort();
        self.inner.fail_all_pending().await;
    }
}

#[async_trait]
impl ToolServer for McpSession {
    fn tools(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    fn instructions(&self) -> Option<&str> {
        self.instructions.as_deref()
    }

    async fn invoke(&self, tool: &str, arguments: Value) -> Result<ToolOutput, ToolInvokeError> {
        if !self.has_tool(tool) {
            return Err(ToolInvokeError::UnknownTool {
                tool: tool.to_string(),
            });
        }

        let _turn = self.call_lock.lock().await;
        let params = json!({
            "name": tool,
            "arguments": match arguments {
                Value::Null => Value::Object(Default::default()),
                other => other,
            }
        });
        debug!(server = %self.inner.server, tool, "Calling MCP tool");
        let result = self
            .inner
            .send_request("tools/call", params, Some(self.tool_timeout))
            .await?;
        Ok(protocol::tool_output(&result))
    }
}

impl Drop for McpSession {
    fn drop(&mut self) {
        self.reader.abort();
    }
}

impl SessionInner {
    async fn handshake(&self) -> Result<Handshake, ToolInvokeError> {
        let init_result = self
            .send_request("initialize", protocol::initialize_params(), None)
            .await?;
        let instructions = init_result
            .get("instructions")
            .and_then(Value::as_str)
            .map(str::to_string);
        if let Some(server_info) = init_result.get("serverInfo") {
            debug!(server = %self.server, info = %server_info, "MCP server identified");
        }
        self.send_notification("notifications/initialized", json!({}))
            .await?;

        let listed = self.send_request("tools/list", json!({}), None).await?;
        Ok(Handshake {
            tools: protocol::tool_descriptors(&listed),
            instructions,
        })
    }

    async fn reader_loop(self: Arc<Self>, stdout: ChildStdout) {
        let mut lines = BufReader::new(stdout).lines();
        loop {
            let raw = match lines.next_line().await {
                Ok(Some(raw)) => raw,
                Ok(None) => break,
                Err(err) => {
                    warn!(server = %self.server, %err, "failed to read from MCP server");
                    break;
                }
            };
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                continue;
            }
            if trimmed.starts_with('\u{1b}') {
                debug!(
                    server = %self.server,
                    line = trimmed,
                    "skipping non-JSON ANSI log line from MCP server"
                );
                continue;
            }
            match serde_json::from_str::<Value>(trimmed) {
                Ok(frame) => {
                    if let Err(err) = self.process_inbound_message(frame).await {
                        warn!(
                            server = %self.server,
                            %err,
                            "failed to process message from MCP server"
                        );
                    }
                }
                Err(source) => {
                    warn!(
                        server = %self.server,
                        line = trimmed,
                        %source,
                        "received invalid JSON from MCP server"
                    );
                }
            }
        }

        info!(server = %self.server, "MCP server closed its output stream");
        self.close_writer().await;
        self.fail_all_pending().await;
    }

    async fn process_inbound_message(&self, frame: Value) -> Result<(), ToolInvokeError> {
        match protocol::classify(&frame) {
            Inbound::Response { key } => {
                self.handle_response(key, frame).await;
                Ok(())
            }
            Inbound::Request { method } => self.handle_server_request(&method, frame).await,
            Inbound::Notification { method } => {
                self.handle_notification(&method);
                Ok(())
            }
            Inbound::Unrecognised => Ok(()),
        }
    }

    async fn handle_response(&self, key: String, frame: Value) {
        let responder = self.pending.lock().await.remove(&key);
        let Some(sender) = responder else {
            debug!(
                server = %self.server,
                response_id = key,
                "received response for unknown request"
            );
            return;
        };

        let outcome = if frame.get("error").is_some() {
            Err(match protocol::rpc_error(&frame) {
                Some((code, message)) => ToolInvokeError::Rpc {
                    server: self.server.clone(),
                    code,
                    message,
                },
                None => self.transport_error("missing error payload in response"),
            })
        } else {
            Ok(frame.get("result").cloned().unwrap_or(Value::Null))
        };
        let _ = sender.send(outcome);
    }

    async fn handle_server_request(&self, method: &str, frame: Value) -> Result<(), ToolInvokeError> {
        let id = frame.get("id").cloned().unwrap_or(Value::Null);
        if method == "ping" {
            return self
                .write_message(&json!({"jsonrpc": "2.0", "id": id, "result": {}}))
                .await;
        }

        warn!(
            server = %self.server,
            method,
            "server sent unsupported request"
        );
        self.write_message(&json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": {
                "code": -32601,
                "message": format!("client does not implement method '{method}'"),
            }
        }))
        .await
    }

    fn handle_notification(&self, method: &str) {
        if method == "notifications/tools/list_changed" {
            info!(
                server = %self.server,
                "ignoring tool list change; the tool set is fixed for this session"
            );
        } else {
            debug!(
                server = %self.server,
                method,
                "received notification from server"
            );
        }
    }

    async fn send_request(
        &self,
        method: &str,
        params: Value,
        deadline: Option<Duration>,
    ) -> Result<Value, ToolInvokeError> {
        let id = self.next_id();
        let (tx, rx) = oneshot::channel();
        {
            let mut pending = self.pending.lock().await;
            if self.closed.load(Ordering::SeqCst) {
                return Err(self.terminated());
            }
            pending.insert(id.clone(), tx);
        }

        let payload = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params
        });
        if let Err(err) = self.write_message(&payload).await {
            self.pending.lock().await.remove(&id);
            return Err(err);
        }

        let received = match deadline {
            Some(after) => match tokio::time::timeout(after, rx).await {
                Ok(received) => received,
                Err(_) => {
                    self.pending.lock().await.remove(&id);
                    return Err(ToolInvokeError::Timeout {
                        server: self.server.clone(),
                        method: method.to_string(),
                        after,
                    });
                }
            },
            None => rx.await,
        };

        match received {
            Ok(outcome) => outcome,
            Err(_) => Err(self.terminated()),
        }
    }

    async fn send_notification(&self, method: &str, params: Value) -> Result<(), ToolInvokeError> {
        let payload = json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params
        });
        self.write_message(&payload).await
    }

    async fn write_message(&self, message: &Value) -> Result<(), ToolInvokeError> {
        let encoded =
            serde_json::to_string(message).map_err(|source| ToolInvokeError::InvalidJson {
                server: self.server.clone(),
                source,
            })?;

        let mut writer = self.writer.lock().await;
        let Some(stream) = writer.as_mut() else {
            return Err(self.terminated());
        };
        let io_error = |source: std::io::Error| ToolInvokeError::Transport {
            server: self.server.clone(),
            message: source.to_string(),
        };
        stream.write_all(encoded.as_bytes()).await.map_err(io_error)?;
        stream.write_all(b"\n").await.map_err(io_error)?;
        stream.flush().await.map_err(io_error)?;
        Ok(())
    }

    async fn close_writer(&self) {
        if let Some(mut stream) = self.writer.lock().await.take() {
            let _ = stream.shutdown().await;
        }
    }

    async fn fail_all_pending(&self) {
        let mut pending = self.pending.lock().await;
        self.closed.store(true, Ordering::SeqCst);
        for (_, sender) in pending.drain() {
            let _ = sender.send(Err(self.terminated()));
        }
    }

    fn next_id(&self) -> String {
        let id = self.id_counter.fetch_add(1, Ordering::SeqCst);
        format!("req-{id}")
    }

    fn terminated(&self) -> ToolInvokeError {
        ToolInvokeError::Terminated {
            server: self.server.clone(),
        }
    }

    fn transport_error(&self, message: impl Into<String>) -> ToolInvokeError {
        ToolInvokeError::Transport {
            server: self.server.clone(),
            message: message.into(),
        }
    }
}
