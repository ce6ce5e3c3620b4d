// End-to-end shell runs: scripted model, real MCP session over the fake server.

use async_trait::async_trait;
use serde_json::json;
use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use webscout_core::config::ServerConfig;
use webscout_core::model::{ModelError, ModelProvider, ModelReply, ModelRequest};
use webscout_core::repl::{self, ReplError, ReplExit};
use webscout_core::tooling::{McpSession, SessionTimeouts, ToolServer};
use webscout_core::types::{MessageRole, ToolCall};
use webscout_core::{Agent, AgentOptions, AgentState};

#[derive(Clone, Default)]
struct ScriptedModel {
    replies: Arc<Mutex<VecDeque<ModelReply>>>,
    requests: Arc<Mutex<Vec<ModelRequest>>>,
}

impl ScriptedModel {
    fn new(replies: Vec<ModelReply>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies.into())),
            requests: Arc::default(),
        }
    }

    fn requests(&self) -> Vec<ModelRequest> {
        self.requests.lock().expect("lock").clone()
    }
}

#[async_trait]
impl ModelProvider for ScriptedModel {
    fn id(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: ModelRequest) -> Result<ModelReply, ModelError> {
        self.requests.lock().expect("lock").push(request);
        self.replies
            .lock()
            .expect("lock")
            .pop_front()
            .ok_or_else(|| ModelError::invalid_response("scripted", "script exhausted"))
    }
}

fn tool_call(id: &str, name: &str, arguments: serde_json::Value) -> ModelReply {
    ModelReply::ToolCalls {
        thought: Some("Let me fetch that page.".into()),
        calls: vec![ToolCall {
            id: id.into(),
            name: name.into(),
            arguments,
        }],
    }
}

async fn session() -> McpSession {
    let config = ServerConfig {
        name: "fake-firecrawl".into(),
        command: PathBuf::from(env!("CARGO_BIN_EXE_fake-mcp-server")),
        args: Vec::new(),
        env: HashMap::from([
            ("FAKE_MCP_MODE".to_string(), "normal".to_string()),
            ("FIRECRAWL_API_KEY".to_string(), "fc-test-key".to_string()),
        ]),
        workdir: None,
    };
    McpSession::connect(
        &config,
        SessionTimeouts {
            handshake: Duration::from_secs(10),
            tool_call: Duration::from_secs(10),
        },
    )
    .await
    .expect("handshake succeeds")
}

#[tokio::test]
async fn scrape_question_is_answered_then_user_exits() {
    let model = ScriptedModel::new(vec![
        tool_call("call_1", "firecrawl_scrape", json!({"url": "example.com"})),
        ModelReply::Answer("example.com is a placeholder domain for documentation.".into()),
    ]);
    let mut agent = Agent::new(model.clone(), session().await, AgentOptions::default());
    let input: &[u8] = b"Summarize the homepage of example.com\nexit\n";
    let mut output = Vec::new();

    let exit = repl::run(&mut agent, input, &mut output)
        .await
        .expect("shell ends cleanly");
    agent.tool_server().shutdown().await;

    let printed = String::from_utf8(output).expect("utf8");
    assert_eq!(exit, ReplExit::UserExit);
    assert!(printed.starts_with("Available Tools: firecrawl_scrape, firecrawl_fail"));
    assert!(printed.contains("\nAgent: example.com is a placeholder domain for documentation.\n"));
    assert!(printed.ends_with("Goodbye!\n"));

    let requests = model.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].tools.len(), 4);
    assert!(requests[0].messages[0].content.contains("Prefer firecrawl_scrape"));
    let observation = requests[1]
        .messages
        .iter()
        .find(|message| message.role == MessageRole::Tool)
        .expect("tool observation sent back");
    assert!(observation.content.contains("Example Domain"));
}

#[tokio::test]
async fn tool_failure_is_fed_back_and_shell_keeps_going() {
    let model = ScriptedModel::new(vec![
        tool_call("c1", "firecrawl_fail", json!({"url": "bad"})),
        ModelReply::Answer("That URL could not be scraped.".into()),
    ]);
    let mut agent = Agent::new(model.clone(), session().await, AgentOptions::default());
    let input: &[u8] = b"scrape bad\n";
    let mut output = Vec::new();

    let exit = repl::run(&mut agent, input, &mut output).await.expect("eof");
    agent.tool_server().shutdown().await;

    assert_eq!(exit, ReplExit::EndOfInput);
    let printed = String::from_utf8(output).expect("utf8");
    assert!(printed.contains("Agent: That URL could not be scraped."));
    let last = model.requests().pop().expect("second request");
    assert!(
        last.messages
            .iter()
            .any(|message| message.content == "Tool error: Invalid URL provided")
    );
}

#[tokio::test]
async fn killed_server_ends_the_shell_with_session_lost() {
    let model = ScriptedModel::new(vec![tool_call("c1", "firecrawl_crash", json!({}))]);
    let mut agent = Agent::new(model, session().await, AgentOptions::default());
    let input: &[u8] = b"crash it\nthis line is never read\n";
    let mut output = Vec::new();

    let result = repl::run(&mut agent, input, &mut output).await;
    agent.tool_server().shutdown().await;

    assert!(matches!(result, Err(ReplError::SessionLost { .. })));
    assert!(agent.state().is_failed());
    assert!(matches!(agent.state(), AgentState::Failed { .. }));
    let printed = String::from_utf8(output).expect("utf8");
    assert!(printed.contains("Error: Lost connection to the tool server"));
}
