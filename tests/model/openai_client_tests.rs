// OpenAI-compatible client against an in-process fake endpoint.

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;
use webscout_core::model::{ModelError, ModelProvider, ModelReply, ModelRequest, OpenAIClient};
use webscout_core::types::{ChatMessage, ToolDescriptor};

#[derive(Clone)]
struct FakeEndpoint {
    status: StatusCode,
    reply: Value,
    seen: Arc<Mutex<Vec<(Option<String>, Value)>>>,
}

async fn completions(
    State(fake): State<FakeEndpoint>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let auth = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    fake.seen.lock().expect("lock").push((auth, body));
    (fake.status, Json(fake.reply.clone()))
}

async fn start(fake: FakeEndpoint) -> SocketAddr {
    let app = Router::new()
        .route("/v1/chat/completions", post(completions))
        .with_state(fake);
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

fn fake(status: StatusCode, reply: Value) -> FakeEndpoint {
    FakeEndpoint {
        status,
        reply,
        seen: Arc::default(),
    }
}

fn client(addr: SocketAddr, token: &str) -> OpenAIClient {
    OpenAIClient::new(
        format!("http://{addr}/v1/"),
        token,
        "moonshotai/Kimi-K2-Instruct:fireworks-ai",
        Duration::from_secs(5),
    )
    .expect("client builds")
}

fn scrape_tool() -> ToolDescriptor {
    ToolDescriptor {
        name: "firecrawl_scrape".into(),
        description: Some("Scrape a single page".into()),
        input_schema: json!({"type": "object", "properties": {"url": {"type": "string"}}}),
    }
}

#[tokio::test]
async fn tool_call_reply_round_trips_through_http() {
    let endpoint = fake(
        StatusCode::OK,
        json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_9",
                        "type": "function",
                        "function": {"name": "firecrawl_scrape", "arguments": "{\"url\":\"https://example.com\"}"}
                    }]
                }
            }]
        }),
    );
    let addr = start(endpoint.clone()).await;

    let reply = client(addr, "hf_secret")
        .complete(ModelRequest {
            messages: vec![
                ChatMessage::system("You can scrape."),
                ChatMessage::user("Summarize example.com"),
            ],
            tools: vec![scrape_tool()],
        })
        .await
        .expect("request succeeds");

    let ModelReply::ToolCalls { thought, calls } = reply else {
        panic!("expected tool calls");
    };
    assert!(thought.is_none());
    assert_eq!(calls[0].id, "call_9");
    assert_eq!(calls[0].arguments, json!({"url": "https://example.com"}));

    let seen = endpoint.seen.lock().expect("lock").clone();
    let (auth, body) = &seen[0];
    assert_eq!(auth.as_deref(), Some("Bearer hf_secret"));
    assert_eq!(body["model"], "moonshotai/Kimi-K2-Instruct:fireworks-ai");
    assert_eq!(body["temperature"], json!(0.0));
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["tools"][0]["function"]["name"], "firecrawl_scrape");
}

#[tokio::test]
async fn plain_prompt_omits_tools() {
    let endpoint = fake(
        StatusCode::OK,
        json!({"choices": [{"message": {"role": "assistant", "content": "Hi there"}}]}),
    );
    let addr = start(endpoint.clone()).await;

    let text = client(addr, "hf_secret")
        .complete_text("hello")
        .await
        .expect("request succeeds");

    assert_eq!(text, "Hi there");
    let seen = endpoint.seen.lock().expect("lock").clone();
    assert!(seen[0].1.get("tools").is_none());
}

#[tokio::test]
async fn http_error_status_is_a_network_error() {
    let endpoint = fake(StatusCode::UNAUTHORIZED, json!({"error": "bad token"}));
    let addr = start(endpoint).await;

    let err = client(addr, "hf_wrong")
        .complete(ModelRequest::prompt("hello"))
        .await
        .expect_err("rejected");

    assert!(matches!(err, ModelError::Network { .. }));
    assert!(err.user_message().contains("rejected the credentials"));
}

#[tokio::test]
async fn malformed_body_is_an_invalid_response() {
    let endpoint = fake(StatusCode::OK, json!({"unexpected": true}));
    let addr = start(endpoint).await;

    let err = client(addr, "hf_secret")
        .complete(ModelRequest::prompt("hello"))
        .await
        .expect_err("bad body");

    assert!(matches!(err, ModelError::InvalidResponse { .. }), "got {err:?}");
}
