// Companion /chat endpoint over real HTTP, backed by a fake upstream model.

use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use axum::routing::post;
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use webscout_core::model::OpenAIClient;
use webscout_core::server::{ChatResponse, ErrorResponse, router};

async fn spawn(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

async fn upstream(status: StatusCode) -> SocketAddr {
    let app = Router::new().route(
        "/v1/chat/completions",
        post(move |Json(body): Json<Value>| async move {
            let prompt = body["messages"][0]["content"].as_str().unwrap_or_default().to_string();
            (
                status,
                Json(json!({
                    "choices": [{"message": {"role": "assistant", "content": format!("echo: {prompt}")}}]
                })),
            )
        }),
    );
    spawn(app).await
}

async fn endpoint(upstream_status: StatusCode) -> String {
    let model_addr = upstream(upstream_status).await;
    let provider = OpenAIClient::new(
        format!("http://{model_addr}/v1"),
        "hf_token",
        "kimi",
        Duration::from_secs(5),
    )
    .expect("client builds");
    let addr = spawn(router(Arc::new(provider))).await;
    format!("http://{addr}/chat")
}

#[tokio::test]
async fn get_and_post_return_model_text() {
    let url = endpoint(StatusCode::OK).await;
    let http = reqwest::Client::new();

    let got: ChatResponse = http
        .get(&url)
        .query(&[("prompt", "hello there")])
        .send()
        .await
        .expect("get")
        .json()
        .await
        .expect("json");
    assert_eq!(got.response, "echo: hello there");

    let posted: ChatResponse = http
        .post(&url)
        .json(&json!({"prompt": "posted"}))
        .send()
        .await
        .expect("post")
        .json()
        .await
        .expect("json");
    assert_eq!(posted.response, "echo: posted");
}

#[tokio::test]
async fn missing_prompt_is_bad_request() {
    let url = endpoint(StatusCode::OK).await;

    let response = reqwest::get(&url).await.expect("get");

    assert_eq!(response.status().as_u16(), 400);
    let body: ErrorResponse = response.json().await.expect("json");
    assert_eq!(body.error, "prompt cannot be empty");
}

#[tokio::test]
async fn upstream_failure_is_bad_gateway() {
    let url = endpoint(StatusCode::SERVICE_UNAVAILABLE).await;

    let response = reqwest::Client::new()
        .post(&url)
        .json(&json!({"prompt": "hi"}))
        .send()
        .await
        .expect("post");

    assert_eq!(response.status().as_u16(), 502);
    let body: ErrorResponse = response.json().await.expect("json");
    assert!(body.error.contains("currently unavailable"));
}
