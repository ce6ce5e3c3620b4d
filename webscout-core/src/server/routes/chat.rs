use super::super::dto::{ChatBody, ChatQuery, ChatResponse, ErrorResponse};
use super::super::state::ServerState;
use crate::domain::text::summarise;
use crate::model::ModelProvider;
use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use std::sync::Arc;
use tracing::{error, info};

type ChatResult = Result<Json<ChatResponse>, (StatusCode, Json<ErrorResponse>)>;

pub async fn chat_query_handler<P: ModelProvider>(
    State(state): State<Arc<ServerState<P>>>,
    Query(query): Query<ChatQuery>,
) -> ChatResult {
    respond(&state, &query.prompt).await
}

pub async fn chat_body_handler<P: ModelProvider>(
    State(state): State<Arc<ServerState<P>>>,
    Json(body): Json<ChatBody>,
) -> ChatResult {
    respond(&state, &body.prompt).await
}

async fn respond<P: ModelProvider>(state: &ServerState<P>, prompt: &str) -> ChatResult {
    if prompt.trim().is_empty() {
        error!("Rejecting /chat request due to empty prompt");
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "prompt cannot be empty".to_string(),
            }),
        ));
    }

    info!(prompt = %summarise(prompt), "Received /chat request");
    match state.provider().complete_text(prompt).await {
        Ok(response) => {
            info!(response = %summarise(&response), "Chat request completed");
            Ok(Json(ChatResponse { response }))
        }
        Err(err) => {
            error!(error = %err, "Chat request failed");
            Err((
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: err.user_message(),
                }),
            ))
        }
    }
}
