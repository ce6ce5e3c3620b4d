use super::error::ServerError;
use super::routes::chat;
use super::state::ServerState;
use crate::model::ModelProvider;
use axum::Router;
use axum::routing::get;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Routes for the companion endpoint, with CORS open to any origin.
pub fn router<P>(provider: Arc<P>) -> Router
where
    P: ModelProvider + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let state = Arc::new(ServerState::new(provider));
    Router::new()
        .route(
            "/chat",
            get(chat::chat_query_handler::<P>).post(chat::chat_body_handler::<P>),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

pub async fn serve<P>(provider: Arc<P>, addr: SocketAddr) -> Result<(), ServerError>
where
    P: ModelProvider + 'static,
{
    info!(%addr, "Binding HTTP server");
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    info!(%addr, "HTTP server ready to accept connections");

    axum::serve(listener, router(provider).into_make_service())
        .await
        .map_err(ServerError::Serve)
}
