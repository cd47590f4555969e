//! Axum router for the REST and MCP surfaces.
//!
//! Routes: `GET /`, `POST /send-message`, `POST /get-messages`,
//! `POST /get-channels`, `POST /mcp`, `GET /openapi.json`.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::discord::client::MessagingBackend;
use crate::http::{openapi, rest};
use crate::mcp::server::McpServer;
use crate::mcp::types::JsonRpcResponse;

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState {
    /// The MCP request dispatcher.
    pub mcp: Arc<McpServer>,
    /// Upstream used directly by the REST endpoints.
    pub backend: Arc<dyn MessagingBackend>,
}

impl AppState {
    /// Wire the dispatcher and REST surface to one backend.
    pub fn new(backend: Arc<dyn MessagingBackend>, config: &Config) -> Self {
        Self {
            mcp: Arc::new(McpServer::new(backend.clone(), config)),
            backend,
        }
    }
}

/// Builds the axum `Router` with all routes, CORS and request tracing.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(rest::root))
        .route("/send-message", post(rest::send_message))
        .route("/get-messages", post(rest::get_messages))
        .route("/get-channels", post(rest::get_channels))
        .route("/mcp", post(handle_mcp))
        .route("/openapi.json", get(openapi::openapi_spec))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

/// JSON-RPC envelope endpoint. Domain failures are JSON-RPC errors with
/// `200 OK`; only requests that cannot be processed get a `500`.
async fn handle_mcp(State(state): State<AppState>, body: Bytes) -> Response {
    let result = match std::str::from_utf8(&body) {
        Ok(text) => state.mcp.handle_message(text).await,
        Err(e) => Err(crate::error::DiscordMcpError::Mcp(
            crate::error::McpError::InvalidRequest {
                message: e.to_string(),
            },
        )),
    };

    match result {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            tracing::error!("MCP request failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(JsonRpcResponse::internal(e)),
            )
                .into_response()
        }
    }
}
