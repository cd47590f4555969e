//! Plain REST endpoints mirroring the three MCP tools.

use axum::{extract::State, http::StatusCode, Json};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use validator::Validate;

use crate::discord::client::DEFAULT_MESSAGE_LIMIT;
use crate::discord::simplify::{simplify_channels, simplify_message, simplify_messages};
use crate::error::ValidationError;
use crate::http::router::AppState;
use crate::mcp::server::{SERVER_NAME, SERVER_VERSION};

/// Service description returned by `GET /`
pub const SERVICE_DESCRIPTION: &str = "Discord integration API for MCP clients";

/// `message` of a successful `POST /send-message`
pub const SEND_SUCCESS_MESSAGE: &str = "Message sent successfully";

/// Body of `POST /send-message`
#[derive(Debug, Clone, Serialize, Deserialize, Validate, JsonSchema)]
pub struct SendMessageRequest {
    /// ID of the Discord channel
    #[validate(length(min = 1, message = "channel_id must not be empty"))]
    pub channel_id: String,

    /// Content of the message to send
    #[validate(length(min = 1, message = "message must not be empty"))]
    pub message: String,
}

/// Body of `POST /get-messages`
#[derive(Debug, Clone, Serialize, Deserialize, Validate, JsonSchema)]
pub struct GetMessagesRequest {
    /// ID of the Discord channel
    #[validate(length(min = 1, message = "channel_id must not be empty"))]
    pub channel_id: String,

    /// Maximum number of messages to return (default: 10)
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100, message = "limit must be between 1 and 100"))]
    pub limit: u32,
}

/// Body of `POST /get-channels`
#[derive(Debug, Clone, Serialize, Deserialize, Validate, JsonSchema)]
pub struct GetChannelsRequest {
    /// ID of the Discord server (guild)
    #[validate(length(min = 1, message = "guild_id must not be empty"))]
    pub guild_id: String,
}

/// Envelope for every REST response
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct GenericResponse {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl GenericResponse {
    fn ok(message: Option<String>, data: Value) -> Self {
        Self {
            success: true,
            message,
            data: Some(data),
            ..Default::default()
        }
    }

    fn failed(error: impl ToString) -> Self {
        Self {
            success: false,
            error: Some(error.to_string()),
            ..Default::default()
        }
    }
}

type RestReply = (StatusCode, Json<GenericResponse>);

fn default_limit() -> u32 {
    DEFAULT_MESSAGE_LIMIT
}

fn invalid(errors: validator::ValidationErrors) -> RestReply {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(GenericResponse::failed(ValidationError::from_report(&errors))),
    )
}

fn upstream_failed(error: impl ToString) -> RestReply {
    (StatusCode::OK, Json(GenericResponse::failed(error)))
}

/// `GET /`: basic service information
pub async fn root() -> Json<Value> {
    Json(json!({
        "name": SERVER_NAME,
        "version": SERVER_VERSION,
        "description": SERVICE_DESCRIPTION,
    }))
}

/// `POST /send-message`
pub async fn send_message(
    State(state): State<AppState>,
    Json(request): Json<SendMessageRequest>,
) -> RestReply {
    if let Err(e) = request.validate() {
        return invalid(e);
    }

    match state
        .backend
        .send_message(&request.channel_id, &request.message)
        .await
    {
        Ok(sent) => match serde_json::to_value(simplify_message(&sent)) {
            Ok(data) => (
                StatusCode::OK,
                Json(GenericResponse::ok(Some(SEND_SUCCESS_MESSAGE.to_string()), data)),
            ),
            Err(e) => upstream_failed(e),
        },
        Err(e) => upstream_failed(e),
    }
}

/// `POST /get-messages`
pub async fn get_messages(
    State(state): State<AppState>,
    Json(request): Json<GetMessagesRequest>,
) -> RestReply {
    if let Err(e) = request.validate() {
        return invalid(e);
    }

    match state
        .backend
        .get_channel_messages(&request.channel_id, request.limit)
        .await
    {
        Ok(messages) => (
            StatusCode::OK,
            Json(GenericResponse::ok(
                None,
                json!({ "messages": simplify_messages(&messages) }),
            )),
        ),
        Err(e) => upstream_failed(e),
    }
}

/// `POST /get-channels`
pub async fn get_channels(
    State(state): State<AppState>,
    Json(request): Json<GetChannelsRequest>,
) -> RestReply {
    if let Err(e) = request.validate() {
        return invalid(e);
    }

    match state.backend.get_guild_channels(&request.guild_id).await {
        Ok(channels) => (
            StatusCode::OK,
            Json(GenericResponse::ok(
                None,
                json!({ "channels": simplify_channels(&channels) }),
            )),
        ),
        Err(e) => upstream_failed(e),
    }
}
