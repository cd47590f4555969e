//! MCP Tool definitions and handlers
//!
//! Defines the tool catalog and the implementation of each tool.

use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{json, Value};
use validator::Validate;

use crate::discord::client::{MessagingBackend, DEFAULT_MESSAGE_LIMIT};
use crate::discord::simplify::{simplify_channels, simplify_messages};
use crate::error::{DiscordMcpError, McpError, Result, ValidationError};
use crate::mcp::types::{
    GetChannelsResult, GetMessagesResult, SendMessageResult, Tool, ToolInvocation,
};

/// Tool names
pub mod names {
    pub const SEND_MESSAGE: &str = "send_message";
    pub const GET_MESSAGES: &str = "get_messages";
    pub const GET_CHANNELS: &str = "get_channels";
}

/// Acknowledgement returned by `send_message`
pub const MESSAGE_SENT: &str = "sent";

/// The static tool catalog, keyed by tool name
pub fn tool_catalog() -> &'static BTreeMap<String, Tool> {
    static CATALOG: OnceLock<BTreeMap<String, Tool>> = OnceLock::new();

    CATALOG.get_or_init(|| {
        BTreeMap::from([
            tool_def(
                names::SEND_MESSAGE,
                "Sends a message to a Discord channel",
                send_message_schema(),
            ),
            tool_def(
                names::GET_MESSAGES,
                "Retrieves recent messages from a Discord channel",
                get_messages_schema(),
            ),
            tool_def(
                names::GET_CHANNELS,
                "Lists the channels of a Discord server (guild)",
                get_channels_schema(),
            ),
        ])
    })
}

/// Tool handler
pub struct ToolHandler {
    backend: Arc<dyn MessagingBackend>,

    /// Fallback for `send_message`
    default_channel_id: Option<String>,
}

impl ToolHandler {
    /// Create a new tool handler
    pub fn new(backend: Arc<dyn MessagingBackend>, default_channel_id: Option<String>) -> Self {
        Self {
            backend,
            default_channel_id: default_channel_id.filter(|c| !c.is_empty()),
        }
    }

    /// Call a tool
    ///
    /// Domain failures come back as `DiscordMcpError::Mcp`; anything else is
    /// an internal fault.
    pub async fn call_tool(&self, invocation: &ToolInvocation) -> Result<Value> {
        let args = invocation.arguments_or_empty();

        match invocation.tool_name() {
            Some(names::SEND_MESSAGE) => self.handle_send_message(args).await,
            Some(names::GET_MESSAGES) => self.handle_get_messages(args).await,
            Some(names::GET_CHANNELS) => self.handle_get_channels(args).await,
            _ => Err(McpError::UnknownTool {
                name: invocation.tool_label(),
            }
            .into()),
        }
    }

    /// Explicit argument wins, then the configured default
    fn resolve_channel(&self, explicit: Option<String>) -> Option<String> {
        explicit
            .filter(|c| !c.is_empty())
            .or_else(|| self.default_channel_id.clone())
    }

    // ==================== Tool Handlers ====================

    async fn handle_send_message(&self, args: Value) -> Result<Value> {
        let args: SendMessageArgs = deserialize_args(args)?;

        let channel_id = self
            .resolve_channel(args.channel_id.clone())
            .ok_or(McpError::ChannelUnresolved)?;
        validate_args(&args)?;
        let content = args.content.unwrap_or_default();

        self.backend
            .send_message(&channel_id, &content)
            .await
            .map_err(McpError::from)?;

        Ok(serde_json::to_value(SendMessageResult {
            success: true,
            message: MESSAGE_SENT.to_string(),
        })?)
    }

    async fn handle_get_messages(&self, args: Value) -> Result<Value> {
        let args: GetMessagesArgs = deserialize_args(args)?;
        validate_args(&args)?;
        let channel_id = args.channel_id.unwrap_or_default();
        let limit = args.limit.unwrap_or(DEFAULT_MESSAGE_LIMIT);

        let messages = self
            .backend
            .get_channel_messages(&channel_id, limit)
            .await
            .map_err(McpError::from)?;

        Ok(serde_json::to_value(GetMessagesResult {
            success: true,
            messages: simplify_messages(&messages),
        })?)
    }

    async fn handle_get_channels(&self, args: Value) -> Result<Value> {
        let args: GetChannelsArgs = deserialize_args(args)?;
        validate_args(&args)?;
        let guild_id = args.guild_id.unwrap_or_default();

        let channels = self
            .backend
            .get_guild_channels(&guild_id)
            .await
            .map_err(McpError::from)?;

        Ok(serde_json::to_value(GetChannelsResult {
            success: true,
            channels: simplify_channels(&channels),
        })?)
    }
}

// ==================== Arguments ====================

/// Arguments of `send_message`
#[derive(Debug, Deserialize, Validate)]
pub struct SendMessageArgs {
    #[serde(default, deserialize_with = "snowflake")]
    pub channel_id: Option<String>,

    #[serde(default)]
    #[validate(required, length(min = 1, message = "content must not be empty"))]
    pub content: Option<String>,
}

/// Arguments of `get_messages`
#[derive(Debug, Deserialize, Validate)]
pub struct GetMessagesArgs {
    #[serde(default, deserialize_with = "snowflake")]
    #[validate(required, length(min = 1, message = "channel_id must not be empty"))]
    pub channel_id: Option<String>,

    #[serde(default)]
    #[validate(range(min = 1, max = 100, message = "limit must be between 1 and 100"))]
    pub limit: Option<u32>,
}

/// Arguments of `get_channels`
#[derive(Debug, Deserialize, Validate)]
pub struct GetChannelsArgs {
    #[serde(default, deserialize_with = "snowflake")]
    #[validate(required, length(min = 1, message = "guild_id must not be empty"))]
    pub guild_id: Option<String>,
}

/// Discord ids may arrive as strings or bare numbers
fn snowflake<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) if n.is_u64() => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a string id, got {}",
            other
        ))),
    }
}

fn deserialize_args<T: DeserializeOwned>(args: Value) -> Result<T> {
    // serde would otherwise accept a sequence positionally
    if !args.is_object() {
        return Err(DiscordMcpError::Mcp(McpError::InvalidArguments(
            ValidationError::InvalidParameter {
                name: "arguments".to_string(),
                message: "arguments must be a JSON object".to_string(),
            },
        )));
    }

    serde_json::from_value(args).map_err(|e| {
        DiscordMcpError::Mcp(McpError::InvalidArguments(
            ValidationError::InvalidParameter {
                name: "arguments".to_string(),
                message: e.to_string(),
            },
        ))
    })
}

fn validate_args<T: Validate>(args: &T) -> Result<()> {
    args.validate().map_err(|e| {
        DiscordMcpError::Mcp(McpError::InvalidArguments(ValidationError::from_report(&e)))
    })
}

// ==================== Schemas ====================

fn tool_def(name: &str, description: &str, parameters: Value) -> (String, Tool) {
    (
        name.to_string(),
        Tool {
            description: description.to_string(),
            parameters,
        },
    )
}

fn send_message_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "channel_id": {
                "type": "string",
                "description": "ID of the Discord channel (falls back to the configured default channel)"
            },
            "content": {
                "type": "string",
                "description": "Message content"
            }
        },
        "required": ["content"]
    })
}

fn get_messages_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "channel_id": {
                "type": "string",
                "description": "ID of the Discord channel"
            },
            "limit": {
                "type": "integer",
                "description": "Maximum number of messages (default: 10)",
                "minimum": 1,
                "maximum": 100
            }
        },
        "required": ["channel_id"]
    })
}

fn get_channels_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "guild_id": {
                "type": "string",
                "description": "ID of the Discord server (guild)"
            }
        },
        "required": ["guild_id"]
    })
}
