//! Error types for the Discord MCP Server
//!
//! This module defines the error hierarchy for all operations in the server.

use thiserror::Error;

use crate::mcp::types::error_codes;

/// Main error type for the Discord MCP Server
#[derive(Error, Debug)]
pub enum DiscordMcpError {
    /// Discord API errors
    #[error("Discord API error: {0}")]
    Discord(#[from] DiscordApiError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// MCP protocol errors
    #[error("MCP protocol error: {0}")]
    Mcp(#[from] McpError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP client errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Discord API errors
///
/// These are the values an upstream call resolves to on failure. The
/// `Display` output is what callers see as the error string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiscordApiError {
    #[error("Discord bot token is not configured")]
    MissingToken,

    #[error("{message}")]
    RequestFailed { message: String },

    #[error("Discord API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response from Discord: {message}")]
    InvalidResponse { message: String },
}

impl DiscordApiError {
    /// Build a transport-level failure from a reqwest error
    pub fn request(err: &reqwest::Error) -> Self {
        DiscordApiError::RequestFailed {
            message: err.to_string(),
        }
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value}")]
    InvalidEnvVar { var: String, value: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

/// Validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid parameter: {name} - {message}")]
    InvalidParameter { name: String, message: String },
}

impl ValidationError {
    /// Collapse `validator` output into a single error, reporting the first
    /// offending field
    pub fn from_report(errors: &validator::ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by_key(|(name, _)| *name);

        match fields.first() {
            Some((name, errs)) => {
                let code = errs.first().map(|e| e.code.as_ref()).unwrap_or("invalid");
                match code {
                    "required" => ValidationError::MissingField {
                        field: name.to_string(),
                    },
                    _ => ValidationError::InvalidParameter {
                        name: name.to_string(),
                        message: errs
                            .first()
                            .and_then(|e| e.message.as_ref())
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| code.to_string()),
                    },
                }
            }
            None => ValidationError::InvalidParameter {
                name: "arguments".to_string(),
                message: errors.to_string(),
            },
        }
    }
}

/// MCP protocol errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum McpError {
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("MCP method not found: {method}")]
    UnknownMethod { method: String },

    #[error("Method not found: {name}")]
    UnknownTool { name: String },

    #[error("No channel_id provided and no default channel configured")]
    ChannelUnresolved,

    #[error("Invalid arguments: {0}")]
    InvalidArguments(#[from] ValidationError),

    #[error("{0}")]
    Upstream(#[from] DiscordApiError),
}

impl McpError {
    /// JSON-RPC error code for this failure
    pub fn code(&self) -> i32 {
        match self {
            McpError::UnknownMethod { .. } | McpError::UnknownTool { .. } => {
                error_codes::METHOD_NOT_FOUND
            }
            McpError::InvalidRequest { .. } => error_codes::INVALID_REQUEST,
            McpError::InvalidArguments(_) => error_codes::INVALID_PARAMS,
            McpError::ChannelUnresolved | McpError::Upstream(_) => error_codes::SERVER_ERROR,
        }
    }
}

/// Result type alias for Discord MCP operations
pub type Result<T> = std::result::Result<T, DiscordMcpError>;
