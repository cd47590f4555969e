//! MCP Server implementation
//!
//! Turns one inbound envelope into one JSON-RPC shaped response. The server
//! holds no per-request state; the HTTP router and the stdio loop share it.

use std::sync::Arc;

use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::config::Config;
use crate::discord::client::MessagingBackend;
use crate::error::{DiscordMcpError, McpError, Result};
use crate::mcp::tools::{tool_catalog, ToolHandler};
use crate::mcp::types::*;

/// MCP Server info
pub const SERVER_NAME: &str = "Discord MCP API";
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// MCP Server for Discord
pub struct McpServer {
    /// Tool handler
    tool_handler: ToolHandler,
}

impl McpServer {
    /// Create a new MCP server
    pub fn new(backend: Arc<dyn MessagingBackend>, config: &Config) -> Self {
        Self {
            tool_handler: ToolHandler::new(backend, config.default_channel_id.clone()),
        }
    }

    /// Run the server on stdio, one envelope per line
    pub async fn run_stdio(&self) -> Result<()> {
        self.run_io(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }

    /// Serve newline-delimited envelopes from `reader`, writing one response
    /// line per request to `writer`. Blank lines are skipped.
    pub async fn run_io<R, W>(&self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            let response = match self.handle_message(&line).await {
                Ok(response) => response,
                Err(e) => {
                    tracing::error!("Error handling message: {}", e);
                    JsonRpcResponse::internal(e)
                }
            };

            let mut out = serde_json::to_string(&response)?;
            out.push('\n');
            writer.write_all(out.as_bytes()).await?;
            writer.flush().await?;
        }

        Ok(())
    }

    /// Handle a raw request body
    ///
    /// `Err` means the request could not be processed at all; the caller
    /// answers with an internal error.
    pub async fn handle_message(&self, message: &str) -> Result<JsonRpcResponse> {
        let value: Value = serde_json::from_str(message)?;
        if !value.is_object() {
            return Err(DiscordMcpError::Mcp(McpError::InvalidRequest {
                message: "request body must be a JSON object".to_string(),
            }));
        }

        let envelope: Envelope = serde_json::from_value(value)?;
        self.dispatch(envelope).await
    }

    /// Handle a parsed envelope
    pub async fn dispatch(&self, envelope: Envelope) -> Result<JsonRpcResponse> {
        let id = envelope.id.clone();

        match envelope.method_name() {
            Some(methods::INITIALIZE) => {
                let result = self.handle_initialize()?;
                Ok(JsonRpcResponse::success(id, result))
            }
            Some(methods::INVOKE) => {
                let invocation = ToolInvocation::from_params(envelope.params.as_ref());
                self.handle_invoke(id, &invocation).await
            }
            _ => {
                let err = McpError::UnknownMethod {
                    method: envelope.method_label(),
                };
                tracing::warn!("{}", err);
                Ok(JsonRpcResponse::error(id, JsonRpcError::from(&err)))
            }
        }
    }

    /// Handle initialize request
    fn handle_initialize(&self) -> Result<Value> {
        let result = InitializeResult {
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: SERVER_VERSION.to_string(),
            },
            capabilities: ServerCapabilities {
                tools: tool_catalog().clone(),
            },
        };

        Ok(serde_json::to_value(result)?)
    }

    /// Handle invoke request
    async fn handle_invoke(
        &self,
        id: RequestId,
        invocation: &ToolInvocation,
    ) -> Result<JsonRpcResponse> {
        tracing::info!("MCP tool call: {}", invocation.tool_label());

        match self.tool_handler.call_tool(invocation).await {
            Ok(result) => Ok(JsonRpcResponse::success(id, result)),
            Err(DiscordMcpError::Mcp(err)) => {
                tracing::warn!("Tool {} failed: {}", invocation.tool_label(), err);
                Ok(JsonRpcResponse::error(id, JsonRpcError::from(&err)))
            }
            Err(e) => Err(e),
        }
    }
}
