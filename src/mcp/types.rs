//! MCP protocol type definitions
//!
//! Types for the JSON-RPC shaped envelope used for tool discovery and
//! invocation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::discord::types::{SimplifiedChannel, SimplifiedMessage};

/// JSON-RPC version
pub const JSONRPC_VERSION: &str = "2.0";

/// Id used when the request carried none (or could not be read)
pub const UNKNOWN_ID: &str = "unknown";

/// JSON-RPC error codes
pub mod error_codes {
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
    /// Start of the implementation-defined server error range
    pub const SERVER_ERROR: i32 = -32000;
}

/// Request ID, echoed back verbatim
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RequestId {
    String(String),
    Number(serde_json::Number),
    Other(Value),
}

impl RequestId {
    /// Sentinel id for requests that carried none
    pub fn unknown() -> Self {
        RequestId::String(UNKNOWN_ID.to_string())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::unknown()
    }
}

/// Inbound envelope
///
/// Fields are kept loose so that a wrong type routes like a missing value
/// instead of failing the whole request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Envelope {
    /// Top-level method (`initialize` or `invoke`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<Value>,

    /// Method parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,

    /// Request ID
    #[serde(default)]
    pub id: RequestId,
}

impl Envelope {
    /// Method name if present and a string
    pub fn method_name(&self) -> Option<&str> {
        self.method.as_ref().and_then(Value::as_str)
    }

    /// Method rendered for error messages
    pub fn method_label(&self) -> String {
        label(self.method.as_ref())
    }
}

/// `params` of an `invoke` request
#[derive(Debug, Clone, Default)]
pub struct ToolInvocation {
    /// Tool name, if one was given
    pub method: Option<Value>,

    /// Tool arguments, if any
    pub arguments: Option<Value>,
}

impl ToolInvocation {
    /// Read a tool invocation out of `params`; anything that is not an object
    /// yields an invocation with no tool name
    pub fn from_params(params: Option<&Value>) -> Self {
        match params.and_then(Value::as_object) {
            Some(obj) => Self {
                method: obj.get("method").cloned(),
                arguments: obj.get("arguments").cloned(),
            },
            None => Self::default(),
        }
    }

    /// Tool name if present and a string
    pub fn tool_name(&self) -> Option<&str> {
        self.method.as_ref().and_then(Value::as_str)
    }

    /// Tool name rendered for error messages
    pub fn tool_label(&self) -> String {
        label(self.method.as_ref())
    }

    /// Arguments as a map; absent or null arguments become an empty map
    pub fn arguments_or_empty(&self) -> Value {
        match &self.arguments {
            None | Some(Value::Null) => Value::Object(Map::new()),
            Some(v) => v.clone(),
        }
    }
}

fn label(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => "<missing>".to_string(),
        Some(other) => other.to_string(),
    }
}

/// JSON-RPC response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// JSON-RPC version
    pub jsonrpc: String,

    /// Request ID
    pub id: RequestId,

    /// Result (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,

    /// Error (on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    /// Create a success response
    pub fn success(id: RequestId, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response
    pub fn error(id: RequestId, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }

    /// Response for a request that could not be processed at all
    pub fn internal(message: impl std::fmt::Display) -> Self {
        Self::error(
            RequestId::unknown(),
            JsonRpcError::internal_error(format!("Internal error: {}", message)),
        )
    }
}

/// JSON-RPC error
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonRpcError {
    /// Error code
    pub code: i32,

    /// Error message
    pub message: String,
}

impl JsonRpcError {
    /// Create an error with an explicit code
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Internal error (-32603)
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(error_codes::INTERNAL_ERROR, message)
    }
}

impl From<&crate::error::McpError> for JsonRpcError {
    fn from(err: &crate::error::McpError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

/// Server info
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerInfo {
    /// Server name
    pub name: String,

    /// Server version
    pub version: String,
}

/// Tool definition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tool {
    /// Human description
    pub description: String,

    /// Parameter schema (JSON Schema)
    pub parameters: Value,
}

/// Server capabilities: the tool catalog keyed by tool name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerCapabilities {
    pub tools: BTreeMap<String, Tool>,
}

/// Initialize result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    /// Server info
    pub server_info: ServerInfo,

    /// Server capabilities
    pub capabilities: ServerCapabilities,
}

/// Result of `send_message`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageResult {
    pub success: bool,
    pub message: String,
}

/// Result of `get_messages`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetMessagesResult {
    pub success: bool,
    pub messages: Vec<SimplifiedMessage>,
}

/// Result of `get_channels`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetChannelsResult {
    pub success: bool,
    pub channels: Vec<SimplifiedChannel>,
}

/// MCP methods
pub mod methods {
    pub const INITIALIZE: &str = "initialize";
    pub const INVOKE: &str = "invoke";
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_deserialize() {
        let json = r#"{"method":"invoke","id":7,"params":{"method":"get_messages"}}"#;
        let env: Envelope = serde_json::from_str(json).unwrap();
        assert_eq!(env.method_name(), Some("invoke"));
        assert_eq!(env.id, RequestId::Number(7.into()));
    }

    #[test]
    fn test_missing_id_defaults_to_unknown() {
        let env: Envelope = serde_json::from_str(r#"{"method":"initialize"}"#).unwrap();
        assert_eq!(env.id, RequestId::String("unknown".to_string()));
    }

    #[test]
    fn test_odd_ids_round_trip_verbatim() {
        for id in [json!("abc"), json!(3.5), json!(null), json!({"k": 1})] {
            let env: Envelope = serde_json::from_value(json!({"id": id.clone()})).unwrap();
            let resp = JsonRpcResponse::success(env.id, json!({}));
            assert_eq!(serde_json::to_value(&resp).unwrap()["id"], id);
        }
    }

    #[test]
    fn test_non_string_method_label() {
        let env: Envelope = serde_json::from_value(json!({"method": 5})).unwrap();
        assert_eq!(env.method_name(), None);
        assert_eq!(env.method_label(), "5");
        assert_eq!(Envelope::default().method_label(), "<missing>");
    }

    #[test]
    fn test_invocation_from_non_object_params() {
        let inv = ToolInvocation::from_params(Some(&json!("send_message")));
        assert!(inv.tool_name().is_none());
        assert_eq!(inv.arguments_or_empty(), json!({}));
    }

    #[test]
    fn test_response_serialize() {
        let resp = JsonRpcResponse::success(RequestId::Number(1.into()), json!({"test": true}));
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"result\""));
        assert!(!json.contains("\"error\""));
    }

    #[test]
    fn test_internal_response_uses_sentinel_id() {
        let resp = JsonRpcResponse::internal("boom");
        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(value["id"], "unknown");
        assert_eq!(value["error"]["code"], -32603);
        assert_eq!(value["error"]["message"], "Internal error: boom");
    }
}
