//! OpenAPI document for the HTTP surface.
//!
//! Request and response schemas are generated from the REST types with
//! `schemars`; the paths are listed by hand.

use std::sync::OnceLock;

use axum::Json;
use schemars::gen::SchemaSettings;
use serde_json::{json, Value};

use crate::http::rest::{GenericResponse, GetChannelsRequest, GetMessagesRequest, SendMessageRequest};
use crate::mcp::server::{SERVER_NAME, SERVER_VERSION};

/// `GET /openapi.json`
pub async fn openapi_spec() -> Json<Value> {
    Json(openapi_document().clone())
}

/// The OpenAPI 3.0 document, built once
pub fn openapi_document() -> &'static Value {
    static DOCUMENT: OnceLock<Value> = OnceLock::new();
    DOCUMENT.get_or_init(build_document)
}

fn build_document() -> Value {
    let mut gen = SchemaSettings::openapi3().into_generator();
    let send_message = gen.subschema_for::<SendMessageRequest>();
    let get_messages = gen.subschema_for::<GetMessagesRequest>();
    let get_channels = gen.subschema_for::<GetChannelsRequest>();
    let generic = gen.subschema_for::<GenericResponse>();
    let schemas = gen.definitions().clone();

    json!({
        "openapi": "3.0.3",
        "info": {
            "title": SERVER_NAME,
            "version": SERVER_VERSION,
            "description": "Discord integration API for MCP (Model Context Protocol) clients"
        },
        "paths": {
            "/": {
                "get": {
                    "tags": ["Info"],
                    "summary": "Basic service information",
                    "responses": {"200": {"description": "Service name, version and description"}}
                }
            },
            "/send-message": rest_operation("Sends a message to a Discord channel", &send_message, &generic),
            "/get-messages": rest_operation("Retrieves recent messages from a Discord channel", &get_messages, &generic),
            "/get-channels": rest_operation("Lists the channels of a Discord server", &get_channels, &generic),
            "/mcp": {
                "post": {
                    "tags": ["MCP"],
                    "summary": "Handles MCP (initialize / invoke) envelopes",
                    "requestBody": {
                        "required": true,
                        "content": {"application/json": {"schema": {"type": "object"}}}
                    },
                    "responses": {
                        "200": {"description": "JSON-RPC result or error"},
                        "500": {"description": "JSON-RPC internal error"}
                    }
                }
            }
        },
        "components": {"schemas": schemas}
    })
}

fn rest_operation(
    summary: &str,
    request: &schemars::schema::Schema,
    response: &schemars::schema::Schema,
) -> Value {
    json!({
        "post": {
            "tags": ["Discord"],
            "summary": summary,
            "requestBody": {
                "required": true,
                "content": {"application/json": {"schema": request}}
            },
            "responses": {
                "200": {
                    "description": "Operation result",
                    "content": {"application/json": {"schema": response}}
                },
                "422": {"description": "Invalid request body"}
            }
        }
    })
}
