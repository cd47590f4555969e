//! HTTP transport
//!
//! Axum router exposing the REST endpoints, the MCP endpoint and the
//! OpenAPI document.

pub mod openapi;
pub mod rest;
pub mod router;
pub mod server;

pub use router::{build_router, AppState};
pub use server::HttpServer;
