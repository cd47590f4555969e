//! Discord MCP Server Library
//!
//! Exposes Discord messaging (send message, read recent messages, list guild
//! channels) through a REST API and a JSON-RPC shaped MCP endpoint.

pub mod config;
pub mod discord;
pub mod error;
pub mod http;
pub mod mcp;

pub use config::Config;
pub use error::{DiscordMcpError, Result};
