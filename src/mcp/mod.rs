//! MCP (Model Context Protocol) module
//!
//! Implements the `initialize` / `invoke` envelope protocol for tool
//! invocation.

pub mod server;
pub mod tools;
pub mod types;
