//! Discord API module
//!
//! Contains the upstream types, the REST client and the simplification
//! helpers shared by the MCP and REST surfaces.

pub mod client;
pub mod simplify;
pub mod types;
