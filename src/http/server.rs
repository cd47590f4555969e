//! HTTP server that binds the axum Router to a TCP socket.

use tokio::net::TcpListener;

use crate::config::Config;
use crate::error::Result;
use crate::http::router::{build_router, AppState};

/// Axum-based HTTP server for the REST and MCP surfaces.
pub struct HttpServer {
    host: String,
    port: u16,
    state: AppState,
}

impl HttpServer {
    /// Creates a new HTTP server bound to the configured host and port.
    pub fn new(state: AppState, config: &Config) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            state,
        }
    }

    /// Starts the server and runs until it exits.
    pub async fn run(self) -> Result<()> {
        let listener = TcpListener::bind((self.host.as_str(), self.port)).await?;
        tracing::info!(addr = %listener.local_addr()?, "Discord MCP HTTP server ready");

        axum::serve(listener, build_router(self.state)).await?;
        Ok(())
    }
}
