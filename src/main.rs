//! Discord MCP Server - Rust Implementation
//!
//! Exposes Discord messaging through a REST API and a JSON-RPC shaped MCP
//! endpoint.

use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};

use discord_mcp_server_rust::config::{env, Config};
use discord_mcp_server_rust::discord::client::{DiscordClient, MessagingBackend};
use discord_mcp_server_rust::error::Result;
use discord_mcp_server_rust::http::{AppState, HttpServer};
use discord_mcp_server_rust::mcp::server::McpServer;

/// Discord MCP Server
#[derive(Parser)]
#[command(name = "discord-mcp-server")]
#[command(author, version, about = "Discord MCP Server - REST and MCP access to Discord messaging")]
struct Cli {
    /// Address to bind the HTTP server to (overrides HOST)
    #[arg(long, global = true)]
    host: Option<String>,

    /// Port to listen on (overrides PORT)
    #[arg(long, global = true)]
    port: Option<u16>,

    /// Timeout for Discord API requests in seconds
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Clone, Copy)]
enum Commands {
    /// Serve the REST and MCP endpoints over HTTP (default)
    Serve,
    /// Serve MCP envelopes over stdin/stdout, one per line
    Stdio,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::from_env()?;
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(secs) = cli.timeout_secs {
        config.request_timeout = Duration::from_secs(secs);
    }
    config.validate()?;

    if !config.has_token() {
        // Keep serving; every Discord call reports the missing token instead
        tracing::error!("{} not found in environment, Discord calls will fail", env::TOKEN);
    }
    match config.default_channel_id.as_deref() {
        Some(channel) => tracing::info!("Default channel for send_message: {}", channel),
        None => tracing::info!("No default channel configured"),
    }

    let backend: Arc<dyn MessagingBackend> = Arc::new(DiscordClient::new(&config)?);

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            let state = AppState::new(backend, &config);
            HttpServer::new(state, &config).run().await?;
        }
        Commands::Stdio => {
            let server = McpServer::new(backend, &config);
            server.run_stdio().await?;
        }
    }

    Ok(())
}
