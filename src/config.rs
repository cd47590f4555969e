//! Configuration management for the Discord MCP Server
//!
//! Handles environment variables and configuration loading. The resulting
//! [`Config`] is resolved once at startup and handed to the client and
//! dispatcher; request handling never reads the environment.

use std::time::Duration;

use crate::error::{ConfigError, DiscordMcpError, Result};

/// Default bind address
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default listen port
pub const DEFAULT_PORT: u16 = 8000;

/// Default timeout for outbound Discord requests, in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Configuration for the Discord MCP Server
#[derive(Debug, Clone)]
pub struct Config {
    /// Discord bot token (sent as `Authorization: Bot <token>`)
    pub bot_token: Option<String>,

    /// Fallback channel for `send_message` when the caller names none
    pub default_channel_id: Option<String>,

    /// Base URL of the Discord REST API
    pub api_base_url: String,

    /// Timeout applied to each outbound Discord request
    pub request_timeout: Duration,

    /// HTTP bind host
    pub host: String,

    /// HTTP bind port
    pub port: u16,
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// Empty values are treated the same as unset ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let request_timeout = match get(env::REQUEST_TIMEOUT_SECS) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(DiscordMcpError::Config(ConfigError::InvalidEnvVar {
                        var: env::REQUEST_TIMEOUT_SECS.to_string(),
                        value: raw,
                    }))
                }
            },
            None => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        };

        let port = match get(env::PORT) {
            Some(raw) => raw.parse::<u16>().map_err(|_| {
                DiscordMcpError::Config(ConfigError::InvalidEnvVar {
                    var: env::PORT.to_string(),
                    value: raw.clone(),
                })
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            bot_token: get(env::TOKEN),
            default_channel_id: get(env::DEFAULT_CHANNEL_ID),
            api_base_url: get(env::API_BASE_URL)
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| discord::API_BASE_URL.to_string()),
            request_timeout,
            host: get(env::HOST).unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
        })
    }

    /// Set the fallback channel for `send_message`
    pub fn with_default_channel(mut self, channel_id: impl Into<String>) -> Self {
        self.default_channel_id = Some(channel_id.into());
        self
    }

    /// Set the bot token
    pub fn with_bot_token(mut self, token: impl Into<String>) -> Self {
        self.bot_token = Some(token.into());
        self
    }

    /// Point the client at a different API base URL
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Check that the configuration is usable
    pub fn validate(&self) -> Result<()> {
        if self.request_timeout.is_zero() {
            return Err(DiscordMcpError::Config(ConfigError::InvalidConfig {
                message: "request timeout must be greater than zero".to_string(),
            }));
        }
        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://")
        {
            return Err(DiscordMcpError::Config(ConfigError::InvalidConfig {
                message: format!("API base URL must be http(s): {}", self.api_base_url),
            }));
        }
        Ok(())
    }

    /// Whether a bot token is available
    pub fn has_token(&self) -> bool {
        self.bot_token.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot_token: None,
            default_channel_id: None,
            api_base_url: discord::API_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// Environment variable names
pub mod env {
    pub const TOKEN: &str = "DISCORD_TOKEN";
    pub const DEFAULT_CHANNEL_ID: &str = "DISCORD_DEFAULT_CHANNEL_ID";
    pub const API_BASE_URL: &str = "DISCORD_API_BASE_URL";
    pub const REQUEST_TIMEOUT_SECS: &str = "DISCORD_REQUEST_TIMEOUT_SECS";
    pub const HOST: &str = "HOST";
    pub const PORT: &str = "PORT";
}

/// Discord API constants
pub mod discord {
    /// Base URL for Discord REST API
    pub const API_BASE_URL: &str = "https://discord.com/api/v10";
}
