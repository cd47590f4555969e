//! Discord API client
//!
//! Thin client over the three Discord REST calls this server needs. Every
//! failure comes back as a [`DiscordApiError`] value; nothing panics or
//! escapes past this boundary.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::discord::types::{CreateMessageRequest, DiscordChannel, DiscordMessage};
use crate::error::{DiscordApiError, DiscordMcpError, Result};

/// Number of messages fetched when the caller gives no limit
pub const DEFAULT_MESSAGE_LIMIT: u32 = 10;

/// Outcome of one upstream call
pub type UpstreamResult<T> = std::result::Result<T, DiscordApiError>;

/// The operations the dispatcher and REST surface need from Discord
#[async_trait]
pub trait MessagingBackend: Send + Sync {
    /// Post `content` to a channel
    async fn send_message(&self, channel_id: &str, content: &str) -> UpstreamResult<DiscordMessage>;

    /// Fetch up to `limit` recent messages from a channel, newest first
    async fn get_channel_messages(
        &self,
        channel_id: &str,
        limit: u32,
    ) -> UpstreamResult<Vec<DiscordMessage>>;

    /// List the channels of a guild
    async fn get_guild_channels(&self, guild_id: &str) -> UpstreamResult<Vec<DiscordChannel>>;
}

/// Discord REST client
pub struct DiscordClient {
    /// HTTP client
    http_client: reqwest::Client,

    /// Bot token, if one was configured
    token: Option<String>,

    /// API base URL without trailing slash
    base_url: String,
}

impl DiscordClient {
    /// Create a new Discord client from configuration
    pub fn new(config: &Config) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(DiscordMcpError::Http)?;

        if let Some(token) = config.bot_token.as_deref() {
            tracing::debug!("Discord client initialized with token {}...", token_preview(token));
        }

        Ok(Self {
            http_client,
            token: config.bot_token.clone(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn channel_messages_url(&self, channel_id: &str) -> String {
        format!(
            "{}/channels/{}/messages",
            self.base_url,
            urlencoding::encode(channel_id)
        )
    }

    fn guild_channels_url(&self, guild_id: &str) -> String {
        format!(
            "{}/guilds/{}/channels",
            self.base_url,
            urlencoding::encode(guild_id)
        )
    }

    fn authorization(&self) -> UpstreamResult<String> {
        self.token
            .as_deref()
            .map(|t| format!("Bot {}", t))
            .ok_or(DiscordApiError::MissingToken)
    }

    /// Send a prepared request and decode a successful body as `T`
    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> UpstreamResult<T> {
        let response = request
            .header(reqwest::header::AUTHORIZATION, self.authorization()?)
            .send()
            .await
            .map_err(|e| DiscordApiError::request(&e))?;

        if response.status().is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| DiscordApiError::InvalidResponse {
                    message: e.to_string(),
                })
        } else {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            Err(DiscordApiError::Status {
                status: status.as_u16(),
                body: text,
            })
        }
    }
}

#[async_trait]
impl MessagingBackend for DiscordClient {
    async fn send_message(&self, channel_id: &str, content: &str) -> UpstreamResult<DiscordMessage> {
        let request = self
            .http_client
            .post(self.channel_messages_url(channel_id))
            .json(&CreateMessageRequest { content });

        match self.execute::<DiscordMessage>(request).await {
            Ok(message) => {
                tracing::info!("Message sent to channel {}", channel_id);
                Ok(message)
            }
            Err(e) => {
                tracing::warn!("Failed to send message to channel {}: {}", channel_id, e);
                Err(e)
            }
        }
    }

    async fn get_channel_messages(
        &self,
        channel_id: &str,
        limit: u32,
    ) -> UpstreamResult<Vec<DiscordMessage>> {
        let request = self
            .http_client
            .get(self.channel_messages_url(channel_id))
            .query(&[("limit", limit)]);

        match self.execute::<Vec<DiscordMessage>>(request).await {
            Ok(messages) => {
                tracing::info!(
                    "Fetched {} messages from channel {}",
                    messages.len(),
                    channel_id
                );
                Ok(messages)
            }
            Err(e) => {
                tracing::warn!("Failed to fetch messages from channel {}: {}", channel_id, e);
                Err(e)
            }
        }
    }

    async fn get_guild_channels(&self, guild_id: &str) -> UpstreamResult<Vec<DiscordChannel>> {
        let request = self.http_client.get(self.guild_channels_url(guild_id));

        match self.execute::<Vec<DiscordChannel>>(request).await {
            Ok(channels) => {
                tracing::info!("Fetched {} channels from guild {}", channels.len(), guild_id);
                Ok(channels)
            }
            Err(e) => {
                tracing::warn!("Failed to fetch channels from guild {}: {}", guild_id, e);
                Err(e)
            }
        }
    }
}

/// First few characters of a token, safe to log
fn token_preview(token: &str) -> &str {
    let end = token
        .char_indices()
        .nth(5)
        .map(|(i, _)| i)
        .unwrap_or(token.len());
    &token[..end]
}
