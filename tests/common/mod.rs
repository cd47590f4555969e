//! Shared test helpers: a recording in-memory backend.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use discord_mcp_server_rust::config::Config;
use discord_mcp_server_rust::discord::client::{MessagingBackend, UpstreamResult};
use discord_mcp_server_rust::discord::types::{DiscordChannel, DiscordMessage};
use discord_mcp_server_rust::error::DiscordApiError;

/// One recorded upstream call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Send { channel_id: String, content: String },
    Messages { channel_id: String, limit: u32 },
    Channels { guild_id: String },
}

/// Backend that answers from canned payloads and records every call
#[derive(Default)]
pub struct MockBackend {
    calls: Mutex<Vec<Call>>,
    messages: Vec<DiscordMessage>,
    channels: Vec<DiscordChannel>,
    failure: Option<DiscordApiError>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve these raw upstream messages
    pub fn with_messages(mut self, raw: Value) -> Self {
        self.messages = serde_json::from_value(raw).expect("messages");
        self
    }

    /// Serve these raw upstream channels
    pub fn with_channels(mut self, raw: Value) -> Self {
        self.channels = serde_json::from_value(raw).expect("channels");
        self
    }

    /// Fail every call with a transport-style error carrying `message`
    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(DiscordApiError::RequestFailed {
            message: message.to_string(),
        });
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("lock").clone()
    }

    fn record(&self, call: Call) -> UpstreamResult<()> {
        self.calls.lock().expect("lock").push(call);
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl MessagingBackend for MockBackend {
    async fn send_message(&self, channel_id: &str, content: &str) -> UpstreamResult<DiscordMessage> {
        self.record(Call::Send {
            channel_id: channel_id.to_string(),
            content: content.to_string(),
        })?;
        Ok(DiscordMessage {
            id: Some("999".to_string()),
            content: Some(content.to_string()),
            ..Default::default()
        })
    }

    async fn get_channel_messages(
        &self,
        channel_id: &str,
        limit: u32,
    ) -> UpstreamResult<Vec<DiscordMessage>> {
        self.record(Call::Messages {
            channel_id: channel_id.to_string(),
            limit,
        })?;
        Ok(self.messages.clone())
    }

    async fn get_guild_channels(&self, guild_id: &str) -> UpstreamResult<Vec<DiscordChannel>> {
        self.record(Call::Channels {
            guild_id: guild_id.to_string(),
        })?;
        Ok(self.channels.clone())
    }
}

pub fn config() -> Config {
    Config::default()
}

pub fn config_with_default_channel(channel: &str) -> Config {
    Config::default().with_default_channel(channel)
}

pub fn shared(backend: MockBackend) -> Arc<MockBackend> {
    Arc::new(backend)
}
