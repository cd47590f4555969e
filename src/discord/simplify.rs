//! Projection of upstream Discord payloads onto the simplified shapes
//!
//! Both the MCP tools and the REST endpoints go through these functions.

use crate::discord::types::{
    DiscordChannel, DiscordMessage, SimplifiedAuthor, SimplifiedChannel, SimplifiedMessage,
};

/// Reduce a message to id, content, author and timestamp
pub fn simplify_message(message: &DiscordMessage) -> SimplifiedMessage {
    let author = message.author.as_ref();

    SimplifiedMessage {
        id: message.id.clone(),
        content: message.content.clone(),
        author: SimplifiedAuthor {
            id: author.and_then(|a| a.id.clone()),
            username: author.and_then(|a| a.username.clone()),
            bot: author.and_then(|a| a.bot).unwrap_or(false),
        },
        timestamp: message.timestamp.clone(),
    }
}

/// Reduce a channel to id, name, type and parent
pub fn simplify_channel(channel: &DiscordChannel) -> SimplifiedChannel {
    SimplifiedChannel {
        id: channel.id.clone(),
        name: channel.name.clone(),
        channel_type: channel.channel_type,
        parent_id: channel.parent_id.clone(),
    }
}

/// Simplify a list of messages, keeping upstream order
pub fn simplify_messages(messages: &[DiscordMessage]) -> Vec<SimplifiedMessage> {
    messages.iter().map(simplify_message).collect()
}

/// Simplify a list of channels, keeping upstream order
pub fn simplify_channels(channels: &[DiscordChannel]) -> Vec<SimplifiedChannel> {
    channels.iter().map(simplify_channel).collect()
}
