//! Discord API type definitions
//!
//! The upstream types mirror the Discord REST responses. Every field is
//! optional so that a sparse payload still decodes; fields this server does
//! not care about are ignored on deserialization. The simplified types are the
//! stable shapes handed back to callers.

use serde::{Deserialize, Serialize};

/// A Discord user, as embedded in a message's `author`
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DiscordUser {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub username: Option<String>,

    /// Absent for regular users
    #[serde(default)]
    pub bot: Option<bool>,
}

/// A Discord message
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DiscordMessage {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub content: Option<String>,

    #[serde(default)]
    pub author: Option<DiscordUser>,

    /// ISO8601 timestamp
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// A guild channel
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DiscordChannel {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    /// Channel type (0 = text, 2 = voice, 4 = category, ...)
    #[serde(default, rename = "type")]
    pub channel_type: Option<i64>,

    #[serde(default)]
    pub parent_id: Option<String>,
}

/// Body of a create-message request
#[derive(Debug, Clone, Serialize)]
pub struct CreateMessageRequest<'a> {
    pub content: &'a str,
}

/// Author as returned to callers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SimplifiedAuthor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub username: Option<String>,

    pub bot: bool,
}

/// Message as returned to callers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SimplifiedMessage {
    pub id: Option<String>,

    pub content: Option<String>,

    pub author: SimplifiedAuthor,

    pub timestamp: Option<String>,
}

/// Channel as returned to callers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SimplifiedChannel {
    pub id: Option<String>,

    pub name: Option<String>,

    #[serde(rename = "type")]
    pub channel_type: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_ignores_unknown_fields() {
        let raw = json!({
            "id": "1",
            "content": "hello",
            "author": {"id": "9", "username": "ana", "discriminator": "0"},
            "timestamp": "2024-01-01T00:00:00+00:00",
            "embeds": [],
            "pinned": false,
            "tts": false
        });
        let msg: DiscordMessage = serde_json::from_value(raw).unwrap();
        assert_eq!(msg.id.as_deref(), Some("1"));
        assert_eq!(msg.author.unwrap().username.as_deref(), Some("ana"));
    }

    #[test]
    fn test_unread_fields_do_not_affect_decoding() {
        let raw = json!({
            "id": "1",
            "channel_id": 123,
            "content": "hi",
            "edited_timestamp": 5,
            "pinned": "yes",
            "author": {"username": "ana", "global_name": 7}
        });
        let msg: DiscordMessage = serde_json::from_value(raw).unwrap();
        assert_eq!(msg.content.as_deref(), Some("hi"));

        let raw = json!({"id": "5", "name": "general", "type": 0, "guild_id": 1, "position": "top"});
        let channel: DiscordChannel = serde_json::from_value(raw).unwrap();
        assert_eq!(channel.name.as_deref(), Some("general"));
    }

    #[test]
    fn test_channel_type_field_rename() {
        let raw = json!({"id": "5", "name": "general", "type": 0, "parent_id": null});
        let channel: DiscordChannel = serde_json::from_value(raw).unwrap();
        assert_eq!(channel.channel_type, Some(0));
        assert!(channel.parent_id.is_none());
    }

    #[test]
    fn test_simplified_channel_omits_missing_parent() {
        let channel = SimplifiedChannel {
            id: Some("5".to_string()),
            name: Some("general".to_string()),
            channel_type: Some(0),
            parent_id: None,
        };
        let value = serde_json::to_value(&channel).unwrap();
        assert_eq!(value, json!({"id": "5", "name": "general", "type": 0}));
    }
}
