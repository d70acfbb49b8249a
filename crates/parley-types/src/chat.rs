//! Chat and message entity types.
//!
//! Chats are append-only containers of messages. Neither entity is ever
//! updated after insertion; the only delete is the bulk clear.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A chat session: a named container for an ordered sequence of messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

/// Insert form of [`Chat`]. The id is assigned by the database.
#[derive(Debug, Clone)]
pub struct NewChat {
    pub title: String,
    pub created_at: DateTime<Utc>,
}

/// A chat row as returned by the listing endpoint, enriched with
/// per-chat message statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSummary {
    pub id: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub message_count: u32,
    pub last_message_at: Option<DateTime<Utc>>,
}

/// One turn in a chat, authored by either the user or the bot.
///
/// Messages are ordered by `timestamp` within a chat, ties broken by id,
/// which matches insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub chat_id: i64,
    pub content: String,
    pub is_bot: bool,
    pub timestamp: DateTime<Utc>,
}

/// Insert form of [`Message`]. The id is assigned by the database.
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub chat_id: i64,
    pub content: String,
    pub is_bot: bool,
    pub timestamp: DateTime<Utc>,
}

impl NewMessage {
    /// A user-authored message stamped with the current time.
    pub fn user(chat_id: i64, content: impl Into<String>) -> Self {
        Self {
            chat_id,
            content: content.into(),
            is_bot: false,
            timestamp: Utc::now(),
        }
    }

    /// A bot-authored message stamped with the current time.
    pub fn bot(chat_id: i64, content: impl Into<String>) -> Self {
        Self {
            chat_id,
            content: content.into(),
            is_bot: true,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_serialize() {
        let chat = Chat {
            id: 1,
            title: "New Chat".to_string(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&chat).unwrap();
        assert!(json.contains("\"id\":1"));
        assert!(json.contains("\"title\":\"New Chat\""));
        assert!(json.contains("created_at"));
    }

    #[test]
    fn test_message_serialize_is_bot() {
        let msg = Message {
            id: 7,
            chat_id: 1,
            content: "Hello".to_string(),
            is_bot: false,
            timestamp: Utc::now(),
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"is_bot\":false"));
        let parsed: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, msg);
    }

    #[test]
    fn test_chat_summary_without_messages() {
        let summary = ChatSummary {
            id: 3,
            title: "Empty".to_string(),
            created_at: Utc::now(),
            message_count: 0,
            last_message_at: None,
        };
        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"last_message_at\":null"));
    }

    #[test]
    fn test_new_message_constructors() {
        let user = NewMessage::user(1, "hi");
        assert!(!user.is_bot);
        assert_eq!(user.chat_id, 1);

        let bot = NewMessage::bot(1, "hello");
        assert!(bot.is_bot);
        assert_eq!(bot.content, "hello");
    }
}
