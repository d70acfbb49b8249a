//! SQLite chat repository implementation.
//!
//! Implements `ChatRepository` from `parley-core` using sqlx with split
//! read/write pools: raw queries, private Row structs, RFC 3339 timestamps.

use chrono::{DateTime, Utc};
use sqlx::Row;

use parley_core::chat::repository::ChatRepository;
use parley_types::chat::{Chat, ChatSummary, Message, NewChat, NewMessage};
use parley_types::error::RepositoryError;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `ChatRepository`.
pub struct SqliteChatRepository {
    pool: DatabasePool,
}

impl SqliteChatRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Private Row types for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

/// Internal row type for mapping SQLite rows to domain Chat.
struct ChatRow {
    id: i64,
    title: String,
    created_at: String,
}

impl ChatRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_chat(self) -> Result<Chat, RepositoryError> {
        Ok(Chat {
            id: self.id,
            title: self.title,
            created_at: parse_datetime(&self.created_at)?,
        })
    }
}

/// Internal row type for the chat listing with per-chat message stats.
struct ChatSummaryRow {
    id: i64,
    title: String,
    created_at: String,
    message_count: i64,
    last_message_at: Option<String>,
}

impl ChatSummaryRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            created_at: row.try_get("created_at")?,
            message_count: row.try_get("message_count")?,
            last_message_at: row.try_get("last_message_at")?,
        })
    }

    fn into_summary(self) -> Result<ChatSummary, RepositoryError> {
        let last_message_at = self
            .last_message_at
            .as_deref()
            .map(parse_datetime)
            .transpose()?;

        Ok(ChatSummary {
            id: self.id,
            title: self.title,
            created_at: parse_datetime(&self.created_at)?,
            message_count: self.message_count as u32,
            last_message_at,
        })
    }
}

/// Internal row type for mapping SQLite rows to domain Message.
struct MessageRow {
    id: i64,
    chat_id: i64,
    content: String,
    is_bot: i64,
    timestamp: String,
}

impl MessageRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            chat_id: row.try_get("chat_id")?,
            content: row.try_get("content")?,
            is_bot: row.try_get("is_bot")?,
            timestamp: row.try_get("timestamp")?,
        })
    }

    fn into_message(self) -> Result<Message, RepositoryError> {
        Ok(Message {
            id: self.id,
            chat_id: self.chat_id,
            content: self.content,
            is_bot: self.is_bot != 0,
            timestamp: parse_datetime(&self.timestamp)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

/// Map a sqlx error to RepositoryError, turning foreign key violations
/// (a message referencing a missing chat) into NotFound.
fn map_insert_error(e: sqlx::Error) -> RepositoryError {
    match &e {
        sqlx::Error::Database(db) if db.message().contains("FOREIGN KEY") => {
            RepositoryError::NotFound
        }
        _ => RepositoryError::Query(e.to_string()),
    }
}

// ---------------------------------------------------------------------------
// ChatRepository implementation
// ---------------------------------------------------------------------------

impl ChatRepository for SqliteChatRepository {
    async fn create_chat(&self, chat: &NewChat) -> Result<Chat, RepositoryError> {
        let result = sqlx::query("INSERT INTO chats (title, created_at) VALUES (?, ?)")
            .bind(&chat.title)
            .bind(format_datetime(&chat.created_at))
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(Chat {
            id: result.last_insert_rowid(),
            title: chat.title.clone(),
            created_at: chat.created_at,
        })
    }

    async fn get_chat(&self, chat_id: i64) -> Result<Option<Chat>, RepositoryError> {
        let row = sqlx::query("SELECT id, title, created_at FROM chats WHERE id = ?")
            .bind(chat_id)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let chat_row =
                    ChatRow::from_row(&row).map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(chat_row.into_chat()?))
            }
            None => Ok(None),
        }
    }

    async fn list_chats(&self) -> Result<Vec<ChatSummary>, RepositoryError> {
        let rows = sqlx::query(
            r#"SELECT c.id, c.title, c.created_at,
                      (SELECT COUNT(*) FROM messages m WHERE m.chat_id = c.id) AS message_count,
                      (SELECT MAX(m.timestamp) FROM messages m WHERE m.chat_id = c.id) AS last_message_at
               FROM chats c
               ORDER BY c.created_at ASC, c.id ASC"#,
        )
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut summaries = Vec::with_capacity(rows.len());
        for row in &rows {
            let summary_row = ChatSummaryRow::from_row(row)
                .map_err(|e| RepositoryError::Query(e.to_string()))?;
            summaries.push(summary_row.into_summary()?);
        }

        Ok(summaries)
    }

    async fn append_message(&self, message: &NewMessage) -> Result<Message, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO messages (chat_id, content, is_bot, timestamp) VALUES (?, ?, ?, ?)",
        )
        .bind(message.chat_id)
        .bind(&message.content)
        .bind(message.is_bot as i64)
        .bind(format_datetime(&message.timestamp))
        .execute(&self.pool.writer)
        .await
        .map_err(map_insert_error)?;

        Ok(Message {
            id: result.last_insert_rowid(),
            chat_id: message.chat_id,
            content: message.content.clone(),
            is_bot: message.is_bot,
            timestamp: message.timestamp,
        })
    }

    async fn list_messages(&self, chat_id: i64) -> Result<Vec<Message>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, chat_id, content, is_bot, timestamp FROM messages \
             WHERE chat_id = ? ORDER BY timestamp ASC, id ASC",
        )
        .bind(chat_id)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut messages = Vec::with_capacity(rows.len());
        for row in &rows {
            let msg_row =
                MessageRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            messages.push(msg_row.into_message()?);
        }

        Ok(messages)
    }

    async fn count_messages(&self, chat_id: i64) -> Result<u64, RepositoryError> {
        let row = sqlx::query("SELECT COUNT(*) as cnt FROM messages WHERE chat_id = ?")
            .bind(chat_id)
            .fetch_one(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let count: i64 = row
            .try_get("cnt")
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(count as u64)
    }

    async fn clear_all(&self) -> Result<u64, RepositoryError> {
        let mut tx = self
            .pool
            .writer
            .begin()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        // Messages first to maintain referential integrity.
        sqlx::query("DELETE FROM messages")
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let result = sqlx::query("DELETE FROM chats")
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::pool::DatabasePool;

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        // Leak tempdir so it lives for the test
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    fn make_chat(title: &str) -> NewChat {
        NewChat {
            title: title.to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_chat() {
        let repo = SqliteChatRepository::new(test_pool().await);

        let created = repo.create_chat(&make_chat("First chat")).await.unwrap();
        assert!(created.id > 0);

        let found = repo.get_chat(created.id).await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.title, "First chat");
    }

    #[tokio::test]
    async fn test_get_missing_chat_returns_none() {
        let repo = SqliteChatRepository::new(test_pool().await);
        assert!(repo.get_chat(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_chats_in_creation_order_with_stats() {
        let repo = SqliteChatRepository::new(test_pool().await);

        let first = repo.create_chat(&make_chat("First")).await.unwrap();
        let second = repo.create_chat(&make_chat("Second")).await.unwrap();

        repo.append_message(&NewMessage::user(second.id, "Hello"))
            .await
            .unwrap();

        let chats = repo.list_chats().await.unwrap();
        assert_eq!(chats.len(), 2);
        assert_eq!(chats[0].id, first.id);
        assert_eq!(chats[1].id, second.id);

        assert_eq!(chats[0].message_count, 0);
        assert!(chats[0].last_message_at.is_none());
        assert_eq!(chats[1].message_count, 1);
        assert!(chats[1].last_message_at.is_some());
    }

    #[tokio::test]
    async fn test_append_message_to_missing_chat_is_not_found() {
        let repo = SqliteChatRepository::new(test_pool().await);

        let err = repo
            .append_message(&NewMessage::user(12345, "Hello"))
            .await
            .unwrap_err();

        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_messages_listed_in_insertion_order() {
        let repo = SqliteChatRepository::new(test_pool().await);
        let chat = repo.create_chat(&make_chat("Ordering")).await.unwrap();

        let m1 = repo
            .append_message(&NewMessage::user(chat.id, "one"))
            .await
            .unwrap();
        let m2 = repo
            .append_message(&NewMessage::bot(chat.id, "two"))
            .await
            .unwrap();
        let m3 = repo
            .append_message(&NewMessage::user(chat.id, "three"))
            .await
            .unwrap();

        let messages = repo.list_messages(chat.id).await.unwrap();
        assert_eq!(
            messages.iter().map(|m| m.id).collect::<Vec<_>>(),
            vec![m1.id, m2.id, m3.id]
        );
        assert!(messages.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
        assert!(!messages[0].is_bot);
        assert!(messages[1].is_bot);

        assert_eq!(repo.count_messages(chat.id).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_clear_all_removes_everything_and_is_idempotent() {
        let repo = SqliteChatRepository::new(test_pool().await);

        let chat = repo.create_chat(&make_chat("Doomed")).await.unwrap();
        repo.append_message(&NewMessage::user(chat.id, "Hello"))
            .await
            .unwrap();
        repo.create_chat(&make_chat("Also doomed")).await.unwrap();

        let removed = repo.clear_all().await.unwrap();
        assert_eq!(removed, 2);
        assert!(repo.list_chats().await.unwrap().is_empty());
        assert_eq!(repo.count_messages(chat.id).await.unwrap(), 0);

        // Clearing an empty store succeeds and removes nothing.
        assert_eq!(repo.clear_all().await.unwrap(), 0);
    }
}
