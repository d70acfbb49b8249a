//! ChatRepository trait definition.
//!
//! Provides the append-only persistence operations for chats and messages.
//! Uses native async fn in traits (RPITIT, Rust 2024 edition).

use parley_types::chat::{Chat, ChatSummary, Message, NewChat, NewMessage};
use parley_types::error::RepositoryError;

/// Repository trait for chat and message persistence.
///
/// Implementations live in parley-infra (e.g., `SqliteChatRepository`).
/// The model is append-only plus bulk-delete: no update operations exist.
pub trait ChatRepository: Send + Sync {
    /// Insert a new chat and return it with its generated id.
    fn create_chat(
        &self,
        chat: &NewChat,
    ) -> impl std::future::Future<Output = Result<Chat, RepositoryError>> + Send;

    /// Get a chat by id.
    fn get_chat(
        &self,
        chat_id: i64,
    ) -> impl std::future::Future<Output = Result<Option<Chat>, RepositoryError>> + Send;

    /// List all chats in creation order, with per-chat message statistics.
    fn list_chats(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<ChatSummary>, RepositoryError>> + Send;

    /// Insert a new message and return it with its generated id.
    ///
    /// Fails with `NotFound` if the referenced chat does not exist.
    fn append_message(
        &self,
        message: &NewMessage,
    ) -> impl std::future::Future<Output = Result<Message, RepositoryError>> + Send;

    /// List messages for a chat, ordered by timestamp ascending (ties by id).
    fn list_messages(
        &self,
        chat_id: i64,
    ) -> impl std::future::Future<Output = Result<Vec<Message>, RepositoryError>> + Send;

    /// Count messages in a chat.
    fn count_messages(
        &self,
        chat_id: i64,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;

    /// Delete all messages and chats, returning the number of chats removed.
    ///
    /// Idempotent: clearing an empty store succeeds and returns 0.
    fn clear_all(
        &self,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;
}
