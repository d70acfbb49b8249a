//! Chat service orchestrating persistence and the AI call-out.
//!
//! ChatService coordinates between the ChatRepository and the LlmProvider
//! to run the full conversation lifecycle: creating chats (seeded with a
//! greeting), listing history, relaying a user message to the provider,
//! and persisting the reply.

use chrono::Utc;
use tracing::{info, warn};

use parley_types::chat::{Chat, ChatSummary, Message, NewChat, NewMessage};
use parley_types::error::ChatError;
use parley_types::llm::{ChatTurn, CompletionRequest, MessageRole};

use crate::chat::format::normalize_reply;
use crate::chat::repository::ChatRepository;
use crate::llm::provider::LlmProvider;

/// Title assigned when a chat is created without one.
pub const DEFAULT_CHAT_TITLE: &str = "New Chat";

/// Bot message seeded into every freshly created chat.
pub const GREETING: &str = "Hello! I'm your AI assistant. How can I help you today?";

/// System prompt sent with every completion unless overridden.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant. Answer clearly and \
     concisely, and recommend consulting a professional for serious concerns.";

/// Completion parameters applied to every provider request.
#[derive(Debug, Clone)]
pub struct PromptSettings {
    /// Model identifier; empty means "use the provider's configured default".
    pub model: String,
    pub system_prompt: String,
    pub max_tokens: u32,
    pub temperature: f64,
}

impl Default for PromptSettings {
    fn default() -> Self {
        Self {
            model: String::new(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            max_tokens: 500,
            temperature: 0.7,
        }
    }
}

/// Orchestrates chat lifecycle, message persistence, and the AI relay.
///
/// Generic over `ChatRepository` and `LlmProvider` to maintain clean
/// architecture (parley-core never depends on parley-infra). Both
/// dependencies are injected explicitly; there is no global state.
pub struct ChatService<C: ChatRepository, P: LlmProvider> {
    repo: C,
    provider: P,
    prompt: PromptSettings,
}

impl<C: ChatRepository, P: LlmProvider> ChatService<C, P> {
    /// Create a new chat service with the given repository and provider.
    pub fn new(repo: C, provider: P, prompt: PromptSettings) -> Self {
        Self {
            repo,
            provider,
            prompt,
        }
    }

    /// Access the repository.
    pub fn repo(&self) -> &C {
        &self.repo
    }

    /// Create a new chat, seeding it with the bot greeting.
    ///
    /// A missing or blank title falls back to [`DEFAULT_CHAT_TITLE`].
    pub async fn create_chat(&self, title: Option<String>) -> Result<Chat, ChatError> {
        let title = title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_CHAT_TITLE.to_string());

        let chat = self
            .repo
            .create_chat(&NewChat {
                title,
                created_at: Utc::now(),
            })
            .await?;

        self.repo
            .append_message(&NewMessage::bot(chat.id, GREETING))
            .await?;

        info!(chat_id = chat.id, title = %chat.title, "Chat created");
        Ok(chat)
    }

    /// List all chats in creation order.
    pub async fn list_chats(&self) -> Result<Vec<ChatSummary>, ChatError> {
        Ok(self.repo.list_chats().await?)
    }

    /// List messages for a chat, oldest first.
    ///
    /// Fails with `NotFound` if the chat does not exist.
    pub async fn list_messages(&self, chat_id: i64) -> Result<Vec<Message>, ChatError> {
        if self.repo.get_chat(chat_id).await?.is_none() {
            return Err(ChatError::NotFound);
        }
        Ok(self.repo.list_messages(chat_id).await?)
    }

    /// Relay a user message: persist it, send the full history to the
    /// provider, persist the reply, and return both messages.
    ///
    /// On provider failure the user message stays persisted and the error
    /// surfaces to the caller; no bot message is written. Nothing at all is
    /// written when validation or the chat lookup fails.
    pub async fn post_message(
        &self,
        chat_id: i64,
        content: &str,
    ) -> Result<(Message, Message), ChatError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(ChatError::Validation(
                "Message content is required".to_string(),
            ));
        }

        if self.repo.get_chat(chat_id).await?.is_none() {
            return Err(ChatError::NotFound);
        }

        let user_message = self
            .repo
            .append_message(&NewMessage::user(chat_id, content))
            .await?;

        // The history already includes the user message saved above.
        let history = self.repo.list_messages(chat_id).await?;
        let turns = history
            .iter()
            .map(|m| ChatTurn {
                role: if m.is_bot {
                    MessageRole::Assistant
                } else {
                    MessageRole::User
                },
                content: m.content.clone(),
            })
            .collect();

        let request = CompletionRequest {
            model: self.prompt.model.clone(),
            turns,
            system: (!self.prompt.system_prompt.is_empty())
                .then(|| self.prompt.system_prompt.clone()),
            max_tokens: self.prompt.max_tokens,
            temperature: Some(self.prompt.temperature),
        };

        let response = match self.provider.complete(&request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(
                    chat_id,
                    provider = self.provider.name(),
                    error = %e,
                    "Completion failed; user message kept"
                );
                return Err(e.into());
            }
        };

        let bot_message = self
            .repo
            .append_message(&NewMessage::bot(chat_id, normalize_reply(&response.content)))
            .await?;

        info!(
            chat_id,
            user_message_id = user_message.id,
            bot_message_id = bot_message.id,
            "Exchange persisted"
        );

        Ok((user_message, bot_message))
    }

    /// Delete all chats and messages. Idempotent.
    pub async fn clear_all(&self) -> Result<u64, ChatError> {
        let removed = self.repo.clear_all().await?;
        info!(chats_removed = removed, "All conversations cleared");
        Ok(removed)
    }
}
