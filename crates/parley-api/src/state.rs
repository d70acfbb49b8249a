//! Application state wiring all services together.
//!
//! AppState holds the concrete service instance used by the REST API.
//! The service is generic over repository/provider traits, but AppState
//! pins it to the concrete infra implementations.

use std::path::PathBuf;
use std::sync::Arc;

use parley_core::chat::service::{ChatService, DEFAULT_SYSTEM_PROMPT, PromptSettings};
use parley_infra::config::{Config, database_url};
use parley_infra::llm::openai_compat::OpenAiCompatibleProvider;
use parley_infra::sqlite::chat::SqliteChatRepository;
use parley_infra::sqlite::pool::DatabasePool;

/// Concrete type alias for the service generics pinned to infra implementations.
pub type ConcreteChatService = ChatService<SqliteChatRepository, OpenAiCompatibleProvider>;

/// Shared application state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
    pub db_pool: DatabasePool,
    pub web_dir: PathBuf,
}

impl AppState {
    /// Initialize the application state: connect to the DB, wire the service.
    pub async fn init(config: Config) -> anyhow::Result<Self> {
        // Ensure data directory exists
        tokio::fs::create_dir_all(&config.data_dir).await?;

        // Initialize database
        let db_pool = DatabasePool::new(&database_url(&config.data_dir)).await?;

        // Wire the provider: DeepSeek defaults, base URL overridable
        let mut provider = OpenAiCompatibleProvider::deepseek(config.api_key, &config.model);
        if let Some(ref base_url) = config.base_url {
            provider = provider.with_base_url(base_url);
        }

        let prompt = PromptSettings {
            model: config.model,
            system_prompt: config
                .system_prompt
                .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
            ..PromptSettings::default()
        };

        let chat_service = ChatService::new(
            SqliteChatRepository::new(db_pool.clone()),
            provider,
            prompt,
        );

        Ok(Self {
            chat_service: Arc::new(chat_service),
            db_pool,
            web_dir: config.web_dir,
        })
    }
}
