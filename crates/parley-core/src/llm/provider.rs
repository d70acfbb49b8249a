//! LlmProvider trait definition.
//!
//! The boundary object representing the remote text-completion service:
//! an ordered conversation in, generated text (or an error) out. No retry,
//! backoff, or streaming semantics live at this seam.

use parley_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for AI completion backends.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
/// Implementations live in parley-infra (e.g., `OpenAiCompatibleProvider`).
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "deepseek", "openai").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
