mod chat;
mod error;
mod factory;
mod ollama;
mod open_ai;

pub use error::{
    classify_backend_message, classify_provider_error, is_auth_failure, ProviderError,
    AUTH_FAILURE_MARKERS,
};
pub use factory::ProviderFactory;
pub use ollama::OllamaProvider;
pub use open_ai::OpenAIProvider;

use async_trait::async_trait;

/// Unified trait for all LLM backends
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name (e.g., "ollama", "openai")
    fn provider_name(&self) -> &str;

    /// Send a system and a user instruction, returning the raw reply text
    async fn complete(&self, system: &str, user: &str) -> Result<String, ProviderError>;
}
