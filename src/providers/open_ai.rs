use crate::config::{ProviderConfig, OPENAI_API_KEY_ENV};
use crate::error::RecipeError;
use crate::providers::chat::{build_client, completion_body, read_completion};
use crate::providers::{LlmProvider, ProviderError};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_MODEL: &str = "gpt-4o";

pub struct OpenAIProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAIProvider {
    /// Create a new OpenAI provider from configuration.
    ///
    /// The key comes from the config, then `OPENAI_API_KEY`. Without one the
    /// backend is unavailable; there is no built-in fallback key.
    pub fn new(config: &ProviderConfig, timeout: Duration) -> Result<Self, RecipeError> {
        let api_key = config.resolve_api_key(OPENAI_API_KEY_ENV).ok_or_else(|| {
            RecipeError::BackendUnavailable(format!(
                "OpenAI mode requires an API key; set {} or providers.openai.api_key",
                OPENAI_API_KEY_ENV
            ))
        })?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(OpenAIProvider {
            client: build_client(timeout)?,
            api_key,
            base_url,
            model: config
                .model
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String, model: String) -> Self {
        OpenAIProvider {
            client: Client::new(),
            api_key,
            base_url,
            model,
            temperature: 0.7,
            max_tokens: 2000,
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAIProvider {
    fn provider_name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, system: &str, user: &str) -> Result<String, ProviderError> {
        debug!("Requesting completion from OpenAI model {}", self.model);

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&completion_body(
                &self.model,
                system,
                user,
                self.temperature,
                self.max_tokens,
            ))
            .send()
            .await?;

        read_completion("OpenAI", response).await
    }
}
