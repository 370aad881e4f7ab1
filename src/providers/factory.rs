use crate::config::{AppConfig, Mode, ProviderConfig};
use crate::error::RecipeError;
use crate::providers::{LlmProvider, OllamaProvider, OpenAIProvider};
use std::time::Duration;

pub struct ProviderFactory;

impl ProviderFactory {
    /// Create the backend for `mode` using the application configuration
    pub fn create(mode: Mode, config: &AppConfig) -> Result<Box<dyn LlmProvider>, RecipeError> {
        Self::create_with_timeout(
            mode,
            config.providers.for_mode(mode),
            config.request_timeout(),
        )
    }

    /// Create a backend from a single provider configuration
    pub fn create_with_timeout(
        mode: Mode,
        config: &ProviderConfig,
        timeout: Duration,
    ) -> Result<Box<dyn LlmProvider>, RecipeError> {
        if !config.enabled {
            return Err(RecipeError::BackendUnavailable(format!(
                "Provider '{}' is not enabled in configuration",
                mode
            )));
        }

        match mode {
            Mode::Local => Ok(Box::new(OllamaProvider::new(config, timeout)?)),
            Mode::OpenAI => Ok(Box::new(OpenAIProvider::new(config, timeout)?)),
        }
    }

    /// Create the backend for the configured default mode
    pub fn get_default_provider(config: &AppConfig) -> Result<Box<dyn LlmProvider>, RecipeError> {
        Self::create(config.default_mode, config)
    }
}
