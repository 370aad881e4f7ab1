use std::time::Duration;

use crate::config::{AppConfig, Mode};
use crate::error::RecipeError;
use crate::generator::RecipeGenerator;
use crate::model::Recipe;
use crate::prompt::parse_ingredient_list;
use crate::providers::ProviderFactory;

/// Builder for configuring and executing a single recipe generation
#[derive(Debug, Default)]
pub struct RecipeRequestBuilder {
    ingredients: Vec<String>,
    mode: Option<Mode>,
    config: Option<AppConfig>,
    timeout: Option<Duration>,
    api_key: Option<String>,
    model: Option<String>,
    base_url: Option<String>,
}

impl RecipeRequestBuilder {
    /// Add one ingredient
    ///
    /// # Example
    /// ```
    /// use recipe_intelligence::RecipeRequest;
    ///
    /// let builder = RecipeRequest::builder()
    ///     .ingredient("Egg")
    ///     .ingredient("Onions");
    /// ```
    pub fn ingredient(mut self, ingredient: impl Into<String>) -> Self {
        self.ingredients.push(ingredient.into());
        self
    }

    /// Add several ingredients
    pub fn ingredients<I, S>(mut self, ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ingredients
            .extend(ingredients.into_iter().map(Into::into));
        self
    }

    /// Add ingredients from comma-separated text such as `"Egg, Onions"`
    ///
    /// # Example
    /// ```
    /// use recipe_intelligence::RecipeRequest;
    ///
    /// let builder = RecipeRequest::builder()
    ///     .ingredients_text("Egg, Onions, Butter");
    /// ```
    pub fn ingredients_text(mut self, text: &str) -> Self {
        self.ingredients.extend(parse_ingredient_list(text));
        self
    }

    /// Select the backend; the configured default mode is used otherwise
    ///
    /// # Example
    /// ```
    /// use recipe_intelligence::{Mode, RecipeRequest};
    ///
    /// let builder = RecipeRequest::builder()
    ///     .ingredient("Egg")
    ///     .mode(Mode::OpenAI);
    /// ```
    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Use this configuration instead of loading `config.toml` and the environment
    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set a timeout for the backend request
    ///
    /// # Example
    /// ```
    /// use recipe_intelligence::RecipeRequest;
    /// use std::time::Duration;
    ///
    /// let builder = RecipeRequest::builder()
    ///     .ingredient("Egg")
    ///     .timeout(Duration::from_secs(60));
    /// ```
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Set the API key for the selected backend
    ///
    /// This allows passing the API key directly instead of relying on
    /// environment variables or config files.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the model name for the selected backend
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Point the selected backend at a different endpoint
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Build and execute the generation request
    ///
    /// # Errors
    /// Returns `RecipeError` if:
    /// - No ingredients were given
    /// - Configuration cannot be loaded
    /// - The backend is unavailable, rejects the credential or fails
    /// - The reply is not valid JSON or not a valid recipe
    ///
    /// # Example
    /// ```no_run
    /// # use recipe_intelligence::RecipeRequest;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let recipe = RecipeRequest::builder()
    ///     .ingredients_text("Egg, Onions")
    ///     .build()
    ///     .await?;
    /// println!("{}", recipe.to_markdown());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn build(self) -> Result<Recipe, RecipeError> {
        if self.ingredients.iter().all(|i| i.trim().is_empty()) {
            return Err(RecipeError::InvalidRequest(
                "No ingredients specified. Use .ingredient() or .ingredients_text()".to_string(),
            ));
        }

        let config = match self.config {
            Some(config) => config,
            None => AppConfig::load()?,
        };
        let mode = self.mode.unwrap_or(config.default_mode);

        let mut provider_config = config.providers.for_mode(mode).clone();
        if let Some(api_key) = self.api_key {
            provider_config.api_key = Some(api_key);
        }
        if let Some(model) = self.model {
            provider_config.model = Some(model);
        }
        if let Some(base_url) = self.base_url {
            provider_config.base_url = Some(base_url);
        }
        let timeout = self.timeout.unwrap_or_else(|| config.request_timeout());

        let provider = ProviderFactory::create_with_timeout(mode, &provider_config, timeout)?;
        RecipeGenerator::new(provider)
            .generate(&self.ingredients)
            .await
    }
}

/// Main entry point for the builder API
pub struct RecipeRequest;

impl RecipeRequest {
    /// Creates a new builder for generating a recipe
    ///
    /// # Example
    /// ```
    /// use recipe_intelligence::RecipeRequest;
    ///
    /// let builder = RecipeRequest::builder();
    /// ```
    pub fn builder() -> RecipeRequestBuilder {
        RecipeRequestBuilder::default()
    }
}
