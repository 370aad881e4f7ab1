use log::{debug, info, warn};

use crate::config::{AppConfig, Mode};
use crate::error::RecipeError;
use crate::model::Recipe;
use crate::parse_recipe;
use crate::prompt::Prompt;
use crate::providers::{classify_provider_error, LlmProvider, ProviderFactory};

/// Generates recipes with a single backend.
///
/// Each call to [`generate`](RecipeGenerator::generate) makes at most one
/// backend request and never retries; every failure is returned to the caller.
pub struct RecipeGenerator {
    provider: Box<dyn LlmProvider>,
}

impl RecipeGenerator {
    pub fn new(provider: Box<dyn LlmProvider>) -> Self {
        RecipeGenerator { provider }
    }

    /// Build a generator for `mode` from the application configuration
    pub fn from_config(mode: Mode, config: &AppConfig) -> Result<Self, RecipeError> {
        Ok(Self::new(ProviderFactory::create(mode, config)?))
    }

    pub fn provider_name(&self) -> &str {
        self.provider.provider_name()
    }

    /// Generate one recipe from the given ingredient names.
    ///
    /// Names are trimmed and blank entries dropped; an empty list is rejected
    /// before the backend is contacted.
    pub async fn generate<S: AsRef<str>>(&self, ingredients: &[S]) -> Result<Recipe, RecipeError> {
        let ingredients: Vec<&str> = ingredients
            .iter()
            .map(|i| i.as_ref().trim())
            .filter(|i| !i.is_empty())
            .collect();

        if ingredients.is_empty() {
            return Err(RecipeError::InvalidRequest(
                "At least one ingredient is required".to_string(),
            ));
        }

        info!(
            "Generating recipe with {} from {} ingredient(s)",
            self.provider_name(),
            ingredients.len()
        );

        let prompt = Prompt::for_ingredients(&ingredients);
        let reply = self
            .provider
            .complete(&prompt.system, &prompt.user)
            .await
            .map_err(|e| {
                let error = classify_provider_error(e);
                warn!("{} request failed: {}", self.provider_name(), error);
                error
            })?;

        debug!("Raw reply from {}: {}", self.provider_name(), reply);

        let recipe = parse_recipe(&reply).inspect_err(|e| {
            warn!("Rejected reply from {}: {}", self.provider_name(), e);
        })?;

        info!("Generated recipe '{}'", recipe.name());
        Ok(recipe)
    }
}
