//! Generate structured recipes from a list of ingredients with a local
//! (Ollama) or cloud (OpenAI) model.
//!
//! The model is prompted with a chef persona and asked for a JSON recipe. Its
//! free-text reply is run through [`extract`] to find the JSON object and
//! through [`validate`](validate::validate) to enforce the recipe schema.
//!
//! ```no_run
//! # use recipe_intelligence::RecipeRequest;
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let recipe = RecipeRequest::builder()
//!     .ingredients_text("Egg, Onions")
//!     .build()
//!     .await?;
//! println!("{}", recipe.to_markdown());
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod extract;
pub mod generator;
pub mod model;
pub mod prompt;
pub mod providers;
pub mod server;
pub mod validate;

pub use builder::{RecipeRequest, RecipeRequestBuilder};
pub use config::{AppConfig, Mode, ProviderConfig};
pub use error::{FieldProblem, FieldViolation, RecipeError, SchemaViolations};
pub use extract::{extract_candidate, CandidateRecord, FieldValue};
pub use generator::RecipeGenerator;
pub use model::Recipe;
pub use server::Server;

/// Turn a raw model reply into a validated [`Recipe`].
///
/// # Errors
/// - [`RecipeError::MalformedOutput`] when no parseable JSON is found
/// - [`RecipeError::SchemaValidation`] when the JSON is not a valid recipe
pub fn parse_recipe(text: &str) -> Result<Recipe, RecipeError> {
    let record = extract_candidate(text)?;
    validate::validate(record)
}

/// Generate a recipe using configuration from `config.toml` and the environment
pub async fn generate_recipe<S: AsRef<str>>(
    ingredients: &[S],
    mode: Mode,
) -> Result<Recipe, RecipeError> {
    let config = AppConfig::load()?;
    RecipeGenerator::from_config(mode, &config)?
        .generate(ingredients)
        .await
}
