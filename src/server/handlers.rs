use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::{info, warn};

use super::types::{ErrorResponse, GenerateRecipeRequest, HealthResponse};
use super::ServerState;
use crate::error::RecipeError;
use crate::generator::RecipeGenerator;
use crate::model::Recipe;

/// HTTP status for each error kind
///
/// | error                  | status |
/// |------------------------|--------|
/// | `BackendUnavailable`   | 503    |
/// | `AuthenticationFailed` | 401    |
/// | `InvalidRequest`       | 422    |
/// | anything else          | 500    |
pub fn status_for(error: &RecipeError) -> StatusCode {
    match error {
        RecipeError::BackendUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        RecipeError::AuthenticationFailed(_) => StatusCode::UNAUTHORIZED,
        RecipeError::InvalidRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
        RecipeError::MalformedOutput(_)
        | RecipeError::SchemaValidation(_)
        | RecipeError::GenerationFailed(_)
        | RecipeError::ConfigError(_)
        | RecipeError::ServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// A [`RecipeError`] rendered as a JSON error response
pub struct ApiError(pub RecipeError);

impl From<RecipeError> for ApiError {
    fn from(error: RecipeError) -> Self {
        ApiError(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        warn!("Request failed with {}: {}", status, self.0);

        let body = ErrorResponse {
            detail: self.0.to_string(),
            hint: self.0.guidance().map(String::from),
        };
        (status, Json(body)).into_response()
    }
}

/// Handles `POST /generate-recipe`
///
/// # Request Format
/// `{"ingredients": ["Egg", "Onions"], "mode": "local"}`; `mode` is optional
/// and must be `local` or `openai`.
///
/// # Response Format
/// The recipe as a flat JSON object, or `{"detail": ..., "hint": ...}` with
/// the status given by [`status_for`]. A body that does not deserialize is
/// an `InvalidRequest` (422) like any other unusable request.
pub(crate) async fn generate_recipe(
    State(state): State<ServerState>,
    payload: Result<Json<GenerateRecipeRequest>, JsonRejection>,
) -> Result<Json<Recipe>, ApiError> {
    let Json(req) =
        payload.map_err(|rejection| RecipeError::InvalidRequest(rejection.body_text()))?;

    info!(
        "Recipe requested in {} mode with {} ingredient(s)",
        req.mode,
        req.ingredients.len()
    );

    if req.ingredients.is_empty() {
        return Err(RecipeError::InvalidRequest(
            "ingredients must contain at least one item".to_string(),
        )
        .into());
    }

    let generator = RecipeGenerator::from_config(req.mode, &state.config)?;
    let recipe = generator.generate(&req.ingredients).await?;

    Ok(Json(recipe))
}

/// Handles `GET /health`
pub(crate) async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "recipe-intelligence-api",
    })
}
