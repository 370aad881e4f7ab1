use serde::{Deserialize, Serialize};

use crate::config::Mode;

/// Request payload for the recipe generation endpoint
#[derive(Debug, Deserialize)]
pub struct GenerateRecipeRequest {
    /// Ingredient names, e.g. `["Egg", "Onions"]`; at least one is required
    pub ingredients: Vec<String>,
    /// Backend to use; defaults to `local`
    #[serde(default)]
    pub mode: Mode,
}

/// Error payload returned with every non-2xx response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// What went wrong
    pub detail: String,
    /// What the caller can do about it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

/// Liveness payload
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}
