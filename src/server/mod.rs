//! HTTP service exposing recipe generation
//!
//! Routes:
//! - `POST /generate-recipe` generates one recipe from a list of ingredients
//! - `GET /health` reports liveness

mod handlers;
mod types;

use axum::{
    routing::{get, post},
    Router,
};
use log::info;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::RecipeError;

pub use handlers::{status_for, ApiError};
pub use types::{ErrorResponse, GenerateRecipeRequest, HealthResponse};

/// The recipe HTTP service
pub struct Server {
    config: Arc<AppConfig>,
}

/// State shared between request handlers; read-only after startup
#[derive(Clone)]
pub(crate) struct ServerState {
    pub(crate) config: Arc<AppConfig>,
}

impl Server {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// The application router, without a listener attached
    pub fn router(&self) -> Router {
        Router::new()
            .route("/generate-recipe", post(handlers::generate_recipe))
            .route("/health", get(handlers::health))
            .with_state(ServerState {
                config: self.config.clone(),
            })
    }

    /// Starts the server and listens for requests on `addr` (e.g. "127.0.0.1:8001")
    pub async fn run(self, addr: &str) -> Result<(), RecipeError> {
        let app = self.router();

        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!("Recipe API listening on {}", listener.local_addr()?);

        axum::serve(listener, app).await?;

        Ok(())
    }
}
