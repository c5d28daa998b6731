use std::sync::Arc;
use std::error::Error;
use tokio::net::TcpListener;
use axum::{Router, routing::get};
use tracing::info;

use crate::dataset::Dataset;
use crate::views::ViewDefaults;
use super::routes;

/// Read-only state shared by every handler
#[derive(Debug)]
pub struct AppState {
    pub dataset: Arc<Dataset>,
    pub defaults: ViewDefaults,
}

impl AppState {
    pub fn new(dataset: Arc<Dataset>, defaults: ViewDefaults) -> Self {
        Self { dataset, defaults }
    }
}

/// Builds the API router over the shared state
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::health_check))
        .route("/api/v1/models", get(routes::list_models))
        .route("/api/v1/models/ids", get(routes::list_model_ids))
        .route("/api/v1/models/{id}", get(routes::get_model))
        .route("/api/v1/developers", get(routes::list_developers))
        .route("/api/v1/developers/{name}", get(routes::get_developer))
        .route("/api/v1/compare", get(routes::compare_models))
        .route("/api/v1/red-teaming", get(routes::red_teaming_table))
        .route("/api/v1/metrics", get(routes::list_metrics))
        .route("/api/v1/recommendations/{metric}", get(routes::get_recommendations))
        .route("/api/v1/charts/{metric}", get(routes::get_chart))
        .route("/api/v1/providers", get(routes::list_providers))
        .with_state(state)
}

/// API Server exposing the dashboard views as JSON
pub struct ApiServer {
    state: Arc<AppState>,
    host: String,
    port: u16,
}

impl ApiServer {
    pub fn new(dataset: Arc<Dataset>, defaults: ViewDefaults, host: String, port: u16) -> Self {
        info!("Creating new API server on {}:{} over {} models", host, port, dataset.models().len());
        Self {
            state: Arc::new(AppState::new(dataset, defaults)),
            host,
            port,
        }
    }

    pub async fn start(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let app = router(Arc::clone(&self.state));

        info!("Starting server on {}:{}", self.host, self.port);
        let listener = TcpListener::bind((self.host.as_str(), self.port)).await?;

        info!("Server started successfully");
        axum::serve(listener, app).await?;
        Ok(())
    }
}
