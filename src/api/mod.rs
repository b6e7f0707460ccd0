pub mod models;
pub mod review;

// Re-exports
pub use models::*;

use axum::{extract::{DefaultBodyLimit, State}, routing::get, Json, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub const USAGE: &str = "API takes in a CSV or EXCEL file containing reviews with a column named 'Review' and returns the average POSITIVE, NEGATIVE and NEUTRAL sentiment score of the reviews.";

pub async fn root_handler() -> Json<UsageResponse> {
    Json(UsageResponse { how_to_use: USAGE })
}

// Health handler (simple, keep here)
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        model: state.model.model_name().to_string(),
    })
}

/// Full application router
pub fn app(state: AppState) -> Router {
    let body_limit = state.config.server.max_upload_bytes;

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .merge(review::routes())
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
