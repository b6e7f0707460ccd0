use crate::api::models::AppState;
use crate::api::review::handlers::read_reviews_handler;
use axum::{routing::post, Router};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/read_reviews", post(read_reviews_handler))
}
