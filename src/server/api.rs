//! API route definitions

use super::{handlers, AppState};
use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;

async fn handle_404() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": true,
            "message": "Endpoint not found",
        })),
    )
}

/// Build the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route("/health", get(handlers::health))
        .route("/model", get(handlers::model_info))
        .route("/predict", post(handlers::predict))
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .fallback(handle_404)
}
