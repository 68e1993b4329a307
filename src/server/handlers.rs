//! Request handlers

use super::error::Result;
use super::AppState;
use crate::inference::SessionFeatures;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

/// Body of POST /api/predict
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub features: SessionFeatures,
}

/// Response of POST /api/predict
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub class: u8,
    pub probability: f64,
    /// Operator-facing verdict: "likely" or "unlikely" to purchase
    pub label: String,
}

/// GET /api/health
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// GET /api/model — schema and forest summary of the loaded artifact
pub async fn model_info(State(state): State<Arc<AppState>>) -> Json<Value> {
    let bundle = state.service.bundle();

    let top_features: Vec<Value> = bundle
        .pipeline
        .feature_importances()
        .unwrap_or_default()
        .into_iter()
        .take(5)
        .map(|(name, importance)| json!({ "feature": name, "importance": importance }))
        .collect();

    Json(json!({
        "numeric_features": bundle.numeric_features,
        "categorical_features": bundle.categorical_features,
        "n_trees": bundle.pipeline.classifier().n_trees(),
        "top_features": top_features,
    }))
}

/// POST /api/predict — single-session prediction
pub async fn predict(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<PredictResponse>> {
    let prediction = state.service.predict(&request.features)?;

    Ok(Json(PredictResponse {
        class: prediction.class,
        probability: prediction.probability,
        label: if prediction.class == 1 {
            "likely".to_string()
        } else {
            "unlikely".to_string()
        },
    }))
}
