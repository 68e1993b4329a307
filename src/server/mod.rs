//! HTTP serving of the inference service
//!
//! A thin JSON API standing in for the excluded form front end: health check,
//! model metadata, and single-session prediction.

mod api;
mod error;
mod handlers;

pub use api::create_router;
pub use error::ServerError;

use crate::inference::InferenceService;
use anyhow::Context;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub artifact_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            artifact_path: "models/intent_model.json".to_string(),
        }
    }
}

/// Shared application state: the loaded, immutable inference service
pub struct AppState {
    pub service: InferenceService,
}

/// Start the server with the given configuration.
///
/// The artifact is loaded exactly once, before the listener binds; a missing
/// or corrupt artifact is fatal here since the service cannot function
/// without it.
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let service = InferenceService::from_artifact(&config.artifact_path)
        .with_context(|| format!("could not load model from {}", config.artifact_path))?;

    let state = Arc::new(AppState { service });
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!(host = %config.host, port = config.port, "purchase-intent server starting");
    info!(url = %format!("http://{}/api/health", addr), "health endpoint available");
    info!(url = %format!("http://{}/api/predict", addr), "prediction endpoint available");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    let shutdown_signal = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C signal handler");
        info!("shutdown signal received, stopping server");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("server shut down cleanly");
    Ok(())
}
