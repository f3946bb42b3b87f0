//! System-level routes and utilities

pub mod health_check;

use axum::{extract::OriginalUri, routing::get, Router};

use crate::errors::ApiError;

/// Creates system routes: health check and the JSON fallback for unknown paths
#[tracing::instrument(name = "create_system_router")]
pub fn create_system_router() -> Router {
    tracing::info!("Creating system router");

    Router::new()
        .route("/health", get(health_check::health_check))
        .fallback(not_found)
}

async fn not_found(OriginalUri(uri): OriginalUri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}
