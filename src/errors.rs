use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::versioning::{ConfigError, InvalidDeprecation, VersionRejected};

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    VersionRejected(#[from] VersionRejected),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            // Rejections carry their own body shape
            ApiError::VersionRejected(rejected) => rejected.into_response(),
            ApiError::NotFound(path) => {
                let status = StatusCode::NOT_FOUND;
                let message = format!("No route for {}", path);

                tracing::warn!(
                    error_message = %message,
                    status_code = %status,
                    "Request error"
                );

                let body = Json(json!({
                    "message": message,
                    "status": status.as_u16()
                }));
                (status, body).into_response()
            }
        }
    }
}

/// Errors raised while assembling the router, before any request is served.
#[derive(thiserror::Error, Debug)]
pub enum SetupError {
    #[error("Invalid version configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid deprecation: {0}")]
    Deprecation(#[from] InvalidDeprecation),
}
