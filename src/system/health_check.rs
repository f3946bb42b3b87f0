use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use serde_json::json;

use crate::versioning::RequestVersionContext;

pub async fn health_check(context: Option<Extension<RequestVersionContext>>) -> impl IntoResponse {
    let api_version = context.map(|Extension(ctx)| ctx.version().to_string());
    (StatusCode::OK, Json(json!({ "status": "ok", "api_version": api_version })))
}
