use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::versioning::RequestVersionContext;

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct UsersResponse {
    pub users: Vec<String>,
}

#[tracing::instrument(name = "List users (v1)")]
pub async fn list_users() -> Json<UsersResponse> {
    Json(UsersResponse::default())
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OldEndpointResponse {
    pub message: String,
    pub served_by: String,
}

#[tracing::instrument(name = "Old endpoint (v1)", skip(context))]
pub async fn old_endpoint(
    Extension(context): Extension<RequestVersionContext>,
) -> Json<OldEndpointResponse> {
    Json(OldEndpointResponse {
        message: "This endpoint still works but is scheduled for removal".to_string(),
        served_by: context.version().to_string(),
    })
}
