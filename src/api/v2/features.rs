use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::versioning::RequestVersionContext;

#[derive(Debug, Serialize, Deserialize)]
pub struct FeatureResponse {
    pub feature: String,
    pub version: String,
}

#[tracing::instrument(name = "New feature", skip(context))]
pub async fn new_feature(
    Extension(context): Extension<RequestVersionContext>,
) -> Json<FeatureResponse> {
    Json(FeatureResponse {
        feature: "new-feature".to_string(),
        version: context.version().to_string(),
    })
}
