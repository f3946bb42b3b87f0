use axum::{extract::Query, Json};
use serde::{Deserialize, Serialize};

use crate::api::common::{Pagination, PaginationParams};

#[derive(Debug, Serialize, Deserialize)]
pub struct PaginatedUsersResponse {
    pub users: Vec<String>,
    pub pagination: Pagination,
}

#[tracing::instrument(name = "List users (v2)")]
pub async fn list_users(Query(params): Query<PaginationParams>) -> Json<PaginatedUsersResponse> {
    let pagination = Pagination {
        page: params.page(),
        limit: params.limit(),
        total: 0,
    };

    tracing::debug!(page = pagination.page, limit = pagination.limit, "Listing users");

    Json(PaginatedUsersResponse {
        users: Vec::new(),
        pagination,
    })
}
