//! Common API utilities shared across versions
//!
//! Version middleware, HTTP tracing callbacks and the payloads shared by
//! every version.

pub mod middleware;
pub mod tracing;

use serde::{Deserialize, Serialize};

/// Body of `GET /api/versions`
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct VersionsResponse {
    pub versions: Vec<String>,
    pub default: String,
    pub current: String,
}

/// Pagination block returned by v2 list endpoints
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
}

/// Standard pagination parameters
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl PaginationParams {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(20).clamp(1, 100)
    }
}
