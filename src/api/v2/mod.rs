//! API Version 2 endpoints
//!
//! Paginated listings, plus features that only exist from V2 on.

pub mod features;
pub mod users;

use std::sync::Arc;

use axum::{middleware, routing::get, Router};

use crate::api::common::middleware::require_version;
use crate::versioning::{VersionConfig, VersionGate};

pub const NEW_FEATURE_PATH: &str = "/api/new-feature";

/// Creates the V2 API router, to be nested under `/api/v2`
#[tracing::instrument(name = "create_v2_router")]
pub fn create_v2_router() -> Router {
    tracing::info!("Creating V2 API router");

    Router::new().route("/users", get(users::list_users))
}

/// Routes reachable without a version prefix but gated to V2 and later,
/// selected through the version header.
#[tracing::instrument(name = "create_v2_gated_router", skip(config))]
pub fn create_v2_gated_router(config: Arc<VersionConfig>) -> Router {
    let gate = VersionGate::new(["v2"], config);

    Router::new().route(
        NEW_FEATURE_PATH,
        get(features::new_feature).route_layer(middleware::from_fn_with_state(gate, require_version)),
    )
}
