//! API Version 1 endpoints
//!
//! The original surface, kept for existing clients. Endpoints superseded in
//! V2 answer with deprecation headers.

pub mod users;

use axum::{middleware, routing::get, Router};

use crate::api::common::middleware::mark_deprecated;
use crate::versioning::{Deprecation, InvalidDeprecation};

pub const OLD_ENDPOINT_NOTICE: &str = "Use /api/v2/users instead";
pub const OLD_ENDPOINT_SUNSET: &str = "v3";

/// Creates the V1 API router, to be nested under `/api/v1`
#[tracing::instrument(name = "create_v1_router")]
pub fn create_v1_router() -> Result<Router, InvalidDeprecation> {
    tracing::info!("Creating V1 API router");

    let deprecation = Deprecation::new(Some(OLD_ENDPOINT_NOTICE), Some(OLD_ENDPOINT_SUNSET))?;

    let router = Router::new()
        .route("/users", get(users::list_users))
        .route(
            "/old-endpoint",
            get(users::old_endpoint)
                .route_layer(middleware::from_fn_with_state(deprecation, mark_deprecated)),
        );
    Ok(router)
}
