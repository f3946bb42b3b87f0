//! API module containing all versioned API endpoints
//!
//! This module organizes API endpoints by version to support
//! backward compatibility and gradual migration.

pub mod common;
pub mod registry;
pub mod v1;
pub mod v2;

use std::sync::Arc;

use axum::{body::Body, Router};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::errors::SetupError;
use crate::system;
use crate::versioning::VersionConfig;

use common::tracing::{
    make_custom_span, on_custom_failure, on_custom_request, on_custom_response, MakeRequestUuidV4,
};

pub use registry::{versioned_router, VersionRegistry};

/// Registers every API version, the gated routes and the system routes.
///
/// Callers may merge further routes before calling
/// [`VersionRegistry::into_router`].
#[tracing::instrument(name = "create_api_registry", skip(config))]
pub fn create_api_registry(config: VersionConfig) -> Result<VersionRegistry, SetupError> {
    tracing::info!("Creating API registry with versioned endpoints");

    let mut registry = VersionRegistry::new(config);
    registry
        .register_pinned("v1", v1::create_v1_router()?)?
        .register_pinned("v2", v2::create_v2_router())?;

    let config = Arc::new(registry.config().clone());
    registry
        .merge(v2::create_v2_gated_router(config))
        .merge(system::create_system_router());

    Ok(registry)
}

/// Wraps the assembled router with CORS, request ids and HTTP tracing.
///
/// The request id is set before the trace span opens, so every span carries it.
pub fn add_http_layers(router: Router) -> Router {
    router
        .layer(CorsLayer::permissive())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(make_custom_span::<Body>)
                .on_request(on_custom_request::<Body>)
                .on_response(on_custom_response::<Body>)
                .on_failure(on_custom_failure),
        )
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
}
