//! Registration of versioned route groups
//!
//! A [`VersionRegistry`] collects one router per API version during startup
//! and is consumed by [`VersionRegistry::into_router`]. After that point the
//! version configuration is shared read-only with every request.

use std::sync::Arc;

use axum::{
    extract::State,
    middleware,
    routing::get,
    Extension, Json, Router,
};

use crate::api::common::middleware::{pin_version, resolve_version};
use crate::api::common::VersionsResponse;
use crate::versioning::{ConfigError, RequestVersionContext, VersionConfig};

pub const VERSIONS_PATH: &str = "/api/versions";

// `/api/versions` is taken by the introspection route.
const RESERVED_VERSIONS: &[&str] = &["versions"];

/// URL prefix a version's route group is nested under.
pub fn version_prefix(version: &str) -> String {
    format!("/api/{}", version)
}

/// Wraps `router` so every request entering it is served as `version`,
/// whatever the header says.
pub fn versioned_router(version: impl Into<String>, router: Router) -> Router {
    router.layer(middleware::from_fn_with_state(
        RequestVersionContext::new(version),
        pin_version,
    ))
}

#[derive(Debug)]
pub struct VersionRegistry {
    config: VersionConfig,
    groups: Vec<(String, Router)>,
    unversioned: Router,
}

impl VersionRegistry {
    pub fn new(config: VersionConfig) -> Self {
        Self {
            config,
            groups: Vec::new(),
            unversioned: Router::new(),
        }
    }

    pub fn config(&self) -> &VersionConfig {
        &self.config
    }

    /// Serves `handlers` under `/api/{version}` and adds `version` to the
    /// supported list if it is new. Registering a version again replaces its
    /// handlers.
    pub fn register(&mut self, version: impl Into<String>, handlers: Router) -> Result<&mut Self, ConfigError> {
        let version = version.into();
        if RESERVED_VERSIONS.contains(&version.as_str()) {
            return Err(ConfigError::ReservedVersion(version));
        }

        if self.config.add_version(version.clone())? {
            tracing::info!(version = %version, "Registered new API version");
        }

        match self.groups.iter_mut().find(|(v, _)| *v == version) {
            Some((_, existing)) => {
                tracing::debug!(version = %version, "Replacing route group");
                *existing = handlers;
            }
            None => self.groups.push((version, handlers)),
        }
        Ok(self)
    }

    /// Like [`VersionRegistry::register`], with every request in the group
    /// pinned to `version` (see [`versioned_router`]).
    pub fn register_pinned(&mut self, version: impl Into<String>, handlers: Router) -> Result<&mut Self, ConfigError> {
        let version = version.into();
        let handlers = versioned_router(version.clone(), handlers);
        self.register(version, handlers)
    }

    /// Adds routes that live outside any version prefix. They still pass
    /// through version resolution.
    pub fn merge(&mut self, router: Router) -> &mut Self {
        let unversioned = std::mem::take(&mut self.unversioned);
        self.unversioned = unversioned.merge(router);
        self
    }

    /// Freezes the configuration and assembles the application router.
    #[tracing::instrument(name = "build_version_router", skip(self))]
    pub fn into_router(self) -> Router {
        let config = Arc::new(self.config);
        tracing::info!(
            versions = ?config.supported_versions(),
            default = %config.default_version(),
            "Building versioned router"
        );

        let mut router = Router::new()
            .route(VERSIONS_PATH, get(list_versions))
            .with_state(config.clone());

        for (version, handlers) in self.groups {
            router = router.nest(&version_prefix(&version), handlers);
        }

        router
            .merge(self.unversioned)
            .layer(middleware::from_fn_with_state(config, resolve_version))
    }
}

async fn list_versions(
    State(config): State<Arc<VersionConfig>>,
    current: Option<Extension<RequestVersionContext>>,
) -> Json<VersionsResponse> {
    let current = current
        .map(|Extension(ctx)| ctx.version().to_string())
        .unwrap_or_else(|| config.default_version().to_string());

    Json(VersionsResponse {
        versions: config.supported_versions().to_vec(),
        default: config.default_version().to_string(),
        current,
    })
}
