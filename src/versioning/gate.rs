use std::sync::Arc;

use axum::{
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use super::config::VersionConfig;
use super::resolver::RequestVersionContext;

/// A request reached an endpoint that is not enabled for its API version.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("This feature is not available in API {current}")]
pub struct VersionRejected {
    pub current: String,
    pub allowed: Vec<String>,
}

impl IntoResponse for VersionRejected {
    fn into_response(self) -> Response {
        tracing::warn!(
            current = %self.current,
            allowed = ?self.allowed,
            "Request rejected by version gate"
        );

        let body = Json(json!({
            "error": self.to_string(),
            "available_versions": self.allowed,
        }));
        (StatusCode::NOT_FOUND, body).into_response()
    }
}

/// Fails iff `resolved_version` is not one of `allowed`.
pub fn enforce<S: AsRef<str>>(resolved_version: &str, allowed: &[S]) -> Result<(), VersionRejected> {
    if allowed.iter().any(|v| v.as_ref() == resolved_version) {
        return Ok(());
    }

    Err(VersionRejected {
        current: resolved_version.to_string(),
        allowed: allowed.iter().map(|v| v.as_ref().to_string()).collect(),
    })
}

/// The set of versions a route is enabled for.
///
/// Allowed versions keep the order they were given in, minus duplicates;
/// that order is what a rejection reports back to the client. The
/// configuration is used when no version middleware ran before the gate and
/// it has to resolve the version itself.
#[derive(Debug, Clone)]
pub struct VersionGate {
    allowed: Arc<[String]>,
    config: Arc<VersionConfig>,
}

impl VersionGate {
    pub fn new<I, S>(allowed: I, config: Arc<VersionConfig>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut versions: Vec<String> = Vec::new();
        for version in allowed {
            let version = version.into();
            if !versions.contains(&version) {
                versions.push(version);
            }
        }

        Self {
            allowed: versions.into(),
            config,
        }
    }

    pub(crate) fn allowed(&self) -> &[String] {
        &self.allowed
    }

    pub fn check(&self, resolved_version: &str) -> Result<(), VersionRejected> {
        enforce(resolved_version, &self.allowed)
    }

    pub(crate) fn resolve(&self, path: &str, headers: &HeaderMap) -> RequestVersionContext {
        RequestVersionContext::resolve(path, headers, &self.config)
    }
}
