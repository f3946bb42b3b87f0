//! Version resolution
//!
//! Resolution order: `/api/{version}` path prefix, then the configured
//! version header, then the default version.

use axum::http::HeaderMap;

use super::config::VersionConfig;

pub const API_PREFIX: &str = "/api/";

/// Version resolved for a single request.
///
/// Lives in the request extensions for the duration of the request. Inner
/// layers that pin a version hand it back through the response extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestVersionContext {
    version: String,
}

impl RequestVersionContext {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
        }
    }

    /// Resolves the version for a request from its path and headers.
    pub fn resolve(path: &str, headers: &HeaderMap, config: &VersionConfig) -> Self {
        let header_value = headers
            .get(config.header_name())
            .and_then(|value| value.to_str().ok());
        Self::new(resolve(path, header_value, config))
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

/// Returns the API version that applies to a request.
///
/// The result is always one of `config.supported_versions()`. Unknown header
/// values fall through to the default.
pub fn resolve<'a>(path: &str, header_value: Option<&str>, config: &'a VersionConfig) -> &'a str {
    if let Some(version) = version_from_path(path, config) {
        return version;
    }

    header_value
        .and_then(|value| {
            config
                .supported_versions()
                .iter()
                .find(|v| v.as_str() == value)
        })
        .map(String::as_str)
        .unwrap_or_else(|| config.default_version())
}

fn version_from_path<'a>(path: &str, config: &'a VersionConfig) -> Option<&'a str> {
    let rest = path.strip_prefix(API_PREFIX)?;
    config
        .supported_versions()
        .iter()
        .find(|version| {
            rest.strip_prefix(version.as_str())
                .is_some_and(|tail| tail.is_empty() || tail.starts_with('/'))
        })
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn config() -> VersionConfig {
        VersionConfig::new("v1", "X-API-Version", ["v1", "v2"]).unwrap()
    }

    #[test]
    fn test_every_supported_version_resolves_from_path() {
        let config = config();
        for version in config.supported_versions() {
            assert_eq!(resolve(&format!("/api/{version}"), None, &config), version);
            assert_eq!(
                resolve(&format!("/api/{version}/users"), None, &config),
                version
            );
        }
    }

    #[test]
    fn test_every_supported_version_resolves_from_header() {
        let config = config();
        for version in config.supported_versions() {
            assert_eq!(resolve("/anything", Some(version), &config), version);
        }
    }

    #[test]
    fn test_falls_back_to_default() {
        let config = config();
        assert_eq!(resolve("/unversioned/path", None, &config), "v1");
        assert_eq!(resolve("/users", Some("unknown-version"), &config), "v1");
        assert_eq!(resolve("/users", Some(""), &config), "v1");
    }

    #[test]
    fn test_prefix_must_end_at_segment_boundary() {
        let config = config();
        assert_eq!(resolve("/api/v2beta/users", None, &config), "v1");
        assert_eq!(resolve("/api/v2beta/users", Some("v2"), &config), "v2");
        assert_eq!(resolve("/apiv2/users", None, &config), "v1");
        assert_eq!(resolve("/v2/users", None, &config), "v1");
    }

    #[test]
    fn test_path_wins_over_header() {
        let config = config();
        assert_eq!(resolve("/api/v1/users", Some("v2"), &config), "v1");
    }

    #[test]
    fn test_header_match_is_exact() {
        let config = config();
        assert_eq!(resolve("/users", Some("V2"), &config), "v1");
        assert_eq!(resolve("/users", Some(" v2"), &config), "v1");
    }

    #[test]
    fn test_declared_order_decides_overlapping_prefixes() {
        let config = VersionConfig::new("v1", "X-API-Version", ["v1", "v1.1"]).unwrap();
        assert_eq!(resolve("/api/v1.1/users", None, &config), "v1.1");
        assert_eq!(resolve("/api/v1/users", None, &config), "v1");
    }

    #[test]
    fn test_scenario_two_versions() {
        let config = config();
        let mut headers = HeaderMap::new();

        let ctx = RequestVersionContext::resolve("/api/v2/users", &headers, &config);
        assert_eq!(ctx.version(), "v2");

        headers.insert("x-api-version", HeaderValue::from_static("v2"));
        let ctx = RequestVersionContext::resolve("/users", &headers, &config);
        assert_eq!(ctx.version(), "v2");

        let ctx = RequestVersionContext::resolve("/users", &HeaderMap::new(), &config);
        assert_eq!(ctx.version(), "v1");
    }

    #[test]
    fn test_custom_header_name() {
        let config = VersionConfig::new("v1", "Accept-Version", ["v1", "v2"]).unwrap();
        let mut headers = HeaderMap::new();
        headers.insert("x-api-version", HeaderValue::from_static("v2"));
        assert_eq!(
            RequestVersionContext::resolve("/users", &headers, &config).version(),
            "v1"
        );

        headers.insert("accept-version", HeaderValue::from_static("v2"));
        assert_eq!(
            RequestVersionContext::resolve("/users", &headers, &config).version(),
            "v2"
        );
    }

    #[test]
    fn test_non_ascii_header_is_ignored() {
        let config = config();
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-api-version",
            HeaderValue::from_bytes("v2é".as_bytes()).unwrap(),
        );
        assert_eq!(
            RequestVersionContext::resolve("/users", &headers, &config).version(),
            "v1"
        );
    }
}
