use axum::http::HeaderName;

pub const DEFAULT_VERSION: &str = "v1";
pub const DEFAULT_VERSION_HEADER: &str = "X-API-Version";

const ENV_DEFAULT_VERSION: &str = "API_DEFAULT_VERSION";
const ENV_VERSION_HEADER: &str = "API_VERSION_HEADER";
const ENV_SUPPORTED_VERSIONS: &str = "API_SUPPORTED_VERSIONS";
const FALLBACK_SUPPORTED_VERSIONS: &str = "v1,v2";

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("At least one API version must be supported")]
    NoVersions,

    #[error("Invalid API version identifier: {0:?}")]
    InvalidVersion(String),

    #[error("API version {0} is listed more than once")]
    DuplicateVersion(String),

    #[error("Default version {0} is not among the supported versions")]
    UnsupportedDefault(String),

    #[error("Invalid version header name: {0:?}")]
    InvalidHeaderName(String),

    #[error("API version {0} collides with a reserved path under /api")]
    ReservedVersion(String),
}

/// Versions the API understands and how a request names one.
///
/// `supported_versions` keeps declaration order; path-prefix resolution walks
/// it front to back. The list only ever grows, through [`VersionConfig::add_version`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionConfig {
    default_version: String,
    header_name: HeaderName,
    supported_versions: Vec<String>,
}

impl VersionConfig {
    pub fn new<I, S>(
        default_version: impl Into<String>,
        header_name: &str,
        supported_versions: I,
    ) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let default_version = default_version.into();
        let header_name = HeaderName::try_from(header_name)
            .map_err(|_| ConfigError::InvalidHeaderName(header_name.to_string()))?;

        let mut versions: Vec<String> = Vec::new();
        for version in supported_versions {
            let version = version.into();
            validate_version(&version)?;
            if versions.contains(&version) {
                return Err(ConfigError::DuplicateVersion(version));
            }
            versions.push(version);
        }

        if versions.is_empty() {
            return Err(ConfigError::NoVersions);
        }
        if !versions.contains(&default_version) {
            return Err(ConfigError::UnsupportedDefault(default_version));
        }

        Ok(Self {
            default_version,
            header_name,
            supported_versions: versions,
        })
    }

    /// Single-version configuration: `default_version` is the only supported entry.
    pub fn with_default(default_version: impl Into<String>) -> Result<Self, ConfigError> {
        let default_version = default_version.into();
        Self::new(
            default_version.clone(),
            DEFAULT_VERSION_HEADER,
            [default_version],
        )
    }

    /// Reads `API_DEFAULT_VERSION`, `API_VERSION_HEADER` and
    /// `API_SUPPORTED_VERSIONS` (comma separated) from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let default_version =
            lookup(ENV_DEFAULT_VERSION).unwrap_or_else(|| DEFAULT_VERSION.to_string());
        let header_name =
            lookup(ENV_VERSION_HEADER).unwrap_or_else(|| DEFAULT_VERSION_HEADER.to_string());
        let supported = lookup(ENV_SUPPORTED_VERSIONS)
            .unwrap_or_else(|| FALLBACK_SUPPORTED_VERSIONS.to_string());

        let versions = supported
            .split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string);

        Self::new(default_version, header_name.trim(), versions)
    }

    pub fn default_version(&self) -> &str {
        &self.default_version
    }

    pub fn header_name(&self) -> &HeaderName {
        &self.header_name
    }

    pub fn supported_versions(&self) -> &[String] {
        &self.supported_versions
    }

    pub fn supports(&self, version: &str) -> bool {
        self.supported_versions.iter().any(|v| v == version)
    }

    /// Appends `version` unless it is already supported. Returns whether the
    /// list changed.
    pub fn add_version(&mut self, version: impl Into<String>) -> Result<bool, ConfigError> {
        let version = version.into();
        validate_version(&version)?;
        if self.supports(&version) {
            return Ok(false);
        }
        self.supported_versions.push(version);
        Ok(true)
    }
}

impl Default for VersionConfig {
    fn default() -> Self {
        Self {
            default_version: DEFAULT_VERSION.to_string(),
            header_name: HeaderName::from_static("x-api-version"),
            supported_versions: vec![DEFAULT_VERSION.to_string()],
        }
    }
}

// Versions end up in URL prefixes and response headers. Route syntax
// (captures, wildcards) would turn the prefix into a pattern.
const ROUTE_METACHARACTERS: &[u8] = b"/:*{}";

fn validate_version(version: &str) -> Result<(), ConfigError> {
    let valid = !version.is_empty()
        && version
            .bytes()
            .all(|b| b.is_ascii_graphic() && !ROUTE_METACHARACTERS.contains(&b));
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidVersion(version.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = VersionConfig::default();
        assert_eq!(config.default_version(), "v1");
        assert_eq!(config.header_name().as_str(), "x-api-version");
        assert_eq!(config.supported_versions(), ["v1".to_string()]);
    }

    #[test]
    fn test_new_keeps_declared_order() {
        let config = VersionConfig::new("v2", "X-API-Version", ["v3", "v1", "v2"]).unwrap();
        assert_eq!(config.supported_versions(), ["v3", "v1", "v2"]);
        assert_eq!(config.default_version(), "v2");
    }

    #[test]
    fn test_rejects_invalid_configs() {
        assert_eq!(
            VersionConfig::new("v1", "X-API-Version", ["v1", "v1"]),
            Err(ConfigError::DuplicateVersion("v1".to_string()))
        );
        assert_eq!(
            VersionConfig::new("v3", "X-API-Version", ["v1", "v2"]),
            Err(ConfigError::UnsupportedDefault("v3".to_string()))
        );
        assert_eq!(
            VersionConfig::new("v1", "X API Version", ["v1"]),
            Err(ConfigError::InvalidHeaderName("X API Version".to_string()))
        );
        assert_eq!(
            VersionConfig::new("v1", "X-API-Version", Vec::<String>::new()),
            Err(ConfigError::NoVersions)
        );
        assert_eq!(
            VersionConfig::new("v1", "X-API-Version", ["v1", "v2/beta"]),
            Err(ConfigError::InvalidVersion("v2/beta".to_string()))
        );
    }

    #[test]
    fn test_rejects_route_syntax_in_versions() {
        for version in [":v", "*v", "{v}", "v{", "v}", "v:2"] {
            assert_eq!(
                VersionConfig::new("v1", "X-API-Version", ["v1", version]),
                Err(ConfigError::InvalidVersion(version.to_string()))
            );
        }

        let mut config = VersionConfig::default();
        assert_eq!(
            config.add_version("*v"),
            Err(ConfigError::InvalidVersion("*v".to_string()))
        );
        assert_eq!(config.supported_versions(), ["v1"]);
    }

    #[test]
    fn test_add_version_appends_once() {
        let mut config = VersionConfig::with_default("v1").unwrap();
        assert!(config.add_version("v2").unwrap());
        assert!(!config.add_version("v1").unwrap());
        assert!(!config.add_version("v2").unwrap());
        assert_eq!(config.supported_versions(), ["v1", "v2"]);
        assert!(config.add_version("").is_err());
    }

    #[test]
    fn test_from_lookup_defaults() {
        let config = VersionConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.default_version(), "v1");
        assert_eq!(config.supported_versions(), ["v1", "v2"]);
        assert_eq!(config.header_name().as_str(), "x-api-version");
    }

    #[test]
    fn test_from_lookup_reads_values() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("API_DEFAULT_VERSION", "v2"),
            ("API_VERSION_HEADER", "Accept-Version"),
            ("API_SUPPORTED_VERSIONS", " v1, v2 ,,v3"),
        ]);
        let config = VersionConfig::from_lookup(|key| env.get(key).map(|v| v.to_string())).unwrap();
        assert_eq!(config.default_version(), "v2");
        assert_eq!(config.header_name().as_str(), "accept-version");
        assert_eq!(config.supported_versions(), ["v1", "v2", "v3"]);
    }
}
