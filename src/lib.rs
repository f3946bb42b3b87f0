//! API version resolution for axum services
//!
//! Requests are matched to an API version by `/api/{version}` prefix or by a
//! version header, endpoints can be restricted to a set of versions, and
//! deprecated endpoints announce themselves through response headers.
//!
//! ```rust,ignore
//! use api_versioning::api::VersionRegistry;
//! use api_versioning::versioning::VersionConfig;
//!
//! let mut registry = VersionRegistry::new(VersionConfig::from_env()?);
//! registry.register("v1", v1_routes)?.register("v2", v2_routes)?;
//! let app = registry.into_router();
//! ```

pub mod api;
pub mod errors;
pub mod system;
pub mod versioning;
