//! API version resolution, gating and deprecation
//!
//! Framework-facing wiring lives in `crate::api`; this module holds the
//! decisions themselves.

pub mod config;
pub mod deprecation;
pub mod gate;
pub mod resolver;

pub use config::{ConfigError, VersionConfig};
pub use deprecation::{annotate, Deprecation, InvalidDeprecation};
pub use gate::{enforce, VersionGate, VersionRejected};
pub use resolver::{resolve, RequestVersionContext};
