//! Configuration types for the API client.
//!
//! This module provides configuration options for:
//! - [`ApiConfig`]: Platform host, port, API version, scheme and timeout
//! - [`TlsConfig`]: TLS/SSL settings
//! - [`MaterialsProjectConfig`]: Location of the third-party structure database
//!
//! Values can be given explicitly through the builders or read from the
//! process environment with [`ApiConfig::from_env`]. The environment is only
//! ever read, never written.

mod api;
mod tls;

pub use api::{ApiConfig, MaterialsProjectConfig};
pub use tls::TlsConfig;

/// Environment variable holding the API host.
pub const API_HOST_ENV: &str = "API_HOST";
/// Environment variable holding the API port.
pub const API_PORT_ENV: &str = "API_PORT";
/// Environment variable holding the API version.
pub const API_VERSION_ENV: &str = "API_VERSION";
/// Environment variable holding the scheme flag (`true` for https).
pub const API_SECURE_ENV: &str = "API_SECURE";
/// Environment variable holding the OIDC bearer token.
pub const ACCESS_TOKEN_ENV: &str = "OIDC_ACCESS_TOKEN";
/// Environment variable holding the legacy account id.
pub const ACCOUNT_ID_ENV: &str = "ACCOUNT_ID";
/// Environment variable holding the legacy auth token.
pub const AUTH_TOKEN_ENV: &str = "AUTH_TOKEN";
