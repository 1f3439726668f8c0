//! Client builder resolving explicit settings, environment and defaults.

use std::time::Duration;

use super::ApiClient;
use crate::auth::{AuthContext, Credentials};
use crate::config::{ApiConfig, MaterialsProjectConfig, TlsConfig};
use crate::error::Result;

/// Builder for [`ApiClient`] instances.
///
/// Every setting is optional. Values set on the builder win; unset connection
/// settings come from `API_HOST`, `API_PORT`, `API_VERSION` and `API_SECURE`,
/// and unset auth values from `OIDC_ACCESS_TOKEN`, `ACCOUNT_ID` and
/// `AUTH_TOKEN`. Anything still unset falls back to the defaults of
/// [`ApiConfig`].
///
/// Passing a complete [`ApiConfig`] through [`config`](Self::config) skips
/// the connection variables entirely; individual overrides still apply on
/// top of it.
///
/// ## Example
///
/// ```rust,ignore
/// use mat3ra_api_client::{ApiClient, BearerCredentialsConfig};
///
/// let client = ApiClient::builder()
///     .host("platform.example.com")
///     .credentials(BearerCredentialsConfig::new(token))
///     .timeout(Duration::from_secs(10))
///     .build()?;
/// ```
#[derive(Debug, Default)]
#[must_use]
pub struct ApiClientBuilder {
    config: Option<ApiConfig>,
    host: Option<String>,
    port: Option<u16>,
    version: Option<String>,
    secure: Option<bool>,
    timeout: Option<Duration>,
    tls_config: Option<TlsConfig>,
    materials_project: Option<MaterialsProjectConfig>,
    auth: AuthContext,
}

impl ApiClientBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a complete configuration instead of reading the connection
    /// variables.
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the API host.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Sets the API port.
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Sets the API version segment.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Selects `https` (`true`) or `http`.
    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = Some(secure);
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the TLS configuration.
    pub fn tls_config(mut self, config: TlsConfig) -> Self {
        self.tls_config = Some(config);
        self
    }

    /// Disables TLS certificate verification.
    ///
    /// **WARNING**: only for local platform instances with self-signed
    /// certificates.
    pub fn insecure(mut self) -> Self {
        self.tls_config = Some(TlsConfig::insecure());
        self
    }

    /// Sets the Materials Project location used by structure imports.
    pub fn materials_project(mut self, config: MaterialsProjectConfig) -> Self {
        self.materials_project = Some(config);
        self
    }

    /// Sets a complete credential.
    ///
    /// Accepts [`BearerCredentialsConfig`](crate::BearerCredentialsConfig) or
    /// [`LegacyCredentialsConfig`](crate::LegacyCredentialsConfig).
    pub fn credentials(mut self, credentials: impl Into<Credentials>) -> Self {
        match credentials.into() {
            Credentials::Bearer(bearer) => {
                self.auth.access_token = Some(bearer.token().to_string());
            }
            Credentials::Legacy(legacy) => {
                self.auth.account_id = Some(legacy.account_id().to_string());
                self.auth.auth_token = Some(legacy.auth_token().to_string());
            }
        }
        self
    }

    /// Sets the account id, e.g. to act for an organization with a bearer token.
    pub fn account_id(mut self, account_id: impl Into<String>) -> Self {
        self.auth.account_id = Some(account_id.into());
        self
    }

    /// Sets every auth value at once, replacing earlier credentials.
    pub fn auth(mut self, auth: AuthContext) -> Self {
        self.auth = auth;
        self
    }

    /// Builds the client, reading unset values from the process environment.
    ///
    /// No request is sent.
    ///
    /// # Errors
    ///
    /// Returns a [`Configuration`](crate::ErrorKind::Configuration) error if
    /// an environment value is malformed or neither a bearer token nor an
    /// account-id/auth-token pair is available.
    pub fn build(self) -> Result<ApiClient> {
        self.build_with_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the client, reading unset values through `lookup`.
    pub fn build_with_lookup<F>(self, lookup: F) -> Result<ApiClient>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match self.config {
            Some(config) => config,
            None => ApiConfig::from_lookup(&lookup)?,
        };
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(version) = self.version {
            config.version = version;
        }
        if let Some(secure) = self.secure {
            config.secure = secure;
        }
        if let Some(timeout) = self.timeout {
            config.timeout = timeout;
        }
        if let Some(tls) = self.tls_config {
            config.tls = tls;
        }
        if let Some(materials_project) = self.materials_project {
            config.materials_project = materials_project;
        }

        let auth = self.auth.or(AuthContext::from_lookup(&lookup));
        auth.validate()?;

        tracing::debug!(
            host = %config.host,
            port = config.port,
            version = %config.version,
            bearer = auth.has_bearer(),
            "building api client"
        );
        ApiClient::new(config, auth)
    }
}
