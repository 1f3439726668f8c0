//! Platform connection settings.

use std::time::Duration;

use url::Url;

use super::{API_HOST_ENV, API_PORT_ENV, API_SECURE_ENV, API_VERSION_ENV, TlsConfig};
use crate::error::{Error, Result};

/// Default platform host.
pub const DEFAULT_HOST: &str = "platform-new.mat3ra.com";
/// Default platform port.
pub const DEFAULT_PORT: u16 = 443;
/// Default REST API version.
pub const DEFAULT_VERSION: &str = "2018-10-01";
/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
/// Default timeout for the current-user lookup.
pub const DEFAULT_IDENTITY_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for the platform REST API.
///
/// ## Default Values
///
/// - `host`: `platform-new.mat3ra.com`
/// - `port`: 443
/// - `version`: `2018-10-01`
/// - `secure`: `true`
/// - `timeout`: 60s
/// - `identity_timeout`: 30s
///
/// ## Example
///
/// ```rust
/// use mat3ra_api_client::ApiConfig;
/// use std::time::Duration;
///
/// let config = ApiConfig::builder()
///     .host("localhost")
///     .port(3000)
///     .secure(false)
///     .timeout(Duration::from_secs(10))
///     .build();
///
/// assert_eq!(
///     config.base_url().unwrap().as_str(),
///     "http://localhost:3000/api/2018-10-01/"
/// );
/// ```
#[derive(Debug, Clone, bon::Builder)]
pub struct ApiConfig {
    /// Platform hostname, without scheme.
    #[builder(into, default = DEFAULT_HOST.to_string())]
    pub host: String,

    /// Platform port.
    #[builder(default = DEFAULT_PORT)]
    pub port: u16,

    /// REST API version segment.
    #[builder(into, default = DEFAULT_VERSION.to_string())]
    pub version: String,

    /// Use https when `true`, plain http otherwise.
    #[builder(default = true)]
    pub secure: bool,

    /// Timeout applied to each request.
    #[builder(default = DEFAULT_TIMEOUT)]
    pub timeout: Duration,

    /// Timeout applied to the current-user lookup.
    #[builder(default = DEFAULT_IDENTITY_TIMEOUT)]
    pub identity_timeout: Duration,

    /// TLS settings.
    #[builder(default)]
    pub tls: TlsConfig,

    /// Where to fetch third-party structures from.
    #[builder(default)]
    pub materials_project: MaterialsProjectConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ApiConfig {
    /// Reads the configuration from the process environment.
    ///
    /// Unset variables fall back to the defaults. See [`ApiConfig::from_lookup`].
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through an arbitrary key lookup.
    ///
    /// Consults `API_HOST`, `API_PORT`, `API_VERSION` and `API_SECURE`.
    /// Empty values count as unset.
    ///
    /// # Errors
    ///
    /// Returns a [`Configuration`](crate::ErrorKind::Configuration) error if
    /// the port is not a number or the secure flag is not a boolean.
    ///
    /// ```rust
    /// use mat3ra_api_client::ApiConfig;
    ///
    /// let config = ApiConfig::from_lookup(|key| match key {
    ///     "API_HOST" => Some("localhost".to_string()),
    ///     "API_SECURE" => Some("false".to_string()),
    ///     _ => None,
    /// })
    /// .unwrap();
    ///
    /// assert_eq!(config.host, "localhost");
    /// assert_eq!(config.port, 443);
    /// assert!(!config.secure);
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let mut config = Self::default();
        if let Some(host) = get(API_HOST_ENV) {
            config.host = host;
        }
        if let Some(port) = get(API_PORT_ENV) {
            config.port = port.trim().parse().map_err(|_| {
                Error::configuration(format!("{} must be a port number, got {:?}", API_PORT_ENV, port))
            })?;
        }
        if let Some(version) = get(API_VERSION_ENV) {
            config.version = version;
        }
        if let Some(secure) = get(API_SECURE_ENV) {
            config.secure = parse_bool(&secure).ok_or_else(|| {
                Error::configuration(format!("{} must be a boolean, got {:?}", API_SECURE_ENV, secure))
            })?;
        }
        Ok(config)
    }

    /// Returns `"https"` or `"http"`.
    pub fn scheme(&self) -> &'static str {
        if self.secure { "https" } else { "http" }
    }

    /// Returns the versioned API root, `{scheme}://{host}:{port}/api/{version}/`.
    ///
    /// Resource paths are joined onto this URL.
    pub fn base_url(&self) -> Result<Url> {
        let raw = format!(
            "{}://{}:{}/api/{}/",
            self.scheme(),
            self.host,
            self.port,
            self.version
        );
        Ok(Url::parse(&raw)?)
    }

    /// Returns the current-user endpoint, `{scheme}://{host}[:{port}]/api/v1/users/me`.
    ///
    /// The port is omitted when it is 80 or 443.
    pub fn identity_url(&self) -> Result<Url> {
        let port = match self.port {
            80 | 443 => String::new(),
            port => format!(":{}", port),
        };
        let raw = format!("{}://{}{}/api/v1/users/me", self.scheme(), self.host, port);
        Ok(Url::parse(&raw)?)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "t" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "f" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}

/// Location of the Materials Project REST API used by structure imports.
#[derive(Debug, Clone, bon::Builder)]
pub struct MaterialsProjectConfig {
    /// Host including scheme.
    #[builder(into, default = "https://www.materialsproject.org".to_string())]
    pub host: String,

    /// Port.
    #[builder(default = 443)]
    pub port: u16,

    /// REST API version segment.
    #[builder(into, default = "v2".to_string())]
    pub version: String,
}

impl Default for MaterialsProjectConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl MaterialsProjectConfig {
    /// Returns the URL of the VASP-ready structure for `material_id`.
    pub fn material_url(&self, material_id: &str) -> Result<Url> {
        let root = Url::parse(&format!("{}:{}", self.host, self.port))?;
        let path = format!(
            "rest/{}/materials/{}/vasp",
            self.version,
            urlencoding::encode(material_id)
        );
        Ok(root.join(&path)?)
    }
}
