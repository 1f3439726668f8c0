//! HTTP connection to the platform REST API.

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::Value;
use url::Url;

use super::{Body, Request};
use crate::config::{ApiConfig, TlsConfig};
use crate::error::{Error, ErrorKind, Result};
use crate::user_agent;

/// Maximum number of response body bytes echoed into logs.
const LOGGED_BODY_LIMIT: usize = 512;

/// A pooled HTTP connection bound to one platform API root.
///
/// Each call to [`send`](Connection::send) issues exactly one request: no
/// retries, no caching. Non-2xx responses become errors carrying the status
/// code and a remediation hint; 2xx bodies are decoded as JSON.
///
/// `Connection` is cheap to clone. Clones share the underlying connection pool,
/// which is released when the last clone is dropped.
///
/// ## Example
///
/// ```rust,ignore
/// use mat3ra_api_client::{ApiConfig, transport::{Connection, Request}};
///
/// let connection = Connection::new(&ApiConfig::default())?;
/// let body = connection.send(Request::get("materials")).await?;
/// ```
#[derive(Clone)]
pub struct Connection {
    http: reqwest::Client,
    base_url: Url,
    timeout: Duration,
}

impl Connection {
    /// Creates a connection for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`Configuration`](ErrorKind::Configuration) error if the base
    /// URL is invalid, a CA certificate cannot be loaded, or the HTTP client
    /// cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base_url = config.base_url()?;
        let http = build_http_client(&config.tls, config.timeout)?;
        Ok(Self {
            http,
            base_url,
            timeout: config.timeout,
        })
    }

    /// Returns the API root every relative path is joined onto.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the default request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Resolves a relative resource path or absolute URL.
    pub fn url_for(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| Error::configuration(format!("Invalid URL path {:?}: {}", path, e)).with_source(e))
    }

    /// Sends a request and returns the decoded JSON body.
    ///
    /// An empty 2xx body decodes to [`Value::Null`].
    ///
    /// # Errors
    ///
    /// - HTTP errors: kind from the status code, see
    ///   [`Error::http_status`]
    /// - [`Timeout`](ErrorKind::Timeout) / [`Connection`](ErrorKind::Connection)
    ///   for network failures
    /// - [`InvalidResponse`](ErrorKind::InvalidResponse) for non-JSON bodies
    pub async fn send(&self, request: Request) -> Result<Value> {
        let parts = request.into_parts();
        let mut url = self.url_for(&parts.path)?;
        if !parts.params.is_empty() {
            url.query_pairs_mut().extend_pairs(parts.params.iter());
        }

        let mut headers = parts.headers;
        if !headers.contains_key(ACCEPT) {
            headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        }

        tracing::debug!(method = %parts.method, url = %url, "sending request");

        let mut builder = self
            .http
            .request(parts.method.clone(), url.clone())
            .timeout(parts.timeout.unwrap_or(self.timeout));

        builder = match parts.body {
            Body::Empty => builder.headers(headers),
            Body::Json(value) => {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
                builder.headers(headers).body(serde_json::to_vec(&value)?)
            }
            Body::Form(fields) => {
                headers.insert(
                    CONTENT_TYPE,
                    HeaderValue::from_static("application/x-www-form-urlencoded"),
                );
                let encoded = url::form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(fields.iter())
                    .finish();
                builder.headers(headers).body(encoded)
            }
        };

        let response = builder.send().await.map_err(|e| {
            tracing::warn!(method = %parts.method, url = %url, error = %e, "request failed");
            Error::from(e)
        })?;

        handle_response(&parts.method, &url, response).await
    }
}

async fn handle_response(
    method: &reqwest::Method,
    url: &Url,
    response: reqwest::Response,
) -> Result<Value> {
    let status = response.status();
    let bytes = response.bytes().await?;

    if !status.is_success() {
        let body = String::from_utf8_lossy(&bytes);
        let body: String = body.chars().take(LOGGED_BODY_LIMIT).collect();
        tracing::warn!(
            method = %method,
            url = %url,
            status = status.as_u16(),
            body = %body,
            "request returned error status"
        );
        return Err(Error::http_status(status.as_u16()));
    }

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }

    serde_json::from_slice(&bytes).map_err(|e| {
        Error::new(
            ErrorKind::InvalidResponse,
            format!("Failed to parse response from {}: {}", url, e),
        )
        .with_source(e)
    })
}

fn build_http_client(tls: &TlsConfig, timeout: Duration) -> Result<reqwest::Client> {
    let mut client_builder = reqwest::Client::builder()
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .user_agent(user_agent::user_agent());

    // Self-signed certificates on local platform instances
    if tls.skip_verification {
        client_builder = client_builder.danger_accept_invalid_certs(true);
    }

    if let Some(ref ca_cert_file) = tls.ca_cert_file {
        let cert_pem = std::fs::read(ca_cert_file).map_err(|e| {
            Error::configuration(format!(
                "Failed to read certificate {:?}: {}",
                ca_cert_file, e
            ))
        })?;
        let cert = reqwest::Certificate::from_pem(&cert_pem).map_err(|e| {
            Error::configuration(format!("Invalid certificate {:?}: {}", ca_cert_file, e))
        })?;
        client_builder = client_builder.add_root_certificate(cert);
    }

    if let Some(ref ca_cert_pem) = tls.ca_cert_pem {
        let cert = reqwest::Certificate::from_pem(ca_cert_pem.as_bytes())
            .map_err(|e| Error::configuration(format!("Invalid CA certificate PEM: {}", e)))?;
        client_builder = client_builder.add_root_certificate(cert);
    }

    client_builder
        .build()
        .map_err(|e| Error::configuration(format!("Failed to create HTTP client: {}", e)))
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// Builds the header map for a request from `(name, value)` pairs.
///
/// # Errors
///
/// Returns an [`InvalidArgument`](ErrorKind::InvalidArgument) error if a
/// value contains characters not allowed in HTTP headers.
pub fn header_map<'a, I>(pairs: I) -> Result<HeaderMap>
where
    I: IntoIterator<Item = (&'static str, &'a str)>,
{
    let mut headers = HeaderMap::new();
    for (name, value) in pairs {
        let value = HeaderValue::from_str(value).map_err(|_| {
            Error::invalid_argument(format!("Invalid value for header {}", name))
        })?;
        headers.insert(name, value);
    }
    Ok(headers)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn connection() -> Connection {
        let config = ApiConfig::builder()
            .host("localhost")
            .port(3000)
            .secure(false)
            .build();
        Connection::new(&config).unwrap()
    }

    #[test]
    fn test_url_for_relative_path() {
        let url = connection().url_for("jobs/j1/submit").unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/2018-10-01/jobs/j1/submit");
    }

    #[test]
    fn test_url_for_absolute_url() {
        let url = connection()
            .url_for("https://www.materialsproject.org/rest/v2/materials/mp-1/vasp")
            .unwrap();
        assert_eq!(url.host_str(), Some("www.materialsproject.org"));
    }

    #[test]
    fn test_header_map_rejects_invalid_values() {
        let err = header_map([("X-Auth-Token", "bad\nvalue")]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_debug_shows_base_url() {
        let debug = format!("{:?}", connection());
        assert!(debug.contains("localhost:3000"));
    }
}
