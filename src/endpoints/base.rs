//! Envelope handling and authentication headers shared by every endpoint.

use std::sync::Arc;

use parking_lot::RwLock;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::auth::AuthContext;
use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::transport::{Connection, Request};

/// Legacy account id header.
pub const ACCOUNT_ID_HEADER: &str = "X-Account-Id";
/// Legacy auth token header.
pub const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";

/// The status value of a successful envelope.
const SUCCESS: &str = "success";

/// Auth values shared by every endpoint of one client.
pub type SharedAuth = Arc<RwLock<AuthContext>>;

/// A connection plus the auth context, with the envelope convention applied.
///
/// Every platform response is wrapped as `{"status": ..., "data": ...}`.
/// [`request`](BaseEndpoint::request) returns `data` when `status` is
/// `"success"` and fails with [`ErrorKind::Api`](crate::ErrorKind::Api)
/// carrying `data.message` otherwise.
///
/// Cloning is cheap; clones share the connection pool and the auth context.
#[derive(Clone)]
pub struct BaseEndpoint {
    connection: Connection,
    auth: SharedAuth,
}

impl BaseEndpoint {
    /// Creates an endpoint over an existing connection and shared auth context.
    pub fn new(connection: Connection, auth: SharedAuth) -> Self {
        Self { connection, auth }
    }

    /// Creates an endpoint with its own connection and auth context.
    pub fn connect(config: &ApiConfig, auth: AuthContext) -> Result<Self> {
        Ok(Self::new(
            Connection::new(config)?,
            Arc::new(RwLock::new(auth)),
        ))
    }

    /// Returns the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Returns a snapshot of the current auth values.
    pub fn auth(&self) -> AuthContext {
        self.auth.read().clone()
    }

    /// Returns the shared auth handle.
    pub fn shared_auth(&self) -> &SharedAuth {
        &self.auth
    }

    /// Builds the default request headers.
    ///
    /// Legacy `X-Account-Id` / `X-Auth-Token` headers are sent for whichever
    /// values are known. When a bearer token is present,
    /// `Authorization: Bearer <token>` is sent instead and both legacy headers
    /// are dropped.
    pub fn headers(&self) -> Result<HeaderMap> {
        let auth = self.auth.read();
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(ref account_id) = auth.account_id {
            headers.insert(ACCOUNT_ID_HEADER, header_value(account_id, ACCOUNT_ID_HEADER)?);
        }
        if let Some(ref auth_token) = auth.auth_token {
            headers.insert(AUTH_TOKEN_HEADER, header_value(auth_token, AUTH_TOKEN_HEADER)?);
        }

        if let Some(token) = auth.access_token.as_deref().filter(|t| !t.is_empty()) {
            let value = header_value(&format!("Bearer {}", token), "Authorization")?;
            headers.insert(AUTHORIZATION, value);
            headers.remove(ACCOUNT_ID_HEADER);
            headers.remove(AUTH_TOKEN_HEADER);
        }

        Ok(headers)
    }

    /// Sends a request and returns the unwrapped `data`, decoded into `R`.
    ///
    /// Headers already set on `request` take precedence over the defaults from
    /// [`headers`](BaseEndpoint::headers).
    pub async fn request<R>(&self, request: Request) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let data = self.request_data(request).await?;
        serde_json::from_value(data).map_err(|e| {
            Error::invalid_response(format!("Unexpected response data: {}", e)).with_source(e)
        })
    }

    /// Sends a request and returns the unwrapped `data` as raw JSON.
    pub async fn request_data(&self, request: Request) -> Result<Value> {
        let mut headers = self.headers()?;
        for (name, value) in request.header_map() {
            headers.insert(name.clone(), value.clone());
        }
        let body = self.connection.send(request.headers(headers)).await?;
        unwrap_envelope(body)
    }
}

impl std::fmt::Debug for BaseEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BaseEndpoint")
            .field("connection", &self.connection)
            .field("auth", &*self.auth.read())
            .finish()
    }
}

fn header_value(value: &str, name: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|_| Error::configuration(format!("Invalid {} header value", name)))
}

/// Strips the `{status, data}` envelope.
///
/// ```rust
/// use mat3ra_api_client::endpoints::unwrap_envelope;
/// use serde_json::json;
///
/// let data = unwrap_envelope(json!({"status": "success", "data": {}})).unwrap();
/// assert_eq!(data, json!({}));
///
/// let err = unwrap_envelope(json!({"status": "error", "data": {"message": "X"}})).unwrap_err();
/// assert_eq!(err.message(), "X");
/// ```
///
/// # Errors
///
/// - [`Api`](crate::ErrorKind::Api) when `status` is not `"success"`
/// - [`InvalidResponse`](crate::ErrorKind::InvalidResponse) when the body is
///   not an envelope
pub fn unwrap_envelope(body: Value) -> Result<Value> {
    let Value::Object(mut envelope) = body else {
        return Err(Error::invalid_response("Response is not a JSON object"));
    };

    let status = match envelope.get("status") {
        Some(Value::String(status)) => status.clone(),
        Some(other) => other.to_string(),
        None => return Err(Error::invalid_response("Response has no status field")),
    };
    let data = envelope.remove("data").unwrap_or(Value::Null);

    if status == SUCCESS {
        return Ok(data);
    }

    let message = match &data {
        Value::Object(map) => map
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_owned),
        Value::String(message) => Some(message.clone()),
        _ => None,
    }
    .unwrap_or_else(|| format!("Request failed with status {}", status));

    tracing::warn!(status = %status, message = %message, "server reported failure");
    Err(Error::api(message))
}
