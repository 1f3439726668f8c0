//! Credential types for platform authentication.

use std::fmt;
use std::sync::Arc;

/// OIDC bearer token credentials.
///
/// Sent as `Authorization: Bearer <token>`. When present, a bearer token
/// supersedes the legacy account-id/auth-token header pair.
///
/// ## Example
///
/// ```rust
/// use mat3ra_api_client::BearerCredentialsConfig;
///
/// let config = BearerCredentialsConfig::new("eyJhbGciOiJSUzI1NiIs...");
/// assert!(config.token().starts_with("eyJ"));
/// ```
///
/// Bearer tokens are not refreshed by the client. Obtain a new token and
/// build a new client when the current one expires.
#[derive(Clone)]
pub struct BearerCredentialsConfig {
    /// The bearer token.
    token: Arc<str>,
}

impl BearerCredentialsConfig {
    /// Creates a new bearer credentials configuration.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Arc::from(token.into()),
        }
    }

    /// Returns the bearer token.
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for BearerCredentialsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerCredentialsConfig")
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl<S: Into<String>> From<S> for BearerCredentialsConfig {
    fn from(token: S) -> Self {
        Self::new(token)
    }
}

/// Legacy account-id/auth-token credentials.
///
/// Sent as the `X-Account-Id` and `X-Auth-Token` headers. Obtained from the
/// `login` endpoint, see [`LoginEndpoint`](crate::LoginEndpoint).
#[derive(Clone)]
pub struct LegacyCredentialsConfig {
    account_id: String,
    auth_token: Arc<str>,
}

impl LegacyCredentialsConfig {
    /// Creates a new legacy credentials configuration.
    pub fn new(account_id: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            auth_token: Arc::from(auth_token.into()),
        }
    }

    /// Returns the account id.
    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    /// Returns the auth token.
    pub fn auth_token(&self) -> &str {
        &self.auth_token
    }
}

impl fmt::Debug for LegacyCredentialsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LegacyCredentialsConfig")
            .field("account_id", &self.account_id)
            .field("auth_token", &"[REDACTED]")
            .finish()
    }
}

/// A complete credential form.
///
/// - `Bearer`: OIDC access token (preferred)
/// - `Legacy`: account id plus auth token
#[derive(Clone)]
pub enum Credentials {
    /// OIDC bearer token.
    Bearer(BearerCredentialsConfig),

    /// Legacy account-id/auth-token pair.
    Legacy(LegacyCredentialsConfig),
}

impl Credentials {
    /// Returns `true` if this is bearer token authentication.
    pub fn is_bearer(&self) -> bool {
        matches!(self, Credentials::Bearer(_))
    }

    /// Returns the bearer config if applicable.
    pub fn as_bearer(&self) -> Option<&BearerCredentialsConfig> {
        match self {
            Credentials::Bearer(config) => Some(config),
            Credentials::Legacy(_) => None,
        }
    }

    /// Returns the legacy config if applicable.
    pub fn as_legacy(&self) -> Option<&LegacyCredentialsConfig> {
        match self {
            Credentials::Legacy(config) => Some(config),
            Credentials::Bearer(_) => None,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Bearer(config) => f.debug_tuple("Bearer").field(config).finish(),
            Credentials::Legacy(config) => f.debug_tuple("Legacy").field(config).finish(),
        }
    }
}

impl From<BearerCredentialsConfig> for Credentials {
    fn from(config: BearerCredentialsConfig) -> Self {
        Credentials::Bearer(config)
    }
}

impl From<LegacyCredentialsConfig> for Credentials {
    fn from(config: LegacyCredentialsConfig) -> Self {
        Credentials::Legacy(config)
    }
}
