//! Authentication context shared by every endpoint of a client.

use std::fmt;

use super::{BearerCredentialsConfig, Credentials, LegacyCredentialsConfig};
use crate::config::{ACCESS_TOKEN_ENV, ACCOUNT_ID_ENV, AUTH_TOKEN_ENV};
use crate::error::{Error, Result};

/// The raw authentication values known to a client.
///
/// An `AuthContext` is valid when it carries a bearer token, or both an
/// account id and an auth token. It may carry both forms at once; the bearer
/// token then takes priority on the wire, and the account id is still used as
/// the default owner of new entities.
///
/// ```rust
/// use mat3ra_api_client::AuthContext;
///
/// let auth = AuthContext::legacy("acc_1", "tok");
/// assert!(auth.validate().is_ok());
/// assert!(AuthContext::default().validate().is_err());
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AuthContext {
    /// OIDC bearer token.
    pub access_token: Option<String>,
    /// Account id, either configured or resolved from the current user.
    pub account_id: Option<String>,
    /// Legacy auth token.
    pub auth_token: Option<String>,
}

impl AuthContext {
    /// Creates a context holding only a bearer token.
    pub fn bearer(access_token: impl Into<String>) -> Self {
        Self {
            access_token: Some(access_token.into()),
            ..Self::default()
        }
    }

    /// Creates a context holding a legacy account-id/auth-token pair.
    pub fn legacy(account_id: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            account_id: Some(account_id.into()),
            auth_token: Some(auth_token.into()),
            ..Self::default()
        }
    }

    /// Reads `OIDC_ACCESS_TOKEN`, `ACCOUNT_ID` and `AUTH_TOKEN` from the environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the auth values through an arbitrary key lookup.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());
        Self {
            access_token: get(ACCESS_TOKEN_ENV),
            account_id: get(ACCOUNT_ID_ENV),
            auth_token: get(AUTH_TOKEN_ENV),
        }
    }

    /// Fills every unset field from `fallback`.
    #[must_use]
    pub fn or(self, fallback: AuthContext) -> Self {
        Self {
            access_token: self.access_token.or(fallback.access_token),
            account_id: self.account_id.or(fallback.account_id),
            auth_token: self.auth_token.or(fallback.auth_token),
        }
    }

    /// Returns `true` if a bearer token is present.
    pub fn has_bearer(&self) -> bool {
        non_empty(&self.access_token).is_some()
    }

    /// Checks that at least one complete credential form is present.
    ///
    /// # Errors
    ///
    /// Returns a [`Configuration`](crate::ErrorKind::Configuration) error
    /// otherwise.
    pub fn validate(&self) -> Result<()> {
        match self.credentials() {
            Some(_) => Ok(()),
            None => Err(Error::configuration(
                "Missing auth. Provide OIDC_ACCESS_TOKEN or ACCOUNT_ID and AUTH_TOKEN.",
            )),
        }
    }

    /// Returns the preferred complete credential form, bearer first.
    pub fn credentials(&self) -> Option<Credentials> {
        if let Some(token) = non_empty(&self.access_token) {
            return Some(BearerCredentialsConfig::new(token).into());
        }
        match (non_empty(&self.account_id), non_empty(&self.auth_token)) {
            (Some(account_id), Some(auth_token)) => {
                Some(LegacyCredentialsConfig::new(account_id, auth_token).into())
            }
            _ => None,
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "[REDACTED]");
        f.debug_struct("AuthContext")
            .field("access_token", &redact(&self.access_token))
            .field("account_id", &self.account_id)
            .field("auth_token", &redact(&self.auth_token))
            .finish()
    }
}
