//! Username/password login and token revocation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::BaseEndpoint;
use crate::auth::AuthContext;
use crate::config::ApiConfig;
use crate::error::Result;
use crate::transport::Request;

/// Resource name of the login action.
pub const LOGIN: &str = "login";
/// Resource name of the logout action.
pub const LOGOUT: &str = "logout";

/// Token pair issued by a successful login.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// API token for the `X-Auth-Token` header.
    #[serde(rename = "X-Auth-Token")]
    pub auth_token: String,
    /// Account id for the `X-Account-Id` header.
    #[serde(rename = "X-Account-Id")]
    pub account_id: String,
}

impl LoginResponse {
    /// Converts into legacy auth values.
    pub fn into_auth(self) -> AuthContext {
        AuthContext::legacy(self.account_id, self.auth_token)
    }
}

impl std::fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginResponse")
            .field("auth_token", &"[REDACTED]")
            .field("account_id", &self.account_id)
            .finish()
    }
}

/// `POST login` with form-encoded credentials.
#[derive(Debug, Clone)]
pub struct LoginEndpoint {
    base: BaseEndpoint,
}

impl LoginEndpoint {
    /// Creates an unauthenticated login endpoint.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        Ok(Self {
            base: BaseEndpoint::connect(config, AuthContext::default())?,
        })
    }

    /// Logs in and returns a fresh token pair.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        let response: LoginResponse = self
            .base
            .request(Request::post(LOGIN).form([("username", username), ("password", password)]))
            .await?;
        tracing::info!(account_id = %response.account_id, "logged in");
        Ok(response)
    }

    /// Logs in and returns the config and auth values for further calls.
    ///
    /// ```rust,ignore
    /// let (config, auth) = LoginEndpoint::endpoint_options(ApiConfig::default(), "user", "pass").await?;
    /// let client = ApiClient::builder().config(config).auth(auth).build()?;
    /// ```
    pub async fn endpoint_options(
        config: ApiConfig,
        username: &str,
        password: &str,
    ) -> Result<(ApiConfig, AuthContext)> {
        let response = Self::new(&config)?.login(username, password).await?;
        Ok((config, response.into_auth()))
    }
}

/// `POST logout`: revokes the current token.
#[derive(Debug, Clone)]
pub struct LogoutEndpoint {
    base: BaseEndpoint,
}

impl LogoutEndpoint {
    /// Creates the endpoint.
    pub fn new(base: BaseEndpoint) -> Self {
        Self { base }
    }

    /// Revokes the token the endpoint authenticates with.
    pub async fn logout(&self) -> Result<()> {
        let _: Value = self.base.request(Request::post(LOGOUT)).await?;
        Ok(())
    }
}


#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod wiremock_tests {
    use super::*;
    use crate::ErrorKind;
    use crate::endpoints::AUTH_TOKEN_HEADER;
    use serde_json::json;
    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> ApiConfig {
        let address = server.address();
        ApiConfig::builder()
            .host(address.ip().to_string())
            .port(address.port())
            .secure(false)
            .build()
    }

    #[tokio::test]
    async fn test_endpoint_options() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/2018-10-01/login"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string("username=user&password=p%40ss"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "data": {"X-Auth-Token": "tok", "X-Account-Id": "acc"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let (config, auth) = LoginEndpoint::endpoint_options(config_for(&server), "user", "p@ss")
            .await
            .unwrap();
        assert!(!config.secure);
        assert_eq!(auth.account_id.as_deref(), Some("acc"));
        assert_eq!(auth.auth_token.as_deref(), Some("tok"));
    }

    #[tokio::test]
    async fn test_login_rejected() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/2018-10-01/login"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let login = LoginEndpoint::new(&config_for(&server)).unwrap();
        let err = login.login("user", "wrong").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
        assert_eq!(err.status(), Some(401));
    }

    #[tokio::test]
    async fn test_logout_sends_token() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/2018-10-01/logout"))
            .and(header(AUTH_TOKEN_HEADER, "tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "success"})))
            .expect(1)
            .mount(&server)
            .await;

        let base = BaseEndpoint::connect(&config_for(&server), AuthContext::legacy("acc", "tok")).unwrap();
        LogoutEndpoint::new(base).logout().await.unwrap();
    }
}
