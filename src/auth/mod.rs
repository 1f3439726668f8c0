//! Authentication and credentials for the platform API.
//!
//! The platform accepts two credential forms:
//!
//! - [`BearerCredentialsConfig`]: OIDC access token, sent as
//!   `Authorization: Bearer <token>`
//! - [`LegacyCredentialsConfig`]: account id plus auth token, sent as
//!   `X-Account-Id` / `X-Auth-Token`
//!
//! [`AuthContext`] holds whatever values were supplied and picks the preferred
//! complete form. A bearer token always wins.
//!
//! ## Bearer Token
//!
//! ```rust,ignore
//! use mat3ra_api_client::{ApiClient, BearerCredentialsConfig};
//!
//! let client = ApiClient::builder()
//!     .credentials(BearerCredentialsConfig::new("eyJhbGciOi..."))
//!     .build()?;
//! ```
//!
//! ## Legacy Token Pair
//!
//! ```rust,ignore
//! let login = LoginEndpoint::new(&ApiConfig::default())?;
//! let tokens = login.login("user", "password").await?;
//!
//! let client = ApiClient::builder()
//!     .credentials(LegacyCredentialsConfig::new(tokens.account_id, tokens.auth_token))
//!     .build()?;
//! ```

mod context;
mod credentials;

pub use context::AuthContext;
pub use credentials::{BearerCredentialsConfig, Credentials, LegacyCredentialsConfig};
