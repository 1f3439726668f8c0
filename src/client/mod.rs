//! The platform client.
//!
//! [`ApiClient`] resolves configuration and credentials once, then hands out
//! one endpoint per resource collection. All endpoints share a connection
//! pool and the auth values, so an account id resolved through
//! [`ApiClient::account`] is visible to every later request.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mat3ra_api_client::ApiClient;
//!
//! // OIDC_ACCESS_TOKEN, or ACCOUNT_ID and AUTH_TOKEN, from the environment
//! let client = ApiClient::authenticate()?;
//!
//! let owner = client.account().id().await?;
//! let project = client.default_project(&owner).await?;
//! let silicon = client.materials().get_materials_by_formula("Si").await?;
//! ```

mod account;
mod builder;
mod inner;

pub use account::{Account, AccountEntity};
pub use builder::ApiClientBuilder;

use std::sync::Arc;

use crate::auth::AuthContext;
use crate::config::ApiConfig;
use crate::endpoints::{
    BankEndpoint, BaseEndpoint, ChargeEndpoint, CharacteristicEndpoint, ClusterEndpoint, Entity,
    JobEndpoint, MaterialEndpoint, ProjectEndpoint, PropertiesEndpoint, PseudoEndpoint,
    WorkflowEndpoint,
};
use crate::error::Result;

/// The platform API client.
///
/// ## Thread Safety
///
/// `ApiClient` is `Clone`, `Send` and `Sync`. Clones share the connection
/// pool, the auth values and the cached account.
///
/// ## Example
///
/// ```rust,ignore
/// use mat3ra_api_client::{ApiClient, ListQuery};
///
/// let client = ApiClient::builder()
///     .host("localhost")
///     .port(3000)
///     .secure(false)
///     .credentials(LegacyCredentialsConfig::new(account_id, auth_token))
///     .build()?;
///
/// let client2 = client.clone();
/// tokio::spawn(async move {
///     let jobs = client2.jobs().list(ListQuery::all()).await;
/// });
/// ```
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<inner::ClientInner>,
}

impl ApiClient {
    /// Creates a new client builder.
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::new()
    }

    /// Builds a client entirely from the environment and defaults.
    ///
    /// # Errors
    ///
    /// See [`ApiClientBuilder::build`].
    pub fn authenticate() -> Result<Self> {
        Self::builder().build()
    }

    /// Creates a client from a resolved configuration and auth values.
    ///
    /// The auth values are used as-is; see [`AuthContext::validate`].
    pub fn new(config: ApiConfig, auth: AuthContext) -> Result<Self> {
        Ok(Self {
            inner: Arc::new(inner::ClientInner::new(config, auth)?),
        })
    }

    /// Returns the resolved configuration.
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// Returns a snapshot of the current auth values.
    pub fn auth(&self) -> AuthContext {
        self.inner.base.auth()
    }

    /// Returns the base endpoint, for requests no typed endpoint covers.
    pub fn base(&self) -> &BaseEndpoint {
        &self.inner.base
    }

    /// Returns the caller's account.
    pub fn account(&self) -> &Account {
        &self.inner.account
    }

    /// Returns the `materials` endpoint.
    pub fn materials(&self) -> &MaterialEndpoint {
        &self.inner.materials
    }

    /// Returns the `workflows` endpoint.
    pub fn workflows(&self) -> &WorkflowEndpoint {
        &self.inner.workflows
    }

    /// Returns the `jobs` endpoint.
    pub fn jobs(&self) -> &JobEndpoint {
        &self.inner.jobs
    }

    /// Returns the `projects` endpoint.
    pub fn projects(&self) -> &ProjectEndpoint {
        &self.inner.projects
    }

    /// Returns the `properties` endpoint.
    pub fn properties(&self) -> &PropertiesEndpoint {
        &self.inner.properties
    }

    /// Returns the `metaproperties` endpoint.
    pub fn metaproperties(&self) -> &PropertiesEndpoint {
        &self.inner.metaproperties
    }

    /// Returns the `raw-properties` endpoint.
    pub fn raw_properties(&self) -> &PropertiesEndpoint {
        &self.inner.raw_properties
    }

    /// Returns the `refined-properties` endpoint.
    pub fn refined_properties(&self) -> &PropertiesEndpoint {
        &self.inner.refined_properties
    }

    /// Returns the `bank-materials` endpoint.
    pub fn bank_materials(&self) -> &BankEndpoint {
        &self.inner.bank_materials
    }

    /// Returns the `bank-workflows` endpoint.
    pub fn bank_workflows(&self) -> &BankEndpoint {
        &self.inner.bank_workflows
    }

    /// Returns the `characteristic` endpoint.
    pub fn characteristics(&self) -> &CharacteristicEndpoint {
        &self.inner.characteristics
    }

    /// Returns the `pseudos` endpoint.
    pub fn pseudos(&self) -> &PseudoEndpoint {
        &self.inner.pseudos
    }

    /// Returns the clusters endpoint.
    pub fn clusters(&self) -> &ClusterEndpoint {
        &self.inner.clusters
    }

    /// Returns the `charges` endpoint.
    pub fn charges(&self) -> &ChargeEndpoint {
        &self.inner.charges
    }

    /// Returns the user's organization account: the default one, else the
    /// first, else `None`.
    ///
    /// # Errors
    ///
    /// Requires a bearer token.
    pub async fn my_organization(&self) -> Result<Option<AccountEntity>> {
        self.inner.account.organization().await
    }

    /// Returns the default project of `owner_id`.
    ///
    /// # Errors
    ///
    /// Returns [`NotFound`](crate::ErrorKind::NotFound) if there is none.
    pub async fn default_project(&self, owner_id: &str) -> Result<Entity> {
        self.inner.projects.default_project(owner_id).await
    }

    /// Revokes the legacy auth token.
    pub async fn logout(&self) -> Result<()> {
        self.inner.logout.logout().await
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base.connection().base_url().as_str())
            .finish_non_exhaustive()
    }
}
