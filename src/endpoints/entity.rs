//! Generic CRUD over a named resource collection.

use serde_json::{Map, Value, json};

use super::capabilities::{self, Capabilities, Capability};
use super::{BaseEndpoint, Entity};
use crate::error::{Error, Result};
use crate::transport::Request;

/// Filter and projection for [`EntityEndpoint::list`].
///
/// Both are Mongo-style JSON objects passed to the server verbatim as the
/// `query` and `projection` parameters. The empty object matches everything
/// and returns all fields.
///
/// ```rust
/// use mat3ra_api_client::ListQuery;
/// use serde_json::json;
///
/// let query = ListQuery::from(json!({"formula": "Si"}))
///     .with_projection(json!({"name": 1}));
/// let params = query.to_params();
/// assert_eq!(params[0], ("query".to_string(), r#"{"formula":"Si"}"#.to_string()));
/// assert_eq!(params[1], ("projection".to_string(), r#"{"name":1}"#.to_string()));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    query: Value,
    projection: Value,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            query: Value::Object(Map::new()),
            projection: Value::Object(Map::new()),
        }
    }
}

impl ListQuery {
    /// Matches every entity.
    pub fn all() -> Self {
        Self::default()
    }

    /// Sets the projection.
    #[must_use]
    pub fn with_projection(mut self, projection: Value) -> Self {
        self.projection = projection;
        self
    }

    /// Returns the filter.
    pub fn query(&self) -> &Value {
        &self.query
    }

    /// Returns the projection.
    pub fn projection(&self) -> &Value {
        &self.projection
    }

    /// Serializes into request parameters.
    pub fn to_params(&self) -> Vec<(String, String)> {
        vec![
            ("query".to_string(), self.query.to_string()),
            ("projection".to_string(), self.projection.to_string()),
        ]
    }
}

impl From<Value> for ListQuery {
    fn from(query: Value) -> Self {
        Self {
            query,
            ..Self::default()
        }
    }
}

/// CRUD surface over one resource collection, such as `materials` or `jobs`.
///
/// The resource name is the URL segment every path starts with and never
/// changes after construction. Operations not enabled by the endpoint's
/// [`Capabilities`] fail with [`Unsupported`](crate::ErrorKind::Unsupported)
/// before any request is sent.
///
/// ## Example
///
/// ```rust,ignore
/// let workflows = client.workflows();
///
/// let all = workflows.list(ListQuery::all()).await?;
/// let one = workflows.get(&id).await?;
/// let renamed = workflows.update(&id, json!({"name": "Relax"}), &[]).await?;
/// workflows.delete(&id).await?;
/// ```
#[derive(Clone)]
pub struct EntityEndpoint {
    base: BaseEndpoint,
    name: String,
    capabilities: Capabilities,
}

impl EntityEndpoint {
    /// Creates an endpoint for the resource `name`.
    pub fn new(base: BaseEndpoint, name: impl Into<String>, capabilities: Capabilities) -> Self {
        Self {
            base,
            name: name.into(),
            capabilities,
        }
    }

    /// Returns the resource name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the enabled operation families.
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Returns the underlying base endpoint.
    pub fn base(&self) -> &BaseEndpoint {
        &self.base
    }

    /// Builds `{name}/{segment}/...`, percent-encoding each segment.
    pub fn path(&self, segments: &[&str]) -> String {
        let mut path = self.name.clone();
        for segment in segments {
            path.push('/');
            path.push_str(&urlencoding::encode(segment));
        }
        path
    }

    pub(crate) fn require(&self, capability: Capability) -> Result<()> {
        self.capabilities.require(capability, &self.name)
    }

    /// Lists entities matching `query`: `GET {name}`.
    pub async fn list(&self, query: impl Into<ListQuery>) -> Result<Vec<Entity>> {
        let query = query.into();
        self.base
            .request(Request::get(self.path(&[])).params(query.to_params()))
            .await
    }

    /// Fetches one entity: `GET {name}/{id}`.
    pub async fn get(&self, id: &str) -> Result<Entity> {
        self.base.request(Request::get(self.path(&[id]))).await
    }

    /// Creates an entity: `PUT {name}/create`.
    ///
    /// A non-empty `owner_id` is injected as `config.owner = {"_id": owner_id}`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument`](crate::ErrorKind::InvalidArgument) if an
    /// owner is given and `config` is not a JSON object.
    pub async fn create(&self, config: Value, owner_id: Option<&str>) -> Result<Entity> {
        self.require(Capability::Create)?;
        let config = with_owner(config, owner_id)?;
        self.base
            .request(Request::put(self.path(&["create"])).json(config))
            .await
    }

    /// Applies a partial update: `PATCH {name}/{id}`.
    pub async fn update(&self, id: &str, modifier: Value, params: &[(&str, &str)]) -> Result<Entity> {
        self.require(Capability::Update)?;
        self.base
            .request(
                Request::patch(self.path(&[id]))
                    .params(params.iter().copied())
                    .json(modifier),
            )
            .await
    }

    /// Deletes an entity: `DELETE {name}/{id}`.
    ///
    /// Returns the deleted entity when the server echoes it. Repeated deletes
    /// behave however the server treats them.
    pub async fn delete(&self, id: &str) -> Result<Option<Entity>> {
        self.require(Capability::Delete)?;
        self.base.request(Request::delete(self.path(&[id]))).await
    }

    /// Copies an entity within the caller's account: `POST {name}/{id}/copy`.
    pub async fn copy(&self, id: &str) -> Result<Entity> {
        self.require(Capability::Copy)?;
        self.base
            .request(Request::post(self.path(&[id, "copy"])))
            .await
    }

    /// Creates a named set. See [`capabilities::create_set`].
    pub async fn create_set(&self, config: Value) -> Result<Entity> {
        capabilities::create_set(self, config).await
    }

    /// Moves an entity between sets. See [`capabilities::move_to_set`].
    pub async fn move_to_set(&self, id: &str, old_set_id: &str, new_set_id: &str) -> Result<Value> {
        capabilities::move_to_set(self, id, old_set_id, new_set_id).await
    }

    /// Marks an entity as the default. See [`capabilities::set_default`].
    pub async fn set_default(&self, id: &str) -> Result<Value> {
        capabilities::set_default(self, id).await
    }
}

impl std::fmt::Debug for EntityEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityEndpoint")
            .field("name", &self.name)
            .field("capabilities", &self.capabilities)
            .finish_non_exhaustive()
    }
}

fn with_owner(mut config: Value, owner_id: Option<&str>) -> Result<Value> {
    let Some(owner_id) = owner_id.filter(|id| !id.is_empty()) else {
        return Ok(config);
    };
    let Some(object) = config.as_object_mut() else {
        return Err(Error::invalid_argument("Entity config must be a JSON object"));
    };
    object.insert("owner".to_string(), json!({"_id": owner_id}));
    Ok(config)
}
