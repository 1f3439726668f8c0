//! Material endpoint: structure imports and tabular flattening.

use std::ops::Deref;

use serde::Deserialize;
use serde_json::{Value, json};

use super::{BaseEndpoint, Capabilities, Entity, EntityEndpoint};
use crate::config::MaterialsProjectConfig;
use crate::error::{Error, Result};
use crate::transport::Request;

/// Resource name of the materials collection.
pub const MATERIALS: &str = "materials";

/// Default structure format for [`MaterialEndpoint::import_from_file`].
pub const DEFAULT_IMPORT_FORMAT: &str = "poscar";

/// Structure record returned by the Materials Project `vasp` endpoint.
#[derive(Debug, Clone, Deserialize)]
struct ExternalStructure {
    material_id: String,
    cif: String,
    #[serde(default)]
    tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ExternalResponse {
    response: Vec<ExternalStructure>,
}

/// The `materials` endpoint.
///
/// Supports the generic CRUD operations, named sets and a default material,
/// plus structure imports.
///
/// ## Example
///
/// ```rust,ignore
/// let materials = client.materials();
///
/// let silicon = materials.get_materials_by_formula("Si").await?;
/// let imported = materials
///     .import_from_file("Si", &poscar, None, "poscar", &["bulk".into()])
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct MaterialEndpoint {
    entity: EntityEndpoint,
    materials_project: MaterialsProjectConfig,
}

impl MaterialEndpoint {
    /// Creates the endpoint.
    pub fn new(base: BaseEndpoint, materials_project: MaterialsProjectConfig) -> Self {
        Self {
            entity: EntityEndpoint::new(
                base,
                MATERIALS,
                Capabilities::CRUD.with_sets().with_default(),
            ),
            materials_project,
        }
    }

    /// Lists materials whose formula equals `formula`.
    pub async fn get_materials_by_formula(&self, formula: &str) -> Result<Vec<Entity>> {
        self.list(json!({ "formula": formula })).await
    }

    /// Imports a structure from file content: `POST materials/import`.
    ///
    /// `format` is either `"poscar"` or `"cif"`.
    pub async fn import_from_file(
        &self,
        name: &str,
        content: &str,
        owner_id: Option<&str>,
        format: &str,
        tags: &[String],
    ) -> Result<Entity> {
        let data = json!({
            "name": name,
            "content": content,
            "format": format,
            "owner._id": owner_id,
            "tags": tags,
        });
        self.base()
            .request(Request::post(self.path(&["import"])).json(data))
            .await
    }

    /// Imports structures from the Materials Project by id.
    ///
    /// Each structure is fetched with `api_key` and re-imported as CIF under
    /// its Materials Project id. Tags accumulate across the batch: every
    /// import carries `tags` plus the tags of all structures fetched so far.
    /// The first failure aborts the batch; materials imported before it stay
    /// on the server.
    pub async fn import_from_materialsproject(
        &self,
        api_key: &str,
        material_ids: &[&str],
        owner_id: Option<&str>,
        tags: &[String],
    ) -> Result<Vec<Entity>> {
        let mut tags = tags.to_vec();
        let mut materials = Vec::with_capacity(material_ids.len());
        for material_id in material_ids {
            let url = self.materials_project.material_url(material_id)?;
            let body = self
                .base()
                .connection()
                .send(Request::get(url.as_str()).param("API_KEY", api_key))
                .await?;
            let response: ExternalResponse = serde_json::from_value(body)?;
            let Some(structure) = response.response.into_iter().next() else {
                return Err(Error::not_found(format!(
                    "Materials Project returned no structure for {}",
                    material_id
                )));
            };
            tags.extend(structure.tags);
            tracing::debug!(material_id = %structure.material_id, "importing external structure");
            materials.push(
                self.import_from_file(&structure.material_id, &structure.cif, owner_id, "cif", &tags)
                    .await?,
            );
        }
        Ok(materials)
    }
}

impl Deref for MaterialEndpoint {
    type Target = EntityEndpoint;

    fn deref(&self) -> &EntityEndpoint {
        &self.entity
    }
}

/// Flattens a material into one table row:
/// `[_id, name, tags, site count, a, b, c, alpha, beta, gamma]`.
///
/// Tags are joined with `", "`.
///
/// # Errors
///
/// Returns [`InvalidArgument`](crate::ErrorKind::InvalidArgument) if a
/// field is missing.
///
/// ```rust
/// use mat3ra_api_client::flatten_material;
/// use serde_json::json;
///
/// let material = json!({
///     "_id": "m1",
///     "name": "Silicon",
///     "tags": ["bulk", "semiconductor"],
///     "basis": {"coordinates": [{"id": 0}, {"id": 1}]},
///     "lattice": {"a": 3.87, "b": 3.87, "c": 3.87, "alpha": 60, "beta": 60, "gamma": 60}
/// });
/// let row = flatten_material(material.as_object().unwrap()).unwrap();
/// assert_eq!(row[2], "bulk, semiconductor");
/// assert_eq!(row[3], 2);
/// ```
pub fn flatten_material(material: &Entity) -> Result<Vec<Value>> {
    let field = |name: &str| {
        material
            .get(name)
            .ok_or_else(|| Error::invalid_argument(format!("Material has no {:?} field", name)))
    };

    let tags = field("tags")?
        .as_array()
        .ok_or_else(|| Error::invalid_argument("Material tags must be a list"))?
        .iter()
        .map(|tag| match tag {
            Value::String(tag) => tag.clone(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ");

    let sites = field("basis")?
        .get("coordinates")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::invalid_argument("Material basis has no coordinates"))?
        .len();

    let lattice = field("lattice")?;
    let mut row = vec![field("_id")?.clone(), field("name")?.clone(), Value::from(tags), Value::from(sites)];
    for parameter in ["a", "b", "c", "alpha", "beta", "gamma"] {
        let value = lattice.get(parameter).ok_or_else(|| {
            Error::invalid_argument(format!("Material lattice has no {:?} parameter", parameter))
        })?;
        row.push(value.clone());
    }
    Ok(row)
}


#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod wiremock_tests {
    use super::*;
    use crate::{ApiConfig, AuthContext};
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_mock_endpoint(server: &MockServer) -> MaterialEndpoint {
        let address = server.address();
        let config = ApiConfig::builder()
            .host(address.ip().to_string())
            .port(address.port())
            .secure(false)
            .build();
        let external = MaterialsProjectConfig::builder()
            .host(format!("http://{}", address.ip()))
            .port(address.port())
            .build();
        MaterialEndpoint::new(
            BaseEndpoint::connect(&config, AuthContext::legacy("acc", "tok")).unwrap(),
            external,
        )
    }

    fn success(data: Value) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({"status": "success", "data": data}))
    }

    #[tokio::test]
    async fn test_get_materials_by_formula() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/2018-10-01/materials"))
            .and(query_param("query", r#"{"formula":"Si"}"#))
            .respond_with(success(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let materials = create_mock_endpoint(&server);
        assert!(materials.get_materials_by_formula("Si").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_import_from_file() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/2018-10-01/materials/import"))
            .and(body_json(json!({
                "name": "Si",
                "content": "POSCAR",
                "format": "poscar",
                "owner._id": "acc",
                "tags": ["bulk"],
            })))
            .respond_with(success(json!({"_id": "m1"})))
            .expect(1)
            .mount(&server)
            .await;

        let materials = create_mock_endpoint(&server);
        let imported = materials
            .import_from_file("Si", "POSCAR", Some("acc"), DEFAULT_IMPORT_FORMAT, &["bulk".to_string()])
            .await
            .unwrap();
        assert_eq!(imported["_id"], "m1");
    }

    #[tokio::test]
    async fn test_import_from_materialsproject_accumulates_tags() {
        let server = MockServer::start().await;

        for (id, tag) in [("mp-1", "first"), ("mp-2", "second")] {
            Mock::given(method("GET"))
                .and(path(format!("/rest/v2/materials/{}/vasp", id)))
                .and(query_param("API_KEY", "key"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "response": [{"material_id": id, "cif": format!("cif-{}", id), "tags": [tag]}]
                })))
                .expect(1)
                .mount(&server)
                .await;
        }
        Mock::given(method("POST"))
            .and(path("/api/2018-10-01/materials/import"))
            .and(body_json(json!({
                "name": "mp-1",
                "content": "cif-mp-1",
                "format": "cif",
                "owner._id": null,
                "tags": ["user", "first"],
            })))
            .respond_with(success(json!({"_id": "m1"})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/2018-10-01/materials/import"))
            .and(body_json(json!({
                "name": "mp-2",
                "content": "cif-mp-2",
                "format": "cif",
                "owner._id": null,
                "tags": ["user", "first", "second"],
            })))
            .respond_with(success(json!({"_id": "m2"})))
            .expect(1)
            .mount(&server)
            .await;

        let materials = create_mock_endpoint(&server);
        let imported = materials
            .import_from_materialsproject("key", &["mp-1", "mp-2"], None, &["user".to_string()])
            .await
            .unwrap();
        assert_eq!(imported.len(), 2);
        assert_eq!(imported[1]["_id"], "m2");
    }
}
