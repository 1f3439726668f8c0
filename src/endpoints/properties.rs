//! Property endpoints: lookup by job, unit and property name.

use std::ops::Deref;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use super::{BaseEndpoint, Capabilities, Entity, EntityEndpoint};
use crate::error::{Error, Result};

/// Resource name of the properties collection.
pub const PROPERTIES: &str = "properties";
/// Resource name of the metaproperties collection.
pub const METAPROPERTIES: &str = "metaproperties";
/// Resource name of the raw properties collection.
pub const RAW_PROPERTIES: &str = "raw-properties";
/// Resource name of the refined properties collection.
pub const REFINED_PROPERTIES: &str = "refined-properties";

const JOB_ID: &str = "source.info.jobId";
const UNIT_ID: &str = "source.info.unitId";
const NAME: &str = "data.name";

/// Kind of band gap stored in a `band_gaps` property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandGapType {
    /// Direct gap.
    Direct,
    /// Indirect gap.
    Indirect,
}

impl BandGapType {
    /// Returns the discriminator stored in `data.values[*].type`.
    pub fn as_str(&self) -> &'static str {
        match self {
            BandGapType::Direct => "direct",
            BandGapType::Indirect => "indirect",
        }
    }
}

/// Property names produced by one workflow unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitProperties {
    /// Unit flowchart id.
    pub unit_id: String,
    /// Property names, in the order the server listed them.
    pub properties: Vec<String>,
}

/// Builds the selector matching one property of one unit of one job.
///
/// ```rust
/// use mat3ra_api_client::build_property_selector;
/// use serde_json::json;
///
/// assert_eq!(
///     build_property_selector("j1", "pw-scf", "total_energy"),
///     json!({
///         "source.info.jobId": "j1",
///         "source.info.unitId": "pw-scf",
///         "data.name": "total_energy",
///     })
/// );
/// ```
pub fn build_property_selector(job_id: &str, unit_id: &str, name: &str) -> Value {
    json!({
        JOB_ID: job_id,
        UNIT_ID: unit_id,
        NAME: name,
    })
}

/// Property lookups shared by the properties-like collections.
///
/// `properties` accepts new records but no updates or deletes;
/// `metaproperties` and `refined-properties` are read-only; `raw-properties`
/// is fully writable with sets and a default.
#[derive(Debug, Clone)]
pub struct PropertiesEndpoint {
    entity: EntityEndpoint,
}

impl PropertiesEndpoint {
    /// Creates the `properties` endpoint.
    pub fn new(base: BaseEndpoint) -> Self {
        Self::with_name(
            base,
            PROPERTIES,
            Capabilities::READ_ONLY.with_create().with_copy(),
        )
    }

    /// Creates the `metaproperties` endpoint.
    pub fn metaproperties(base: BaseEndpoint) -> Self {
        Self::with_name(base, METAPROPERTIES, Capabilities::READ_ONLY.with_copy())
    }

    /// Creates the `raw-properties` endpoint.
    pub fn raw(base: BaseEndpoint) -> Self {
        Self::with_name(
            base,
            RAW_PROPERTIES,
            Capabilities::CRUD.with_sets().with_default(),
        )
    }

    /// Creates the `refined-properties` endpoint.
    pub fn refined(base: BaseEndpoint) -> Self {
        Self::with_name(base, REFINED_PROPERTIES, Capabilities::READ_ONLY.with_copy())
    }

    fn with_name(base: BaseEndpoint, name: &str, capabilities: Capabilities) -> Self {
        Self {
            entity: EntityEndpoint::new(base, name, capabilities),
        }
    }

    /// Returns the first property matching the job, unit and name.
    ///
    /// # Errors
    ///
    /// Returns [`NotFound`](crate::ErrorKind::NotFound) if nothing matches.
    pub async fn get_property(&self, job_id: &str, unit_id: &str, name: &str) -> Result<Entity> {
        let selector = build_property_selector(job_id, unit_id, name);
        self.list(selector).await?.into_iter().next().ok_or_else(|| {
            Error::not_found(format!(
                "No {} property for unit {} of job {}",
                name, unit_id, job_id
            ))
        })
    }

    /// Returns the band gap of the given type from the unit's `band_gaps` property.
    pub async fn get_band_gap_by_type(
        &self,
        job_id: &str,
        unit_id: &str,
        gap_type: BandGapType,
    ) -> Result<Value> {
        let property = self.get_property(job_id, unit_id, "band_gaps").await?;
        band_gap_value(&property, gap_type)
    }

    /// Returns the direct band gap.
    pub async fn get_direct_band_gap(&self, job_id: &str, unit_id: &str) -> Result<Value> {
        self.get_band_gap_by_type(job_id, unit_id, BandGapType::Direct)
            .await
    }

    /// Returns the indirect band gap.
    pub async fn get_indirect_band_gap(&self, job_id: &str, unit_id: &str) -> Result<Value> {
        self.get_band_gap_by_type(job_id, unit_id, BandGapType::Indirect)
            .await
    }

    /// Lists the property names of a job, grouped by unit in first-seen order.
    pub async fn list_for_job(&self, job_id: &str) -> Result<Vec<UnitProperties>> {
        let properties = self.list(json!({ JOB_ID: job_id })).await?;
        group_by_unit(&properties)
    }

    /// Returns the `data` of every property of a job, optionally narrowed to
    /// one property name and/or one unit.
    pub async fn get_for_job(
        &self,
        job_id: &str,
        property_name: Option<&str>,
        unit_id: Option<&str>,
    ) -> Result<Vec<Value>> {
        let mut query = Map::new();
        query.insert(JOB_ID.to_string(), json!(job_id));
        if let Some(name) = property_name.filter(|n| !n.is_empty()) {
            query.insert(NAME.to_string(), json!(name));
        }
        if let Some(unit_id) = unit_id.filter(|u| !u.is_empty()) {
            query.insert(UNIT_ID.to_string(), json!(unit_id));
        }
        let properties = self.list(Value::Object(query)).await?;
        Ok(properties
            .into_iter()
            .map(|mut property| property.remove("data").unwrap_or(Value::Null))
            .collect())
    }
}

impl Deref for PropertiesEndpoint {
    type Target = EntityEndpoint;

    fn deref(&self) -> &EntityEndpoint {
        &self.entity
    }
}

fn band_gap_value(property: &Entity, gap_type: BandGapType) -> Result<Value> {
    let values = property
        .get("data")
        .and_then(|data| data.get("values"))
        .and_then(Value::as_array)
        .ok_or_else(|| Error::invalid_response("band_gaps property has no data.values"))?;
    values
        .iter()
        .find(|entry| entry.get("type").and_then(Value::as_str) == Some(gap_type.as_str()))
        .and_then(|entry| entry.get("value"))
        .cloned()
        .ok_or_else(|| Error::not_found(format!("No {} band gap", gap_type.as_str())))
}

fn group_by_unit(properties: &[Entity]) -> Result<Vec<UnitProperties>> {
    let mut units: Vec<UnitProperties> = Vec::new();
    for property in properties {
        let unit_id = property
            .get("source")
            .and_then(|s| s.pointer("/info/unitId"))
            .and_then(Value::as_str)
            .ok_or_else(|| Error::invalid_response("Property has no source.info.unitId"))?;
        let name = property
            .get("data")
            .and_then(|d| d.get("name"))
            .and_then(Value::as_str)
            .ok_or_else(|| Error::invalid_response("Property has no data.name"))?;

        match units.iter_mut().find(|unit| unit.unit_id == unit_id) {
            Some(unit) => unit.properties.push(name.to_string()),
            None => units.push(UnitProperties {
                unit_id: unit_id.to_string(),
                properties: vec![name.to_string()],
            }),
        }
    }
    Ok(units)
}


#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod wiremock_tests {
    use super::*;
    use crate::{ApiConfig, AuthContext, ErrorKind};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn base_for(server: &MockServer) -> BaseEndpoint {
        let address = server.address();
        let config = ApiConfig::builder()
            .host(address.ip().to_string())
            .port(address.port())
            .secure(false)
            .build();
        BaseEndpoint::connect(&config, AuthContext::bearer("t")).unwrap()
    }

    fn success(data: Value) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({"status": "success", "data": data}))
    }

    #[tokio::test]
    async fn test_get_direct_band_gap() {
        let server = MockServer::start().await;

        let selector = build_property_selector("j1", "pw-bands", "band_gaps");
        Mock::given(method("GET"))
            .and(path("/api/2018-10-01/properties"))
            .and(query_param("query", selector.to_string()))
            .respond_with(success(json!([{
                "data": {"name": "band_gaps", "values": [{"type": "direct", "value": 1.1}]}
            }])))
            .expect(1)
            .mount(&server)
            .await;

        let properties = PropertiesEndpoint::new(base_for(&server));
        let gap = properties.get_direct_band_gap("j1", "pw-bands").await.unwrap();
        assert_eq!(gap, json!(1.1));
    }

    #[tokio::test]
    async fn test_get_property_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/2018-10-01/properties"))
            .respond_with(success(json!([])))
            .mount(&server)
            .await;

        let properties = PropertiesEndpoint::new(base_for(&server));
        let err = properties.get_property("j1", "u1", "pressure").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_get_for_job_filters() {
        let server = MockServer::start().await;

        let query = json!({"source.info.jobId": "j1", "data.name": "total_energy"});
        Mock::given(method("GET"))
            .and(path("/api/2018-10-01/properties"))
            .and(query_param("query", query.to_string()))
            .respond_with(success(json!([
                {"data": {"name": "total_energy", "value": -19.0}},
                {"data": {"name": "total_energy", "value": -19.5}}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let properties = PropertiesEndpoint::new(base_for(&server));
        let data = properties.get_for_job("j1", Some("total_energy"), None).await.unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data[1]["value"], json!(-19.5));
    }

    #[tokio::test]
    async fn test_list_for_job_on_refined_properties() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/2018-10-01/refined-properties"))
            .respond_with(success(json!([
                {"source": {"info": {"unitId": "u1"}}, "data": {"name": "pressure"}}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let refined = PropertiesEndpoint::refined(base_for(&server));
        let units = refined.list_for_job("j1").await.unwrap();
        assert_eq!(units[0].unit_id, "u1");
        assert_eq!(refined.delete("p1").await.unwrap_err().kind(), ErrorKind::Unsupported);
    }

    #[tokio::test]
    async fn test_metaproperties_copy_but_no_create() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/2018-10-01/metaproperties/mp1/copy"))
            .respond_with(success(json!({"_id": "mp2"})))
            .expect(1)
            .mount(&server)
            .await;

        let metaproperties = PropertiesEndpoint::metaproperties(base_for(&server));
        assert_eq!(metaproperties.copy("mp1").await.unwrap()["_id"], "mp2");
        let err = metaproperties.create(json!({}), None).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unsupported);
    }
}
