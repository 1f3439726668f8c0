//! Accounting charges for executed jobs.

use std::ops::Deref;

use serde_json::{Value, json};

use super::{BaseEndpoint, Capabilities, Entity, EntityEndpoint};
use crate::error::{Error, Result};

/// Resource name of the charges collection.
pub const CHARGES: &str = "charges";

/// The read-only `charges` endpoint.
#[derive(Debug, Clone)]
pub struct ChargeEndpoint {
    entity: EntityEndpoint,
}

impl ChargeEndpoint {
    /// Creates the endpoint.
    pub fn new(base: BaseEndpoint) -> Self {
        Self {
            entity: EntityEndpoint::new(base, CHARGES, Capabilities::READ_ONLY.with_copy()),
        }
    }

    /// Returns the charge recorded for `job`, if any.
    ///
    /// Charges are keyed by the scheduler job id at `compute.cluster.jid`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument`](crate::ErrorKind::InvalidArgument) if the
    /// job has no scheduler id.
    pub async fn get_by_job(&self, job: &Entity) -> Result<Option<Entity>> {
        let jid = job
            .get("compute")
            .and_then(|compute| compute.pointer("/cluster/jid"))
            .filter(|jid| !jid.is_null())
            .cloned()
            .ok_or_else(|| Error::invalid_argument("Job has no compute.cluster.jid"))?;
        Ok(self.list(json!({ "jid": jid })).await?.into_iter().next())
    }
}

impl Deref for ChargeEndpoint {
    type Target = EntityEndpoint;

    fn deref(&self) -> &EntityEndpoint {
        &self.entity
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod wiremock_tests {
    use super::*;
    use crate::{ApiConfig, AuthContext, ErrorKind};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_mock_endpoint(server: &MockServer) -> ChargeEndpoint {
        let address = server.address();
        let config = ApiConfig::builder()
            .host(address.ip().to_string())
            .port(address.port())
            .secure(false)
            .build();
        ChargeEndpoint::new(BaseEndpoint::connect(&config, AuthContext::bearer("t")).unwrap())
    }

    fn job(jid: Value) -> Entity {
        json!({"_id": "j1", "compute": {"cluster": {"fqdn": "c1", "jid": jid}}})
            .as_object()
            .cloned()
            .unwrap()
    }

    #[tokio::test]
    async fn test_get_by_job() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/2018-10-01/charges"))
            .and(query_param("query", r#"{"jid":"1234.master"}"#))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "data": [{"_id": "ch1", "jid": "1234.master"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let charges = create_mock_endpoint(&server);
        let charge = charges.get_by_job(&job(json!("1234.master"))).await.unwrap();
        assert_eq!(charge.unwrap()["_id"], "ch1");
    }

    #[tokio::test]
    async fn test_get_by_job_none() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/2018-10-01/charges"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"status": "success", "data": []})),
            )
            .mount(&server)
            .await;

        let charges = create_mock_endpoint(&server);
        assert!(charges.get_by_job(&job(json!("1"))).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_by_job_without_jid() {
        let server = MockServer::start().await;
        let charges = create_mock_endpoint(&server);
        let err = charges.get_by_job(&job(Value::Null)).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
}
