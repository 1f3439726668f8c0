//! The paginated `characteristic` collection.

use super::{BaseEndpoint, Capabilities, Entity, EntityEndpoint};
use crate::error::Result;
use crate::transport::Request;

/// Resource name of the characteristics collection.
pub const CHARACTERISTICS: &str = "characteristic";

/// Page selector for [`CharacteristicEndpoint::list`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// Zero-based page index.
    pub index: u32,
    /// Entries per page.
    pub size: u32,
}

impl Default for Page {
    fn default() -> Self {
        Self { index: 0, size: 20 }
    }
}

/// The `characteristic` endpoint: paged listing, lookup and deletion.
#[derive(Debug, Clone)]
pub struct CharacteristicEndpoint {
    entity: EntityEndpoint,
}

impl CharacteristicEndpoint {
    /// Creates the endpoint.
    pub fn new(base: BaseEndpoint) -> Self {
        Self {
            entity: EntityEndpoint::new(
                base,
                CHARACTERISTICS,
                Capabilities::READ_ONLY.with_delete(),
            ),
        }
    }

    /// Lists one page of characteristics.
    pub async fn list(&self, page: Page) -> Result<Vec<Entity>> {
        self.entity
            .base()
            .request(
                Request::get(self.entity.path(&[]))
                    .param("pageIndex", page.index.to_string())
                    .param("pageSize", page.size.to_string()),
            )
            .await
    }

    /// Fetches one characteristic.
    pub async fn get(&self, id: &str) -> Result<Entity> {
        self.entity.get(id).await
    }

    /// Deletes one characteristic.
    pub async fn delete(&self, id: &str) -> Result<Option<Entity>> {
        self.entity.delete(id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod wiremock_tests {
    use super::*;
    use crate::{ApiConfig, AuthContext};
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_list_default_page_then_delete() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/2018-10-01/characteristic"))
            .and(query_param("pageIndex", "0"))
            .and(query_param("pageSize", "20"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "data": [{"_id": "c1"}]
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/2018-10-01/characteristic/c1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "data": {"_id": "c1"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let address = server.address();
        let config = ApiConfig::builder()
            .host(address.ip().to_string())
            .port(address.port())
            .secure(false)
            .build();
        let characteristics = CharacteristicEndpoint::new(
            BaseEndpoint::connect(&config, AuthContext::legacy("acc", "tok")).unwrap(),
        );

        let page = characteristics.list(Page::default()).await.unwrap();
        assert_eq!(page[0]["_id"], "c1");
        let deleted = characteristics.delete("c1").await.unwrap();
        assert_eq!(deleted.unwrap()["_id"], "c1");
    }
}
