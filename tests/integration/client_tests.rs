//! Envelope and HTTP error handling through the public client.

use mat3ra_api_client::{AuthContext, ErrorKind, ListQuery};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{api_path, client_for, failure, success};

#[tokio::test]
async fn test_materials_by_formula_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api_path("materials")))
        .respond_with(success(json!([{"_id": "m1", "formula": "Si"}])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, AuthContext::legacy("acc", "tok")).unwrap();
    let found = client.materials().get_materials_by_formula("Si").await.unwrap();
    assert_eq!(found[0]["_id"], "m1");

    let requests = server.received_requests().await.unwrap();
    let query = requests[0]
        .url
        .query_pairs()
        .find(|(key, _)| key == "query")
        .map(|(_, value)| value.into_owned())
        .unwrap();
    let query: serde_json::Value = serde_json::from_str(&query).unwrap();
    assert_eq!(query, json!({"formula": "Si"}));
}

#[tokio::test]
async fn test_forbidden_mentions_project_and_permissions() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api_path("projects")))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&server)
        .await;

    let client = client_for(&server, AuthContext::bearer("t")).unwrap();
    let err = client.projects().list(ListQuery::all()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Forbidden);
    assert_eq!(err.status(), Some(403));
    assert!(err.message().contains("project"));
    assert!(err.message().contains("permissions"));
}

#[tokio::test]
async fn test_envelope_error_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api_path("workflows/w1")))
        .respond_with(failure("X"))
        .mount(&server)
        .await;

    let client = client_for(&server, AuthContext::bearer("t")).unwrap();
    let err = client.workflows().get("w1").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.message(), "X");
}

#[tokio::test]
async fn test_unsupported_operations_send_nothing() {
    let server = MockServer::start().await;

    let client = client_for(&server, AuthContext::bearer("t")).unwrap();
    let err = client.metaproperties().create(json!({}), None).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unsupported);
    let err = client.charges().delete("c1").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unsupported);
    let err = client.jobs().set_default("j1").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unsupported);

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_non_json_body_is_invalid_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api_path("infrastructure/clusters")))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let client = client_for(&server, AuthContext::bearer("t")).unwrap();
    let err = client.clusters().list().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidResponse);
}

#[tokio::test]
async fn test_bank_copy_into_organization() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "user": {"entity": {"defaultAccountId": "me"}},
                "accounts": [{"entity": {"_id": "org1", "type": "organization"}}]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(api_path("bank-materials/bm1/copy")))
        .and(query_param("accountId", "org1"))
        .respond_with(success(json!({"_id": "m1"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, AuthContext::bearer("t")).unwrap();
    let organization = client.my_organization().await.unwrap().unwrap();
    let copied = client
        .bank_materials()
        .copy("bm1", Some(organization.id.as_str()))
        .await
        .unwrap();
    assert_eq!(copied["_id"], "m1");
}
