//! Login, header selection and account resolution.

use mat3ra_api_client::{ApiClient, AuthContext, ErrorKind, ListQuery, LoginEndpoint};
use serde_json::json;
use wiremock::matchers::{body_string, header, header_exists, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use crate::common::{api_path, client_for, config_for, success};

#[tokio::test]
async fn test_login_then_list_jobs() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(api_path("login")))
        .and(body_string("username=jane&password=secret"))
        .respond_with(success(json!({"X-Auth-Token": "tok", "X-Account-Id": "acc"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(api_path("jobs")))
        .and(header("X-Account-Id", "acc"))
        .and(header("X-Auth-Token", "tok"))
        .respond_with(success(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let (config, auth) = LoginEndpoint::endpoint_options(config_for(&server), "jane", "secret")
        .await
        .unwrap();
    let client = ApiClient::new(config, auth).unwrap();

    let jobs = client.jobs().list(ListQuery::all()).await.unwrap();
    assert!(jobs.is_empty());
}

#[tokio::test]
async fn test_bearer_excludes_legacy_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api_path("materials")))
        .and(header("authorization", "Bearer oidc"))
        .respond_with(success(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let auth = AuthContext {
        access_token: Some("oidc".into()),
        account_id: Some("acc".into()),
        auth_token: Some("tok".into()),
    };
    let client = client_for(&server, auth).unwrap();
    client.materials().list(ListQuery::all()).await.unwrap();

    let requests: Vec<Request> = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("x-account-id"));
    assert!(!requests[0].headers.contains_key("x-auth-token"));
}

#[tokio::test]
async fn test_account_id_fetched_once() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/me"))
        .and(header("authorization", "Bearer oidc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"user": {"entity": {"defaultAccountId": "resolved"}}}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(api_path("materials/create")))
        .and(header_exists("authorization"))
        .respond_with(success(json!({"_id": "m1"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, AuthContext::bearer("oidc")).unwrap();
    for _ in 0..3 {
        assert_eq!(client.account().id().await.unwrap(), "resolved");
    }

    let owner = client.account().id().await.unwrap();
    client
        .materials()
        .create(json!({"name": "Si"}), Some(owner.as_str()))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let create = requests
        .iter()
        .find(|r| r.method.as_str() == "PUT")
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&create.body).unwrap();
    assert_eq!(body["owner"]["_id"], "resolved");
}

#[tokio::test]
async fn test_configured_account_id_makes_no_identity_call() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/me"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let auth = AuthContext {
        access_token: Some("oidc".into()),
        account_id: Some("configured".into()),
        auth_token: None,
    };
    let client = client_for(&server, auth).unwrap();
    assert_eq!(client.account().id().await.unwrap(), "configured");
}

#[tokio::test]
async fn test_account_without_any_token() {
    let server = MockServer::start().await;

    // Valid legacy auth, then the account id is dropped from the shared values
    let client = client_for(&server, AuthContext::legacy("acc", "tok")).unwrap();
    client.base().shared_auth().write().account_id = None;

    let err = client.account().id().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(server.received_requests().await.unwrap().is_empty());
}
