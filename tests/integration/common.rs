//! Common test harness for the integration tests.

use std::sync::Once;

use anyhow::{Context, Result};
use mat3ra_api_client::{ApiClient, ApiConfig, AuthContext};
use serde_json::{Value, json};
use wiremock::{MockServer, ResponseTemplate};

/// Versioned API prefix every resource path starts with.
pub const API_PREFIX: &str = "/api/2018-10-01";

static TRACING: Once = Once::new();

/// Installs a test subscriber honoring `RUST_LOG`, once per process.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Returns the API path of `resource`.
pub fn api_path(resource: &str) -> String {
    format!("{}/{}", API_PREFIX, resource)
}

/// Returns a configuration pointing at the mock server over plain HTTP.
pub fn config_for(server: &MockServer) -> ApiConfig {
    let address = server.address();
    ApiConfig::builder()
        .host(address.ip().to_string())
        .port(address.port())
        .secure(false)
        .build()
}

/// Builds a client against the mock server without consulting the process
/// environment.
pub fn client_for(server: &MockServer, auth: AuthContext) -> Result<ApiClient> {
    init_tracing();
    ApiClient::builder()
        .config(config_for(server))
        .auth(auth)
        .build_with_lookup(|_| None)
        .context("Failed to build client")
}

/// A successful envelope around `data`.
pub fn success(data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"status": "success", "data": data}))
}

/// A failed envelope carrying `message`.
pub fn failure(message: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"status": "error", "data": {"message": message}}))
}
