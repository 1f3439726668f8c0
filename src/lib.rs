//! # Mat3ra API Client
//!
//! Rust client for the Mat3ra materials modeling platform REST API.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mat3ra_api_client::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mat3ra_api_client::Error> {
//!     // OIDC_ACCESS_TOKEN, or ACCOUNT_ID and AUTH_TOKEN, from the environment
//!     let client = ApiClient::authenticate()?;
//!
//!     let owner = client.account().id().await?;
//!     let project = client.default_project(&owner).await?;
//!
//!     let materials = client.materials().get_materials_by_formula("Si").await?;
//!     let jobs = client
//!         .jobs()
//!         .create_by_ids(&materials, workflow_id, project["_id"].as_str().unwrap_or_default(), "Band gap", Some(owner.as_str()), None)
//!         .await?;
//!     for job in &jobs {
//!         client.jobs().submit(job["_id"].as_str().unwrap_or_default()).await?;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Key Concepts
//!
//! - **Envelope**: every response is `{"status", "data"}`; endpoints return
//!   `data` or fail with [`ErrorKind::Api`] carrying the server's message
//! - **Entities**: resources are JSON objects ([`endpoints::Entity`]) keyed
//!   by `_id`; payloads pass through unchanged
//! - **Capabilities**: each collection enables a fixed set of write
//!   operations; anything else fails with [`ErrorKind::Unsupported`] before
//!   a request is sent
//! - **Auth**: a bearer token, or a legacy account-id/auth-token pair
//!
//! ## Features
//!
//! - `rustls` (default): Use rustls for TLS
//! - `native-tls`: Use native TLS (OpenSSL on Linux, Secure Transport on macOS)

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

// Core modules
pub mod auth;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;

// Transport layer
pub mod transport;

mod user_agent;

// Prelude for convenient imports
pub mod prelude;

// Re-export main types at crate root for convenience
pub use client::{Account, AccountEntity, ApiClient, ApiClientBuilder};
pub use error::{Error, ErrorKind, Result, StatusHint, status_hint};

// Re-export auth types
pub use auth::{AuthContext, BearerCredentialsConfig, Credentials, LegacyCredentialsConfig};

// Re-export config types
pub use config::{ApiConfig, MaterialsProjectConfig, TlsConfig};

// Re-export endpoint types
pub use endpoints::{
    BandGapType, BankEndpoint, Capabilities, Capability, ChargeEndpoint, CharacteristicEndpoint,
    Cluster, ClusterEndpoint, ComputeConfig, Entity, EntityEndpoint, JobConfig, JobEndpoint,
    JobFile, ListQuery, LoginEndpoint, LoginResponse, LogoutEndpoint, MaterialEndpoint, Page,
    ProjectEndpoint, PropertiesEndpoint, PseudoEndpoint, UnitProperties, WorkflowEndpoint,
    build_property_selector, flatten_material,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crate_compiles() {
        let _ = ErrorKind::Unsupported;
        let _ = Capabilities::READ_ONLY;
    }
}
