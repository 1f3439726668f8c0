//! Prelude module for convenient imports.
//!
//! ```rust
//! use mat3ra_api_client::prelude::*;
//! ```
//!
//! This provides access to:
//! - The client and its builder
//! - Error types
//! - Authentication and configuration types
//! - Query and job payload helpers

pub use crate::{
    auth::{AuthContext, BearerCredentialsConfig, Credentials, LegacyCredentialsConfig},
    client::{Account, AccountEntity, ApiClient, ApiClientBuilder},
    config::{ApiConfig, MaterialsProjectConfig, TlsConfig},
    endpoints::{Capabilities, Capability, ComputeConfig, Entity, JobConfig, ListQuery},
    error::{Error, ErrorKind, Result},
};
