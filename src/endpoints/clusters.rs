//! Compute clusters available to the account.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::BaseEndpoint;
use crate::error::Result;
use crate::transport::Request;

/// Path of the clusters listing.
pub const CLUSTERS: &str = "infrastructure/clusters";

/// A compute cluster and its queues.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    /// Cluster hostname, as used in [`ComputeConfig`](crate::ComputeConfig).
    pub fqdn: String,
    /// Queue descriptions as returned by the server.
    #[serde(default)]
    pub queues: Vec<Value>,
}

/// `GET infrastructure/clusters`.
#[derive(Debug, Clone)]
pub struct ClusterEndpoint {
    base: BaseEndpoint,
}

impl ClusterEndpoint {
    /// Creates the endpoint.
    pub fn new(base: BaseEndpoint) -> Self {
        Self { base }
    }

    /// Lists the clusters jobs can be submitted to.
    pub async fn list(&self) -> Result<Vec<Cluster>> {
        self.base.request(Request::get(CLUSTERS)).await
    }
}
