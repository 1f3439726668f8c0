//! The `pseudos` collection of pseudopotential files.

use std::path::Path;

use serde_json::Value;

use super::{BaseEndpoint, Capabilities, Entity, EntityEndpoint};
use crate::error::{Error, Result};
use crate::transport::Request;

/// Resource name of the pseudopotentials collection.
pub const PSEUDOS: &str = "pseudos";

/// The `pseudos` endpoint.
#[derive(Debug, Clone)]
pub struct PseudoEndpoint {
    entity: EntityEndpoint,
}

impl PseudoEndpoint {
    /// Creates the endpoint.
    pub fn new(base: BaseEndpoint) -> Self {
        Self {
            entity: EntityEndpoint::new(base, PSEUDOS, Capabilities::READ_ONLY),
        }
    }

    /// Lists pseudopotentials.
    ///
    /// `params` are passed through, e.g. `pageIndex`, `pageSize` or a JSON
    /// `query`.
    pub async fn list(&self, params: &[(&str, &str)]) -> Result<Vec<Entity>> {
        self.entity
            .base()
            .request(Request::get(self.entity.path(&[])).params(params.iter().copied()))
            .await
    }

    /// Fetches one pseudopotential.
    pub async fn get(&self, id: &str) -> Result<Entity> {
        self.entity.get(id).await
    }

    /// Uploads a pseudopotential file.
    ///
    /// The file content is sent as a single JSON string.
    pub async fn upload(&self, file: impl AsRef<Path>) -> Result<Entity> {
        let file = file.as_ref();
        let content = tokio::fs::read_to_string(file).await.map_err(|e| {
            Error::invalid_argument(format!("Failed to read pseudopotential {:?}: {}", file, e))
                .with_source(e)
        })?;
        tracing::debug!(file = %file.display(), bytes = content.len(), "uploading pseudopotential");
        self.entity
            .base()
            .request(Request::post(self.entity.path(&[])).json(Value::String(content)))
            .await
    }
}
