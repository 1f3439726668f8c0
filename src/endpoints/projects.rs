//! The `projects` collection.

use std::ops::Deref;

use serde_json::json;

use super::{BaseEndpoint, Capabilities, Entity, EntityEndpoint};
use crate::error::{Error, Result};

/// Resource name of the projects collection.
pub const PROJECTS: &str = "projects";

/// The `projects` endpoint.
///
/// Projects are created by the platform; the client can read them and pick
/// the default one.
#[derive(Debug, Clone)]
pub struct ProjectEndpoint {
    entity: EntityEndpoint,
}

impl ProjectEndpoint {
    /// Creates the endpoint.
    pub fn new(base: BaseEndpoint) -> Self {
        Self {
            entity: EntityEndpoint::new(
                base,
                PROJECTS,
                Capabilities::READ_ONLY.with_copy().with_default(),
            ),
        }
    }

    /// Returns the default project of `owner_id`.
    ///
    /// # Errors
    ///
    /// Returns [`NotFound`](crate::ErrorKind::NotFound) if the owner has no
    /// default project.
    pub async fn default_project(&self, owner_id: &str) -> Result<Entity> {
        let query = json!({"isDefault": true, "owner._id": owner_id});
        self.list(query)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::not_found(format!("No default project for owner {}", owner_id)))
    }
}

impl Deref for ProjectEndpoint {
    type Target = EntityEndpoint;

    fn deref(&self) -> &EntityEndpoint {
        &self.entity
    }
}
