//! The `workflows` collection.

use std::ops::Deref;

use super::{BaseEndpoint, Capabilities, EntityEndpoint};

/// Resource name of the workflows collection.
pub const WORKFLOWS: &str = "workflows";

/// The `workflows` endpoint: CRUD, named sets and a default workflow.
///
/// Workflow payloads are passed through as JSON; building them is the
/// caller's concern.
#[derive(Debug, Clone)]
pub struct WorkflowEndpoint {
    entity: EntityEndpoint,
}

impl WorkflowEndpoint {
    /// Creates the endpoint.
    pub fn new(base: BaseEndpoint) -> Self {
        Self {
            entity: EntityEndpoint::new(
                base,
                WORKFLOWS,
                Capabilities::CRUD.with_sets().with_default(),
            ),
        }
    }
}

impl Deref for WorkflowEndpoint {
    type Target = EntityEndpoint;

    fn deref(&self) -> &EntityEndpoint {
        &self.entity
    }
}
