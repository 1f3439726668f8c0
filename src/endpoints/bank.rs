//! Shared bank collections: curated materials and workflows that accounts
//! copy from.

use std::ops::Deref;

use serde_json::json;

use super::{BaseEndpoint, Capabilities, Entity, EntityEndpoint, capabilities};
use crate::error::Result;

/// Resource name of the bank materials collection.
pub const BANK_MATERIALS: &str = "bank-materials";
/// Resource name of the bank workflows collection.
pub const BANK_WORKFLOWS: &str = "bank-workflows";

/// A read-only bank collection whose entities can be copied into an account.
///
/// [`copy`](BankEndpoint::copy) shadows the generic
/// [`EntityEndpoint::copy`], which banks do not support.
///
/// ## Example
///
/// ```rust,ignore
/// let bank = client.bank_materials();
/// let silicon = bank.get_materials_by_formula("Si").await?;
/// let mine = bank.copy(silicon[0]["_id"].as_str().unwrap_or_default(), None).await?;
/// ```
#[derive(Debug, Clone)]
pub struct BankEndpoint {
    entity: EntityEndpoint,
}

impl BankEndpoint {
    /// Creates the `bank-materials` endpoint.
    pub fn materials(base: BaseEndpoint) -> Self {
        Self::with_name(base, BANK_MATERIALS)
    }

    /// Creates the `bank-workflows` endpoint.
    pub fn workflows(base: BaseEndpoint) -> Self {
        Self::with_name(base, BANK_WORKFLOWS)
    }

    fn with_name(base: BaseEndpoint, name: &str) -> Self {
        Self {
            entity: EntityEndpoint::new(base, name, Capabilities::BANK),
        }
    }

    /// Copies a bank entity into `account_id`, or into the caller's account
    /// when `None`.
    pub async fn copy(&self, id: &str, account_id: Option<&str>) -> Result<Entity> {
        capabilities::copy_to_account(&self.entity, id, account_id).await
    }

    /// Lists bank entities whose formula equals `formula`.
    pub async fn get_materials_by_formula(&self, formula: &str) -> Result<Vec<Entity>> {
        self.list(json!({ "formula": formula })).await
    }
}

impl Deref for BankEndpoint {
    type Target = EntityEndpoint;

    fn deref(&self) -> &EntityEndpoint {
        &self.entity
    }
}
