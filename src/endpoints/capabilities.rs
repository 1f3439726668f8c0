//! Optional operation families an entity endpoint may enable.
//!
//! Each endpoint carries a [`Capabilities`] value fixed at construction. The
//! generic operations in [`EntityEndpoint`] consult it before sending anything,
//! and the set/default/bank operations live here as free functions shared by
//! every endpoint that enables them.

use std::fmt;

use serde_json::Value;

use super::{Entity, EntityEndpoint};
use crate::error::{Error, Result};
use crate::transport::Request;

/// A single optional operation family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// `PUT {name}/create`.
    Create,
    /// `PATCH {name}/{id}`.
    Update,
    /// `DELETE {name}/{id}`.
    Delete,
    /// `POST {name}/{id}/copy` within the caller's account.
    Copy,
    /// Named sets: `create-set` and `move-to-set`.
    Sets,
    /// `POST {name}/{id}/set-default`.
    Default,
    /// `POST {name}/{id}/copy?accountId=...` from the shared bank.
    BankCopy,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Capability::Create => "create",
            Capability::Update => "update",
            Capability::Delete => "delete",
            Capability::Copy => "copy",
            Capability::Sets => "sets",
            Capability::Default => "set-default",
            Capability::BankCopy => "bank copy",
        };
        f.write_str(name)
    }
}

/// The operation families enabled on an endpoint.
///
/// Listing and fetching by id are always available.
///
/// ```rust
/// use mat3ra_api_client::{Capabilities, Capability};
///
/// let materials = Capabilities::CRUD.with_sets().with_default();
/// assert!(materials.supports(Capability::Sets));
/// assert!(!Capabilities::READ_ONLY.supports(Capability::Delete));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    create: bool,
    update: bool,
    delete: bool,
    copy: bool,
    sets: bool,
    default: bool,
    bank_copy: bool,
}

impl Capabilities {
    /// Only `list` and `get`.
    pub const READ_ONLY: Capabilities = Capabilities {
        create: false,
        update: false,
        delete: false,
        copy: false,
        sets: false,
        default: false,
        bank_copy: false,
    };

    /// Create, update, delete and copy.
    pub const CRUD: Capabilities = Capabilities {
        create: true,
        update: true,
        delete: true,
        copy: true,
        ..Capabilities::READ_ONLY
    };

    /// Shared bank entities: read plus copy into an account.
    pub const BANK: Capabilities = Capabilities {
        bank_copy: true,
        ..Capabilities::READ_ONLY
    };

    /// Adds named-set support.
    #[must_use]
    pub const fn with_sets(self) -> Self {
        Self { sets: true, ..self }
    }

    /// Adds set-default support.
    #[must_use]
    pub const fn with_default(self) -> Self {
        Self {
            default: true,
            ..self
        }
    }

    /// Adds `create` to an otherwise read-only set.
    #[must_use]
    pub const fn with_create(self) -> Self {
        Self {
            create: true,
            ..self
        }
    }

    /// Adds same-account `copy` to an otherwise read-only set.
    #[must_use]
    pub const fn with_copy(self) -> Self {
        Self { copy: true, ..self }
    }

    /// Adds `delete` to an otherwise read-only set.
    #[must_use]
    pub const fn with_delete(self) -> Self {
        Self {
            delete: true,
            ..self
        }
    }

    /// Returns `true` if `capability` is enabled.
    pub fn supports(&self, capability: Capability) -> bool {
        match capability {
            Capability::Create => self.create,
            Capability::Update => self.update,
            Capability::Delete => self.delete,
            Capability::Copy => self.copy,
            Capability::Sets => self.sets,
            Capability::Default => self.default,
            Capability::BankCopy => self.bank_copy,
        }
    }

    /// Fails with [`Unsupported`](crate::ErrorKind::Unsupported) unless
    /// `capability` is enabled.
    pub fn require(&self, capability: Capability, endpoint: &str) -> Result<()> {
        if self.supports(capability) {
            Ok(())
        } else {
            Err(Error::unsupported(format!(
                "{} does not support {}",
                endpoint, capability
            )))
        }
    }
}

/// Creates a named set of entities: `PUT {name}/create-set`.
pub async fn create_set(endpoint: &EntityEndpoint, config: Value) -> Result<Entity> {
    endpoint.require(Capability::Sets)?;
    endpoint
        .base()
        .request(Request::put(endpoint.path(&["create-set"])).json(config))
        .await
}

/// Moves an entity between sets: `POST {name}/{id}/move-to-set`.
pub async fn move_to_set(
    endpoint: &EntityEndpoint,
    id: &str,
    old_set_id: &str,
    new_set_id: &str,
) -> Result<Value> {
    endpoint.require(Capability::Sets)?;
    endpoint
        .base()
        .request(
            Request::post(endpoint.path(&[id, "move-to-set"]))
                .param("oldSetId", old_set_id)
                .param("newSetId", new_set_id),
        )
        .await
}

/// Marks an entity as the account default: `POST {name}/{id}/set-default`.
pub async fn set_default(endpoint: &EntityEndpoint, id: &str) -> Result<Value> {
    endpoint.require(Capability::Default)?;
    endpoint
        .base()
        .request(Request::post(endpoint.path(&[id, "set-default"])))
        .await
}

/// Copies a bank entity into an account: `POST {name}/{id}/copy`.
///
/// Without `account_id` the server copies into the caller's account.
pub async fn copy_to_account(
    endpoint: &EntityEndpoint,
    id: &str,
    account_id: Option<&str>,
) -> Result<Entity> {
    endpoint.require(Capability::BankCopy)?;
    let mut request = Request::post(endpoint.path(&[id, "copy"]));
    if let Some(account_id) = account_id {
        request = request.param("accountId", account_id);
    }
    endpoint.base().request(request).await
}
