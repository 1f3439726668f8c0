//! Lazily resolved account identity.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::OnceCell;
use url::Url;

use crate::endpoints::{SharedAuth, unwrap_envelope};
use crate::error::{Error, Result};
use crate::transport::{Connection, Request, header_map};

/// An account the current user belongs to, as listed by the identity endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountEntity {
    /// Account id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Account type, e.g. `"personal"` or `"organization"`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Whether this is the user's default account of its type.
    #[serde(rename = "isDefault", default)]
    pub is_default: bool,
}

impl AccountEntity {
    fn bare(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            kind: None,
            is_default: false,
        }
    }

    /// Returns `true` for organization accounts.
    pub fn is_organization(&self) -> bool {
        self.kind.as_deref() == Some("organization")
    }
}

#[derive(Debug, Deserialize)]
struct Identity {
    user: IdentityUser,
    #[serde(default)]
    accounts: Vec<AccountRecord>,
}

#[derive(Debug, Deserialize)]
struct IdentityUser {
    entity: UserEntity,
}

#[derive(Debug, Deserialize)]
struct UserEntity {
    #[serde(rename = "defaultAccountId")]
    default_account_id: String,
}

#[derive(Debug, Deserialize)]
struct AccountRecord {
    entity: AccountEntity,
}

/// The caller's account, resolved on first use and cached for the lifetime
/// of the client.
///
/// A configured account id is used as-is. Otherwise the id is read from the
/// current-user endpoint with the bearer token; the identity response is
/// fetched at most once, even under concurrent first access, and the
/// resolved id is written back into the client's auth values so later
/// requests and owner defaults see it.
pub struct Account {
    connection: Connection,
    auth: SharedAuth,
    identity_url: Url,
    identity_timeout: Duration,
    identity: OnceCell<Identity>,
    entity: OnceCell<AccountEntity>,
}

impl Account {
    pub(crate) fn new(
        connection: Connection,
        auth: SharedAuth,
        identity_url: Url,
        identity_timeout: Duration,
    ) -> Self {
        Self {
            connection,
            auth,
            identity_url,
            identity_timeout,
            identity: OnceCell::new(),
            entity: OnceCell::new(),
        }
    }

    /// Returns the account id.
    ///
    /// # Errors
    ///
    /// Returns a [`Configuration`](crate::ErrorKind::Configuration) error if
    /// no account id is configured and no bearer token is available, or the
    /// identity endpoint's error otherwise.
    pub async fn id(&self) -> Result<String> {
        if let Some(entity) = self.entity.get() {
            return Ok(entity.id.clone());
        }
        if let Some(account_id) = self.known_id() {
            return Ok(account_id);
        }
        if !self.auth.read().has_bearer() {
            return Err(Error::configuration(
                "ACCOUNT_ID is not set and no OIDC access token is available.",
            ));
        }

        let identity = self.identity().await?;
        let account_id = identity.user.entity.default_account_id.clone();
        {
            let mut auth = self.auth.write();
            if auth.account_id.is_none() {
                auth.account_id = Some(account_id.clone());
            }
        }
        tracing::info!(account_id = %account_id, "resolved account id");
        Ok(account_id)
    }

    /// Returns the account display name, if the platform reports one.
    pub async fn name(&self) -> Result<Option<String>> {
        Ok(self.entity().await?.name.clone())
    }

    /// Returns the account type, if the platform reports one.
    pub async fn kind(&self) -> Result<Option<String>> {
        Ok(self.entity().await?.kind.clone())
    }

    /// Returns the account entity.
    ///
    /// Without a bearer token the identity endpoint is unreachable and only
    /// the id is known.
    pub async fn entity(&self) -> Result<&AccountEntity> {
        self.entity
            .get_or_try_init(|| async {
                let account_id = self.id().await?;
                if !self.auth.read().has_bearer() {
                    return Ok(AccountEntity::bare(account_id));
                }
                let identity = self.identity().await?;
                let entity = identity
                    .accounts
                    .iter()
                    .map(|record| &record.entity)
                    .find(|entity| entity.id == account_id)
                    .cloned()
                    .unwrap_or_else(|| AccountEntity::bare(account_id));
                Ok::<_, Error>(entity)
            })
            .await
    }

    /// Lists every account the current user belongs to.
    ///
    /// # Errors
    ///
    /// Requires a bearer token.
    pub async fn accounts(&self) -> Result<Vec<AccountEntity>> {
        let identity = self.identity().await?;
        Ok(identity
            .accounts
            .iter()
            .map(|record| record.entity.clone())
            .collect())
    }

    /// Returns the user's organization: the default one, else the first.
    pub async fn organization(&self) -> Result<Option<AccountEntity>> {
        let accounts = self.accounts().await?;
        Ok(pick_organization(accounts))
    }

    fn known_id(&self) -> Option<String> {
        self.auth
            .read()
            .account_id
            .clone()
            .filter(|id| !id.is_empty())
    }

    async fn identity(&self) -> Result<&Identity> {
        self.identity
            .get_or_try_init(|| self.fetch_identity())
            .await
    }

    async fn fetch_identity(&self) -> Result<Identity> {
        let token = self
            .auth
            .read()
            .access_token
            .clone()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                Error::configuration(
                    "The account identity lookup requires an OIDC access token (OIDC_ACCESS_TOKEN).",
                )
            })?;
        let bearer = format!("Bearer {}", token);
        let headers = header_map([("authorization", bearer.as_str())])?;
        let body = self
            .connection
            .send(
                Request::get(self.identity_url.as_str())
                    .headers(headers)
                    .timeout(self.identity_timeout),
            )
            .await?;
        parse_identity(body)
    }
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("identity_url", &self.identity_url.as_str())
            .field("entity", &self.entity.get())
            .finish_non_exhaustive()
    }
}

// The identity endpoint may answer with a bare `{data}` body; a `status`
// field, when present, follows the usual envelope rules.
fn parse_identity(mut body: Value) -> Result<Identity> {
    let data = if body.get("status").is_some() {
        unwrap_envelope(body)?
    } else {
        body.get_mut("data")
            .map(Value::take)
            .ok_or_else(|| Error::invalid_response("Identity response has no data field"))?
    };
    serde_json::from_value(data).map_err(|e| {
        Error::invalid_response(format!("Unexpected identity response: {}", e)).with_source(e)
    })
}

fn pick_organization(accounts: Vec<AccountEntity>) -> Option<AccountEntity> {
    let mut organizations = accounts.into_iter().filter(AccountEntity::is_organization);
    let first = organizations.next()?;
    if first.is_default {
        return Some(first);
    }
    Some(organizations.find(|a| a.is_default).unwrap_or(first))
}
