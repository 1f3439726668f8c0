//! Resource endpoints of the platform REST API.
//!
//! Every endpoint is built on [`BaseEndpoint`], which owns the connection and
//! the shared auth values and strips the `{status, data}` envelope. Resource
//! collections wrap an [`EntityEndpoint`] whose [`Capabilities`] decide which
//! write operations are allowed; specialized endpoints dereference to it, so
//! `client.materials().list(..)` and `client.materials().import_from_file(..)`
//! read the same way.
//!
//! | Endpoint | Resource | Writes |
//! |----------|----------|--------|
//! | [`MaterialEndpoint`] | `materials` | CRUD, sets, default |
//! | [`WorkflowEndpoint`] | `workflows` | CRUD, sets, default |
//! | [`JobEndpoint`] | `jobs` | CRUD, sets |
//! | [`ProjectEndpoint`] | `projects` | copy, default |
//! | [`PropertiesEndpoint`] | `properties` | create, copy |
//! | [`PropertiesEndpoint`] | `metaproperties`, `refined-properties` | copy |
//! | [`PropertiesEndpoint`] | `raw-properties` | CRUD, sets, default |
//! | [`BankEndpoint`] | `bank-materials`, `bank-workflows` | copy to account |
//! | [`ChargeEndpoint`] | `charges` | copy |

mod bank;
mod base;
pub mod capabilities;
mod characteristics;
mod charges;
mod clusters;
mod entity;
mod jobs;
mod login;
mod materials;
mod projects;
mod properties;
mod pseudos;
mod workflows;

use serde_json::{Map, Value};

/// A platform entity: a JSON object with at least an `_id`.
pub type Entity = Map<String, Value>;

pub use bank::{BANK_MATERIALS, BANK_WORKFLOWS, BankEndpoint};
pub use base::{ACCOUNT_ID_HEADER, AUTH_TOKEN_HEADER, BaseEndpoint, SharedAuth, unwrap_envelope};
pub use capabilities::{Capabilities, Capability};
pub use characteristics::{CHARACTERISTICS, CharacteristicEndpoint, Page};
pub use charges::{CHARGES, ChargeEndpoint};
pub use clusters::{CLUSTERS, Cluster, ClusterEndpoint};
pub use entity::{EntityEndpoint, ListQuery};
pub use jobs::{ComputeConfig, JOBS, JobConfig, JobEndpoint, JobFile};
pub use login::{LOGIN, LOGOUT, LoginEndpoint, LoginResponse, LogoutEndpoint};
pub use materials::{DEFAULT_IMPORT_FORMAT, MATERIALS, MaterialEndpoint, flatten_material};
pub use projects::{PROJECTS, ProjectEndpoint};
pub use properties::{
    BandGapType, METAPROPERTIES, PROPERTIES, PropertiesEndpoint, RAW_PROPERTIES,
    REFINED_PROPERTIES, UnitProperties, build_property_selector,
};
pub use pseudos::{PSEUDOS, PseudoEndpoint};
pub use workflows::{WORKFLOWS, WorkflowEndpoint};
