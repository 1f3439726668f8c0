//! Internal client state.

use std::sync::Arc;

use parking_lot::RwLock;

use super::Account;
use crate::auth::AuthContext;
use crate::config::ApiConfig;
use crate::endpoints::{
    BankEndpoint, BaseEndpoint, ChargeEndpoint, CharacteristicEndpoint, ClusterEndpoint,
    JobEndpoint, LogoutEndpoint, MaterialEndpoint, ProjectEndpoint, PropertiesEndpoint,
    PseudoEndpoint, WorkflowEndpoint,
};
use crate::error::Result;
use crate::transport::Connection;

pub(crate) struct ClientInner {
    /// Resolved configuration.
    pub config: ApiConfig,

    /// Connection and auth shared by every endpoint below.
    pub base: BaseEndpoint,

    pub materials: MaterialEndpoint,
    pub workflows: WorkflowEndpoint,
    pub jobs: JobEndpoint,
    pub projects: ProjectEndpoint,
    pub properties: PropertiesEndpoint,
    pub metaproperties: PropertiesEndpoint,
    pub raw_properties: PropertiesEndpoint,
    pub refined_properties: PropertiesEndpoint,
    pub bank_materials: BankEndpoint,
    pub bank_workflows: BankEndpoint,
    pub characteristics: CharacteristicEndpoint,
    pub pseudos: PseudoEndpoint,
    pub clusters: ClusterEndpoint,
    pub charges: ChargeEndpoint,
    pub logout: LogoutEndpoint,

    /// Lazily resolved account identity.
    pub account: Account,
}

impl ClientInner {
    pub(crate) fn new(config: ApiConfig, auth: AuthContext) -> Result<Self> {
        let connection = Connection::new(&config)?;
        let auth = Arc::new(RwLock::new(auth));
        let base = BaseEndpoint::new(connection.clone(), Arc::clone(&auth));
        let account = Account::new(
            connection,
            auth,
            config.identity_url()?,
            config.identity_timeout,
        );

        Ok(Self {
            materials: MaterialEndpoint::new(base.clone(), config.materials_project.clone()),
            workflows: WorkflowEndpoint::new(base.clone()),
            jobs: JobEndpoint::new(base.clone()),
            projects: ProjectEndpoint::new(base.clone()),
            properties: PropertiesEndpoint::new(base.clone()),
            metaproperties: PropertiesEndpoint::metaproperties(base.clone()),
            raw_properties: PropertiesEndpoint::raw(base.clone()),
            refined_properties: PropertiesEndpoint::refined(base.clone()),
            bank_materials: BankEndpoint::materials(base.clone()),
            bank_workflows: BankEndpoint::workflows(base.clone()),
            characteristics: CharacteristicEndpoint::new(base.clone()),
            pseudos: PseudoEndpoint::new(base.clone()),
            clusters: ClusterEndpoint::new(base.clone()),
            charges: ChargeEndpoint::new(base.clone()),
            logout: LogoutEndpoint::new(base.clone()),
            account,
            base,
            config,
        })
    }
}
