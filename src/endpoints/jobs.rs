//! Job endpoint: lifecycle transitions, batch creation and job files.

use std::ops::Deref;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::{BaseEndpoint, Capabilities, Entity, EntityEndpoint};
use crate::error::{Error, Result};
use crate::transport::Request;

/// Resource name of the jobs collection.
pub const JOBS: &str = "jobs";

/// Compute settings attached to a job.
///
/// Serializes to `{ppn, nodes, queue, timeLimit, notify, cluster: {fqdn}, arguments: {}}`.
///
/// ```rust
/// use mat3ra_api_client::ComputeConfig;
/// use serde_json::json;
///
/// let compute = ComputeConfig::builder().cluster("master-production-20160630-cluster-001.exabyte.io").build();
/// let value = serde_json::to_value(&compute).unwrap();
/// assert_eq!(value["queue"], "D");
/// assert_eq!(value["timeLimit"], "01:00:00");
/// assert_eq!(value["arguments"], json!({}));
/// ```
#[derive(Debug, Clone, PartialEq, bon::Builder)]
pub struct ComputeConfig {
    /// Cluster FQDN.
    #[builder(into)]
    pub cluster: String,

    /// Processors per node.
    #[builder(default = 1)]
    pub ppn: u32,

    /// Number of nodes.
    #[builder(default = 1)]
    pub nodes: u32,

    /// Queue name.
    #[builder(into, default = "D".to_string())]
    pub queue: String,

    /// Walltime as `HH:MM:SS`.
    #[builder(into, default = "01:00:00".to_string())]
    pub time_limit: String,

    /// Resource manager notification flags; `abe` mails on abort, begin and end.
    #[builder(into, default = "abe".to_string())]
    pub notify: String,
}

impl Serialize for ComputeConfig {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        json!({
            "ppn": self.ppn,
            "nodes": self.nodes,
            "queue": self.queue,
            "timeLimit": self.time_limit,
            "notify": self.notify,
            "cluster": {"fqdn": self.cluster},
            "arguments": {},
        })
        .serialize(serializer)
    }
}

/// Job creation payload.
///
/// With a single material the job references it as `_material`; with
/// `multi_material` set, every id goes into `_materials`.
#[derive(Debug, Clone, PartialEq, bon::Builder)]
pub struct JobConfig {
    /// Materials the job runs on.
    pub material_ids: Vec<String>,

    /// Workflow to execute.
    #[builder(into)]
    pub workflow_id: String,

    /// Project the job belongs to.
    #[builder(into)]
    pub project_id: String,

    /// Owning account. Omitted from the payload when unset.
    #[builder(into)]
    pub owner_id: Option<String>,

    /// Job name.
    #[builder(into)]
    pub name: String,

    /// Compute settings; the server default is used when unset.
    pub compute: Option<Value>,

    /// Reference all materials instead of only the first.
    #[builder(default = false)]
    pub multi_material: bool,
}

impl JobConfig {
    /// Renders the JSON payload sent to `jobs/create`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument`](crate::ErrorKind::InvalidArgument) if no
    /// material id is given.
    pub fn to_value(&self) -> Result<Value> {
        let Some(first) = self.material_ids.first() else {
            return Err(Error::invalid_argument("A job needs at least one material"));
        };

        let mut config = json!({
            "_project": {"_id": self.project_id},
            "workflow": {"_id": self.workflow_id},
            "name": self.name,
        });
        let object = config
            .as_object_mut()
            .ok_or_else(|| Error::invalid_argument("job config is not an object"))?;

        if let Some(ref owner_id) = self.owner_id {
            object.insert("owner".to_string(), json!({"_id": owner_id}));
        }
        if let Some(ref compute) = self.compute {
            object.insert("compute".to_string(), compute.clone());
        }
        if self.multi_material {
            let materials: Vec<Value> = self
                .material_ids
                .iter()
                .map(|id| json!({"_id": id}))
                .collect();
            object.insert("_materials".to_string(), Value::Array(materials));
        } else {
            object.insert("_material".to_string(), json!({"_id": first}));
        }
        Ok(config)
    }
}

/// A file in a job's working directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobFile {
    /// Object storage key.
    #[serde(default)]
    pub key: String,
    /// File name.
    #[serde(default)]
    pub name: String,
    /// Size in bytes.
    #[serde(default)]
    pub size: Option<u64>,
    /// Storage bucket.
    #[serde(default)]
    pub bucket: Option<String>,
    /// Storage region.
    #[serde(default)]
    pub region: Option<String>,
    /// Storage provider.
    #[serde(default)]
    pub provider: Option<String>,
    /// Last modification, milliseconds since the epoch.
    #[serde(default)]
    pub last_modified: Option<i64>,
    /// Pre-signed download URL.
    #[serde(default, rename = "signedURL")]
    pub signed_url: Option<String>,
}

/// The `jobs` endpoint.
///
/// Supports the generic CRUD operations and named sets, plus the job
/// lifecycle transitions.
///
/// ## Example
///
/// ```rust,ignore
/// let jobs = client.jobs();
/// let compute = ComputeConfig::builder().cluster("cluster-001.mat3ra.com").ppn(4).build();
/// let created = jobs
///     .create_by_ids(&materials, &workflow_id, &project_id, "Band gap", Some(owner.as_str()), Some(compute))
///     .await?;
/// for job in &created {
///     jobs.submit(job["_id"].as_str().unwrap_or_default()).await?;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct JobEndpoint {
    entity: EntityEndpoint,
}

impl JobEndpoint {
    /// Creates the endpoint.
    pub fn new(base: BaseEndpoint) -> Self {
        Self {
            entity: EntityEndpoint::new(base, JOBS, Capabilities::CRUD.with_sets()),
        }
    }

    /// Submits a job for execution: `POST jobs/{id}/submit`.
    pub async fn submit(&self, id: &str) -> Result<()> {
        self.transition(id, "submit").await
    }

    /// Purges a job's files: `POST jobs/{id}/purge`.
    pub async fn purge(&self, id: &str) -> Result<()> {
        self.transition(id, "purge").await
    }

    /// Terminates a running job: `POST jobs/{id}/terminate`.
    pub async fn terminate(&self, id: &str) -> Result<()> {
        self.transition(id, "terminate").await
    }

    async fn transition(&self, id: &str, action: &str) -> Result<()> {
        let _: Value = self
            .base()
            .request(Request::post(self.path(&[id, action])))
            .await?;
        tracing::debug!(job = id, action, "job transition accepted");
        Ok(())
    }

    /// Builds a job payload without sending anything.
    pub fn get_config(config: &JobConfig) -> Result<Value> {
        config.to_value()
    }

    /// Builds compute settings with the defaults for everything but the cluster.
    pub fn get_compute(cluster: impl Into<String>) -> ComputeConfig {
        ComputeConfig::builder().cluster(cluster).build()
    }

    /// Creates one job per material, named `"{prefix} {formula}"`.
    ///
    /// Jobs are created in order. The first failure aborts the batch; jobs
    /// created before it stay on the server.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument`](crate::ErrorKind::InvalidArgument) if a
    /// material lacks `_id` or `formula`.
    pub async fn create_by_ids(
        &self,
        materials: &[Entity],
        workflow_id: &str,
        project_id: &str,
        prefix: &str,
        owner_id: Option<&str>,
        compute: Option<ComputeConfig>,
    ) -> Result<Vec<Entity>> {
        let compute = compute.map(|c| serde_json::to_value(&c)).transpose()?;
        let mut jobs = Vec::with_capacity(materials.len());
        for material in materials {
            let id = string_field(material, "_id")?;
            let formula = string_field(material, "formula")?;
            let config = JobConfig::builder()
                .material_ids(vec![id.to_string()])
                .workflow_id(workflow_id)
                .project_id(project_id)
                .maybe_owner_id(owner_id)
                .name(format!("{} {}", prefix, formula))
                .maybe_compute(compute.clone())
                .build();
            jobs.push(self.create(config.to_value()?, None).await?);
        }
        Ok(jobs)
    }

    /// Requests upload URLs for files in the job directory:
    /// `POST jobs/{id}/presigned-urls`.
    ///
    /// Returns the server's `presignedURLs` list.
    pub async fn get_presigned_urls(&self, id: &str, files: &[&str]) -> Result<Vec<Value>> {
        let data: Value = self
            .base()
            .request(
                Request::post(self.path(&[id, "presigned-urls"])).json(json!({ "files": files })),
            )
            .await?;
        match data.get("presignedURLs") {
            Some(Value::Array(urls)) => Ok(urls.clone()),
            _ => Err(Error::invalid_response("Response has no presignedURLs list")),
        }
    }

    /// Lists the files in the job directory: `GET jobs/{id}/files`.
    pub async fn list_files(&self, id: &str) -> Result<Vec<JobFile>> {
        self.base()
            .request(Request::get(self.path(&[id, "files"])))
            .await
    }

    /// Registers job output files: `POST jobs/{id}/output-files`.
    pub async fn insert_output_files(&self, id: &str, data: Value) -> Result<()> {
        let _: Value = self
            .base()
            .request(Request::post(self.path(&[id, "output-files"])).json(data))
            .await?;
        Ok(())
    }
}

impl Deref for JobEndpoint {
    type Target = EntityEndpoint;

    fn deref(&self) -> &EntityEndpoint {
        &self.entity
    }
}

pub(crate) fn string_field<'a>(entity: &'a Entity, field: &str) -> Result<&'a str> {
    entity
        .get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| Error::invalid_argument(format!("Entity has no string field {:?}", field)))
}
