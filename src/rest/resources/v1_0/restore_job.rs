//! Restore job resource implementation.
//!
//! A restore job tracks the delivery of a snapshot (or a point in time) back
//! to the user. Jobs are fetched from
//! `/groups/{group_id}/clusters/{cluster_id}/restoreJobs/{id}`.
//!
//! # Example
//!
//! ```rust,ignore
//! let job = client.restore_job(group_id, cluster_id, job_id);
//! if job.status_name().await? == "FINISHED" {
//!     if let Some(delivery) = job.delivery().await? {
//!         println!("download from {:?}", delivery.url);
//!     }
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::rest::resources::{Cluster, Snapshot, Timestamp};
use crate::rest::{
    Lazy, RemoteResource, ResourceError, ResourceKey, ResourceOperation, ResourcePath, Scope,
};

/// How and where the restored data is delivered.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    /// `HTTP` or `SCP`.
    pub method_name: String,
    /// Delivery progress, e.g. `READY` or `EXPIRED`.
    pub status_name: Option<String>,
    /// Download URL for HTTP delivery.
    pub url: Option<String>,
    /// When the download link stops working.
    pub expires: Option<DateTime<Utc>>,
    /// Hours the link stays valid.
    pub expiration_hours: Option<u32>,
    /// Downloads allowed before the link expires.
    pub max_downloads: Option<u32>,
}

/// A backup restore job.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RestoreJob {
    /// `FINISHED`, `IN_PROGRESS`, `BROKEN`, or `KILLED`.
    pub status_name: String,
    /// The snapshot being restored, if any.
    pub snapshot_id: Option<String>,
    /// When the job was requested.
    pub created: Option<DateTime<Utc>>,
    /// The point in time being restored.
    pub timestamp: Option<Timestamp>,
    /// Whether this is a point-in-time restore.
    pub point_in_time: Option<bool>,
    /// Delivery details.
    pub delivery: Option<Delivery>,
}

impl RemoteResource for RestoreJob {
    const NAME: &'static str = "RestoreJob";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(
            ResourceOperation::Find,
            &["group_id", "cluster_id", "id"],
            "/groups/{group_id}/clusters/{cluster_id}/restoreJobs/{id}",
        ),
        ResourcePath::new(
            ResourceOperation::All,
            &["group_id", "cluster_id"],
            "/groups/{group_id}/clusters/{cluster_id}/restoreJobs",
        ),
    ];
}

impl Lazy<RestoreJob> {
    /// Returns the cluster being restored without loading it.
    #[must_use]
    pub fn cluster(&self) -> Option<Lazy<Cluster>> {
        let scope = self.key().scope();
        let group_id = scope.group_id()?;
        let cluster_id = scope.cluster_id()?;
        Some(Lazy::new(
            self.client().clone(),
            ResourceKey::new(Scope::group(group_id.clone()), cluster_id.clone()),
        ))
    }

    /// Returns the snapshot being restored, unloaded. Loads this job to learn
    /// the snapshot id.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the job cannot be loaded.
    pub async fn snapshot(&self) -> Result<Option<Lazy<Snapshot>>, ResourceError> {
        let job = self.get().await?;
        let Some(snapshot_id) = job.snapshot_id.as_deref() else {
            return Ok(None);
        };

        Ok(Some(Lazy::new(
            self.client().clone(),
            ResourceKey::new(self.key().scope().clone(), snapshot_id.into()),
        )))
    }

    /// The job's status.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the job cannot be loaded.
    pub async fn status_name(&self) -> Result<&str, ResourceError> {
        Ok(&self.get().await?.status_name)
    }

    /// When the job was requested.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the job cannot be loaded.
    pub async fn created(&self) -> Result<Option<DateTime<Utc>>, ResourceError> {
        Ok(self.get().await?.created)
    }

    /// The point in time being restored.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the job cannot be loaded.
    pub async fn timestamp(&self) -> Result<Option<Timestamp>, ResourceError> {
        Ok(self.get().await?.timestamp)
    }

    /// Whether this is a point-in-time restore.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the job cannot be loaded.
    pub async fn point_in_time(&self) -> Result<Option<bool>, ResourceError> {
        Ok(self.get().await?.point_in_time)
    }

    /// Delivery details.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the job cannot be loaded.
    pub async fn delivery(&self) -> Result<Option<&Delivery>, ResourceError> {
        Ok(self.get().await?.delivery.as_ref())
    }
}
