//! Snapshot resource implementation.
//!
//! A snapshot is a point-in-time backup of a cluster, fetched from
//! `/groups/{group_id}/clusters/{cluster_id}/snapshots/{id}`.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::rest::resources::Cluster;
use crate::rest::{
    Lazy, RemoteResource, ResourceError, ResourceKey, ResourceOperation, ResourcePath, Scope,
};

/// A BSON timestamp as the backup service reports it.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct Timestamp {
    /// Wall-clock time.
    pub date: DateTime<Utc>,
    /// Ordinal within the second.
    pub increment: u32,
}

/// One replica set or config server captured by a snapshot.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotPart {
    /// `REPLICA_SET` or `CONFIG_SERVER`.
    pub type_name: String,
    /// The cluster this part belongs to.
    pub cluster_id: Option<String>,
    /// The replica set captured, if any.
    pub replica_set_name: Option<String>,
    /// The `mongod` version at capture time.
    pub mongod_version: Option<String>,
    /// Total size of the data.
    pub data_size_bytes: Option<u64>,
    /// Total size of the data files.
    pub storage_size_bytes: Option<u64>,
    /// Total size of the files on disk.
    pub file_size_bytes: Option<u64>,
}

/// A backup snapshot.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// When the snapshot was taken.
    pub created: Timestamp,
    /// Whether the snapshot has finished.
    pub complete: Option<bool>,
    /// When the snapshot will be deleted.
    pub expires: Option<DateTime<Utc>>,
    /// Whether a sharded snapshot may be inconsistent across shards.
    pub is_possibly_inconsistent: Option<bool>,
    /// The last oplog entry applied before capture.
    pub last_oplog_applied_timestamp: Option<Timestamp>,
    /// The parts making up this snapshot.
    #[serde(default)]
    pub parts: Vec<SnapshotPart>,
}

impl Snapshot {
    /// Returns the total on-disk size of all parts that report it,
    /// saturating at `u64::MAX`.
    #[must_use]
    pub fn file_size_bytes(&self) -> u64 {
        self.parts
            .iter()
            .filter_map(|p| p.file_size_bytes)
            .fold(0, u64::saturating_add)
    }
}

impl RemoteResource for Snapshot {
    const NAME: &'static str = "Snapshot";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(
            ResourceOperation::Find,
            &["group_id", "cluster_id", "id"],
            "/groups/{group_id}/clusters/{cluster_id}/snapshots/{id}",
        ),
        ResourcePath::new(
            ResourceOperation::All,
            &["group_id", "cluster_id"],
            "/groups/{group_id}/clusters/{cluster_id}/snapshots",
        ),
    ];
}

impl Lazy<Snapshot> {
    /// Returns the snapshotted cluster without loading it.
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

    /// When the snapshot was taken.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the snapshot cannot be loaded.
    pub async fn created(&self) -> Result<Timestamp, ResourceError> {
        Ok(self.get().await?.created)
    }

    /// Whether the snapshot has finished.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the snapshot cannot be loaded.
    pub async fn complete(&self) -> Result<Option<bool>, ResourceError> {
        Ok(self.get().await?.complete)
    }

    /// When the snapshot will be deleted.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the snapshot cannot be loaded.
    pub async fn expires(&self) -> Result<Option<DateTime<Utc>>, ResourceError> {
        Ok(self.get().await?.expires)
    }

    /// Whether the snapshot may be inconsistent across shards.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the snapshot cannot be loaded.
    pub async fn is_possibly_inconsistent(&self) -> Result<Option<bool>, ResourceError> {
        Ok(self.get().await?.is_possibly_inconsistent)
    }

    /// The last oplog entry applied before capture.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the snapshot cannot be loaded.
    pub async fn last_oplog_applied_timestamp(&self) -> Result<Option<Timestamp>, ResourceError> {
        Ok(self.get().await?.last_oplog_applied_timestamp)
    }

    /// The parts making up this snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the snapshot cannot be loaded.
    pub async fn parts(&self) -> Result<&[SnapshotPart], ResourceError> {
        Ok(&self.get().await?.parts)
    }
}
