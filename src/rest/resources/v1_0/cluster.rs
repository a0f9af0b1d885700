//! Cluster resource implementation.
//!
//! A cluster is a replica set or sharded cluster MMS has discovered in a
//! group. Backup snapshots and restore jobs hang off clusters.
//!
//! # Example
//!
//! ```rust,ignore
//! let cluster = client.cluster("5196d3628d022db4cbc26d9e", "533d7d4730040be257defe88");
//! println!("{} is a {}", cluster.cluster_name().await?, cluster.type_name().await?);
//!
//! let snapshots = cluster.snapshots(Some(ListParams::new().items_per_page(10))).await?;
//! ```

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::rest::resources::{Group, RestoreJob, Snapshot};
use crate::rest::{
    fetch_list, Lazy, ListParams, RemoteResource, ResourceError, ResourceList, ResourceOperation,
    ResourcePath,
};

/// A replica set or sharded cluster.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    /// The cluster's display name.
    pub cluster_name: String,

    /// `REPLICA_SET`, `SHARDED`, `SHARDED_REPLICA_SET`, or `CONFIG_SERVER_REPLICA_SET`.
    pub type_name: String,

    /// For a shard, the shard name.
    pub shard_name: Option<String>,

    /// For a replica set, its name.
    pub replica_set_name: Option<String>,

    /// When MMS last heard from any member.
    pub last_heartbeat: Option<DateTime<Utc>>,
}

impl RemoteResource for Cluster {
    const NAME: &'static str = "Cluster";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(
            ResourceOperation::Find,
            &["group_id", "id"],
            "/groups/{group_id}/clusters/{id}",
        ),
        ResourcePath::new(
            ResourceOperation::All,
            &["group_id"],
            "/groups/{group_id}/clusters",
        ),
    ];
}

impl Lazy<Cluster> {
    /// Returns the owning group without loading it.
    #[must_use]
    pub fn group(&self) -> Option<Lazy<Group>> {
        let group_id = self.key().scope().group_id()?;
        Some(self.client().group(group_id))
    }

    /// The cluster's display name.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the cluster cannot be loaded.
    pub async fn cluster_name(&self) -> Result<&str, ResourceError> {
        Ok(&self.get().await?.cluster_name)
    }

    /// The cluster type.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the cluster cannot be loaded.
    pub async fn type_name(&self) -> Result<&str, ResourceError> {
        Ok(&self.get().await?.type_name)
    }

    /// The shard name, for shards.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the cluster cannot be loaded.
    pub async fn shard_name(&self) -> Result<Option<&str>, ResourceError> {
        Ok(self.get().await?.shard_name.as_deref())
    }

    /// The replica set name, for replica sets.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the cluster cannot be loaded.
    pub async fn replica_set_name(&self) -> Result<Option<&str>, ResourceError> {
        Ok(self.get().await?.replica_set_name.as_deref())
    }

    /// When MMS last heard from any member.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the cluster cannot be loaded.
    pub async fn last_heartbeat(&self) -> Result<Option<DateTime<Utc>>, ResourceError> {
        Ok(self.get().await?.last_heartbeat)
    }

    /// Lists this cluster's backup snapshots. Does not load the cluster.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the list cannot be fetched or decoded.
    pub async fn snapshots(
        &self,
        params: Option<ListParams>,
    ) -> Result<ResourceList<Snapshot>, ResourceError> {
        let scope = self.key().scope().clone().with_cluster(self.id().clone());
        fetch_list(self.client(), scope, params).await
    }

    /// Lists this cluster's restore jobs. Does not load the cluster.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the list cannot be fetched or decoded.
    pub async fn restore_jobs(
        &self,
        params: Option<ListParams>,
    ) -> Result<ResourceList<RestoreJob>, ResourceError> {
        let scope = self.key().scope().clone().with_cluster(self.id().clone());
        fetch_list(self.client(), scope, params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::Document;
    use crate::rest::{ResourceKey, Scope};
    use serde_json::json;

    #[test]
    fn test_cluster_path() {
        let key = ResourceKey::new(Scope::group("g1".into()), "c1".into());
        assert_eq!(
            Cluster::resolve_path(&key).unwrap(),
            "/groups/g1/clusters/c1"
        );
    }

    #[test]
    fn test_cluster_maps_service_document() {
        let document = Document::try_from(json!({
            "id": "533d7d4730040be257defe88",
            "groupId": "5196d3628d022db4cbc26d9e",
            "typeName": "SHARDED_REPLICA_SET",
            "clusterName": "Animals",
            "lastHeartbeat": "2014-04-03T15:26:58Z",
            "links": []
        }))
        .unwrap();

        let cluster = Cluster::apply(&document).unwrap();
        assert_eq!(cluster.cluster_name, "Animals");
        assert_eq!(cluster.type_name, "SHARDED_REPLICA_SET");
        assert!(cluster.shard_name.is_none());
        assert!(cluster.last_heartbeat.is_some());
    }

    #[test]
    fn test_cluster_requires_type_name() {
        let document = Document::try_from(json!({"clusterName": "Animals"})).unwrap();
        assert!(matches!(
            Cluster::apply(&document),
            Err(ResourceError::Decode { ref message, .. }) if message.contains("typeName")
        ));
    }
}
