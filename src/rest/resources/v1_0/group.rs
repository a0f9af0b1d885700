//! Group resource implementation.
//!
//! A group is the namespace every other MMS resource lives in. Hosts and
//! clusters are addressed under `/groups/{group_id}`.
//!
//! # Example
//!
//! ```rust,ignore
//! let group = client.group("5196d3628d022db4cbc26d9e");
//! println!("{} runs {:?} replica sets", group.name().await?, group.replica_set_count().await?);
//!
//! for host in group.hosts(None).await?.iter() {
//!     println!("- {}", host.hostname().await?);
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::rest::resources::{Cluster, Host};
use crate::rest::{
    fetch_list, Lazy, ListParams, RemoteResource, ResourceError, ResourceList, ResourceOperation,
    ResourcePath, Scope,
};

/// An MMS group.
///
/// # Fields
///
/// - `name` - The group's display name (required)
/// - `active_agent_count` - Number of agents currently reporting
/// - `replica_set_count`, `shard_count` - Topology counts
/// - `last_active_agent` - When an agent last reported
/// - `host_counts` - Hosts by role
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    /// The group's display name.
    pub name: String,

    /// Number of agents currently reporting.
    pub active_agent_count: Option<u32>,

    /// Number of replica sets in the group.
    pub replica_set_count: Option<u32>,

    /// Number of sharded clusters in the group.
    pub shard_count: Option<u32>,

    /// When an agent last reported.
    pub last_active_agent: Option<DateTime<Utc>>,

    /// Host counts by role.
    pub host_counts: Option<HostCounts>,
}

/// Number of hosts in a group, by role.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HostCounts {
    /// Arbiters.
    pub arbiter: u32,
    /// Config servers.
    pub config: u32,
    /// Replica set primaries.
    pub primary: u32,
    /// Replica set secondaries.
    pub secondary: u32,
    /// Mongos routers.
    pub mongos: u32,
    /// Legacy master/slave masters.
    pub master: u32,
    /// Legacy master/slave slaves.
    pub slave: u32,
}

impl HostCounts {
    /// Returns the number of hosts across all roles, saturating at `u32::MAX`.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.arbiter
            .saturating_add(self.config)
            .saturating_add(self.primary)
            .saturating_add(self.secondary)
            .saturating_add(self.mongos)
            .saturating_add(self.master)
            .saturating_add(self.slave)
    }
}

impl RemoteResource for Group {
    const NAME: &'static str = "Group";

    /// Paths for the Group resource:
    /// - Find: GET `/groups/{id}`
    /// - All: GET `/groups`
    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(ResourceOperation::Find, &["id"], "/groups/{id}"),
        ResourcePath::new(ResourceOperation::All, &[], "/groups"),
    ];
}

impl Lazy<Group> {
    /// The group's display name.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the group cannot be loaded.
    pub async fn name(&self) -> Result<&str, ResourceError> {
        Ok(&self.get().await?.name)
    }

    /// Number of agents currently reporting.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the group cannot be loaded.
    pub async fn active_agent_count(&self) -> Result<Option<u32>, ResourceError> {
        Ok(self.get().await?.active_agent_count)
    }

    /// Number of replica sets.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the group cannot be loaded.
    pub async fn replica_set_count(&self) -> Result<Option<u32>, ResourceError> {
        Ok(self.get().await?.replica_set_count)
    }

    /// Number of sharded clusters.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the group cannot be loaded.
    pub async fn shard_count(&self) -> Result<Option<u32>, ResourceError> {
        Ok(self.get().await?.shard_count)
    }

    /// When an agent last reported.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the group cannot be loaded.
    pub async fn last_active_agent(&self) -> Result<Option<DateTime<Utc>>, ResourceError> {
        Ok(self.get().await?.last_active_agent)
    }

    /// Host counts by role.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the group cannot be loaded.
    pub async fn host_counts(&self) -> Result<Option<HostCounts>, ResourceError> {
        Ok(self.get().await?.host_counts)
    }

    /// Lists the hosts in this group. Does not load the group itself.
    ///
    /// Sends a GET request to `/groups/{id}/hosts`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the list cannot be fetched or decoded.
    pub async fn hosts(
        &self,
        params: Option<ListParams>,
    ) -> Result<ResourceList<Host>, ResourceError> {
        fetch_list(self.client(), Scope::group(self.id().clone()), params).await
    }

    /// Lists the clusters in this group. Does not load the group itself.
    ///
    /// Sends a GET request to `/groups/{id}/clusters`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the list cannot be fetched or decoded.
    pub async fn clusters(
        &self,
        params: Option<ListParams>,
    ) -> Result<ResourceList<Cluster>, ResourceError> {
        fetch_list(self.client(), Scope::group(self.id().clone()), params).await
    }
}
