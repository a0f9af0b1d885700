//! Host resource implementation.
//!
//! A host is one monitored `mongod` or `mongos` process. Hosts are scoped by
//! their group and fetched from `/groups/{group_id}/hosts/{id}`.
//!
//! # Example
//!
//! ```rust,ignore
//! let host = client.host("5196d3628d022db4cbc26d9e", "680ab316473d6b28f966364b947134fc");
//!
//! println!("{}:{} ({})", host.hostname().await?, host.port().await?, host.type_name().await?);
//!
//! // The owning group, not yet loaded
//! if let Some(group) = host.group() {
//!     println!("in {}", group.name().await?);
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::clients::Document;
use crate::rest::resources::Group;
use crate::rest::{decode, Lazy, RemoteResource, ResourceError, ResourceOperation, ResourcePath};

/// A monitored MongoDB process.
///
/// `name` is not sent by the service; it is derived from `hostname` when the
/// document is applied.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Host {
    /// The host's name as MMS knows it.
    pub hostname: String,

    /// The port the process listens on.
    pub port: u16,

    /// The process role, e.g. `REPLICA_PRIMARY` or `SHARD_MONGOS`.
    pub type_name: String,

    /// Alias of `hostname`.
    #[serde(skip)]
    pub name: String,

    /// When the agent last pinged this host.
    pub last_ping: Option<DateTime<Utc>>,

    /// The host's IP address.
    pub ip_address: Option<String>,

    /// The MongoDB version the process runs.
    pub version: Option<String>,

    /// The shard this host belongs to.
    pub shard_name: Option<String>,

    /// The replica set this host belongs to.
    pub replica_set_name: Option<String>,

    /// The host's replica set state, e.g. `PRIMARY`.
    pub replica_state_name: Option<String>,

    /// Whether alerts are enabled for this host.
    pub alerts_enabled: Option<bool>,

    /// Whether monitoring is enabled for this host.
    pub host_enabled: Option<bool>,

    /// Whether profile data collection is enabled.
    pub profiler_enabled: Option<bool>,

    /// Whether log collection is enabled.
    pub logs_enabled: Option<bool>,
}

impl RemoteResource for Host {
    const NAME: &'static str = "Host";

    /// Paths for the Host resource:
    /// - Find: GET `/groups/{group_id}/hosts/{id}`
    /// - All: GET `/groups/{group_id}/hosts`
    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(
            ResourceOperation::Find,
            &["group_id", "id"],
            "/groups/{group_id}/hosts/{id}",
        ),
        ResourcePath::new(
            ResourceOperation::All,
            &["group_id"],
            "/groups/{group_id}/hosts",
        ),
    ];

    fn apply(document: &Document) -> Result<Self, ResourceError> {
        let mut host: Self = decode(document)?;
        host.name.clone_from(&host.hostname);
        Ok(host)
    }
}

impl Lazy<Host> {
    /// Returns the owning group without loading it, or `None` if this host
    /// was built without a group scope.
    #[must_use]
    pub fn group(&self) -> Option<Lazy<Group>> {
        let group_id = self.key().scope().group_id()?;
        Some(self.client().group(group_id))
    }

    /// The host's name as MMS knows it.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the host cannot be loaded.
    pub async fn hostname(&self) -> Result<&str, ResourceError> {
        Ok(&self.get().await?.hostname)
    }

    /// Alias of [`hostname`](Self::hostname).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the host cannot be loaded.
    pub async fn name(&self) -> Result<&str, ResourceError> {
        Ok(&self.get().await?.name)
    }

    /// The port the process listens on.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the host cannot be loaded.
    pub async fn port(&self) -> Result<u16, ResourceError> {
        Ok(self.get().await?.port)
    }

    /// The process role.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the host cannot be loaded.
    pub async fn type_name(&self) -> Result<&str, ResourceError> {
        Ok(&self.get().await?.type_name)
    }

    /// When the agent last pinged this host.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the host cannot be loaded.
    pub async fn last_ping(&self) -> Result<Option<DateTime<Utc>>, ResourceError> {
        Ok(self.get().await?.last_ping)
    }

    /// The host's IP address.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the host cannot be loaded.
    pub async fn ip_address(&self) -> Result<Option<&str>, ResourceError> {
        Ok(self.get().await?.ip_address.as_deref())
    }

    /// The MongoDB version.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the host cannot be loaded.
    pub async fn version(&self) -> Result<Option<&str>, ResourceError> {
        Ok(self.get().await?.version.as_deref())
    }

    /// The shard name.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the host cannot be loaded.
    pub async fn shard_name(&self) -> Result<Option<&str>, ResourceError> {
        Ok(self.get().await?.shard_name.as_deref())
    }

    /// The replica set name.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the host cannot be loaded.
    pub async fn replica_set_name(&self) -> Result<Option<&str>, ResourceError> {
        Ok(self.get().await?.replica_set_name.as_deref())
    }

    /// The replica set state.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the host cannot be loaded.
    pub async fn replica_state_name(&self) -> Result<Option<&str>, ResourceError> {
        Ok(self.get().await?.replica_state_name.as_deref())
    }

    /// Whether alerts are enabled.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the host cannot be loaded.
    pub async fn alerts_enabled(&self) -> Result<Option<bool>, ResourceError> {
        Ok(self.get().await?.alerts_enabled)
    }

    /// Whether monitoring is enabled.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the host cannot be loaded.
    pub async fn host_enabled(&self) -> Result<Option<bool>, ResourceError> {
        Ok(self.get().await?.host_enabled)
    }

    /// Whether profile data collection is enabled.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the host cannot be loaded.
    pub async fn profiler_enabled(&self) -> Result<Option<bool>, ResourceError> {
        Ok(self.get().await?.profiler_enabled)
    }

    /// Whether log collection is enabled.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the host cannot be loaded.
    pub async fn logs_enabled(&self) -> Result<Option<bool>, ResourceError> {
        Ok(self.get().await?.logs_enabled)
    }
}
