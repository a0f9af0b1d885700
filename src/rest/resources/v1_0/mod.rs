//! Resources of the MMS public API v1.0.
//!
//! | Resource | Find path |
//! |---|---|
//! | [`Group`] | `/groups/{id}` |
//! | [`Host`] | `/groups/{group_id}/hosts/{id}` |
//! | [`Cluster`] | `/groups/{group_id}/clusters/{id}` |
//! | [`Snapshot`] | `/groups/{group_id}/clusters/{cluster_id}/snapshots/{id}` |
//! | [`RestoreJob`] | `/groups/{group_id}/clusters/{cluster_id}/restoreJobs/{id}` |

mod cluster;
mod group;
mod host;
mod restore_job;
mod snapshot;

pub use cluster::Cluster;
pub use group::{Group, HostCounts};
pub use host::Host;
pub use restore_job::{Delivery, RestoreJob};
pub use snapshot::{Snapshot, SnapshotPart, Timestamp};
