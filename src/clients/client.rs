//! The caching gateway every resource loads through.
//!
//! This module provides [`Client`], which pairs one [`Transport`] with one
//! [`DocumentCache`]. Cloning a `Client` is cheap and shares both, so the
//! usual pattern is to build one at startup and hand clones to every
//! resource factory.

use std::fmt;
use std::sync::Arc;

use crate::clients::cache::{CachePolicy, DocumentCache};
use crate::clients::errors::TransportError;
use crate::clients::http_transport::HttpTransport;
use crate::clients::transport::{Document, Transport};
use crate::config::MmsConfig;
use crate::rest::resources::{Cluster, Group, Host, RestoreJob, Snapshot};
use crate::rest::{
    fetch_list, Lazy, ListParams, ResourceError, ResourceId, ResourceKey, ResourceList, Scope,
};

/// Caching document gateway and resource factory.
///
/// [`Client::get`] consults the cache first and only calls the transport on a
/// miss. The client never looks inside documents; it is a pass-through keyed
/// by path. It does not retry; retry policy belongs to the transport.
///
/// # Example
///
/// ```rust,ignore
/// use mms::{ApiKey, ApiUser, Client, MmsConfig};
///
/// let config = MmsConfig::builder()
///     .api_user(ApiUser::new("ops@example.com")?)
///     .api_key(ApiKey::new("api-key")?)
///     .build()?;
/// let client = Client::from_config(&config)?;
///
/// let host = client.host("5196d3628d022db4cbc26d9e", "680ab316473d6b28f966364b947134fc");
/// println!("{} is a {}", host.hostname().await?, host.type_name().await?);
/// ```
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
    cache: DocumentCache,
}

// Verify Client is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Client>();
};

impl Client {
    /// Creates a client over any transport with a fresh cache.
    #[must_use]
    pub fn new(transport: impl Transport + 'static, policy: CachePolicy) -> Self {
        Self::with_shared_transport(Arc::new(transport), policy)
    }

    /// Creates a client over an already shared transport.
    #[must_use]
    pub fn with_shared_transport(transport: Arc<dyn Transport>, policy: CachePolicy) -> Self {
        tracing::debug!(?policy, "Creating MMS client");
        Self {
            transport,
            cache: DocumentCache::new(policy),
        }
    }

    /// Creates a client backed by [`HttpTransport`] and the configured cache policy.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Network`] if the HTTP client cannot be built.
    pub fn from_config(config: &MmsConfig) -> Result<Self, TransportError> {
        let transport = HttpTransport::new(config)?;
        Ok(Self::new(transport, config.cache_policy()))
    }

    /// Returns the shared document cache.
    #[must_use]
    pub const fn cache(&self) -> &DocumentCache {
        &self.cache
    }

    /// Returns the document at `path`, from the cache when possible.
    ///
    /// Concurrent misses on the same path share a single transport call.
    ///
    /// # Errors
    ///
    /// Returns the transport's [`TransportError`] unchanged. Failures are
    /// not cached.
    pub async fn get(&self, path: &str) -> Result<Document, TransportError> {
        let transport = Arc::clone(&self.transport);
        let owned_path = path.to_string();
        let lookup = self
            .cache
            .get_or_fetch(path, async move { transport.fetch(&owned_path).await })
            .await?;

        if lookup.fetched {
            tracing::debug!(path, "Document cache miss, fetched from transport");
        } else {
            tracing::debug!(path, "Document cache hit");
        }

        Ok(lookup.document)
    }

    /// Drops the cached document for `path`.
    pub async fn invalidate(&self, path: &str) {
        self.cache.invalidate(path).await;
    }

    /// Drops every cached document.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    /// Returns the number of documents currently cached.
    pub async fn cached_entries(&self) -> u64 {
        self.cache.entry_count().await
    }

    /// Returns an unloaded group.
    #[must_use]
    pub fn group(&self, id: impl Into<ResourceId>) -> Lazy<Group> {
        Lazy::new(self.clone(), ResourceKey::new(Scope::global(), id.into()))
    }

    /// Returns an unloaded host of the given group.
    #[must_use]
    pub fn host(&self, group_id: impl Into<ResourceId>, id: impl Into<ResourceId>) -> Lazy<Host> {
        Lazy::new(
            self.clone(),
            ResourceKey::new(Scope::group(group_id.into()), id.into()),
        )
    }

    /// Returns an unloaded cluster of the given group.
    #[must_use]
    pub fn cluster(
        &self,
        group_id: impl Into<ResourceId>,
        id: impl Into<ResourceId>,
    ) -> Lazy<Cluster> {
        Lazy::new(
            self.clone(),
            ResourceKey::new(Scope::group(group_id.into()), id.into()),
        )
    }

    /// Returns an unloaded snapshot of the given cluster.
    #[must_use]
    pub fn snapshot(
        &self,
        group_id: impl Into<ResourceId>,
        cluster_id: impl Into<ResourceId>,
        id: impl Into<ResourceId>,
    ) -> Lazy<Snapshot> {
        Lazy::new(
            self.clone(),
            ResourceKey::new(Scope::cluster(group_id.into(), cluster_id.into()), id.into()),
        )
    }

    /// Returns an unloaded restore job of the given cluster.
    #[must_use]
    pub fn restore_job(
        &self,
        group_id: impl Into<ResourceId>,
        cluster_id: impl Into<ResourceId>,
        id: impl Into<ResourceId>,
    ) -> Lazy<RestoreJob> {
        Lazy::new(
            self.clone(),
            ResourceKey::new(Scope::cluster(group_id.into(), cluster_id.into()), id.into()),
        )
    }

    /// Lists the groups visible to the API user, already loaded.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the list cannot be fetched or decoded.
    pub async fn groups(
        &self,
        params: Option<ListParams>,
    ) -> Result<ResourceList<Group>, ResourceError> {
        fetch_list(self, Scope::global(), params).await
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingTransport {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Transport for CountingTransport {
        async fn fetch(&self, path: &str) -> Result<Document, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if path.ends_with("/missing") {
                return Err(TransportError::NotFound {
                    path: path.to_string(),
                });
            }
            Document::try_from(json!({ "path": path }))
        }
    }

    #[tokio::test]
    async fn test_get_fetches_once_per_path() {
        let transport = Arc::new(CountingTransport::default());
        let client = Client::new(Arc::clone(&transport), CachePolicy::Unbounded);

        let first = client.get("/groups/g1").await.unwrap();
        let second = client.get("/groups/g1").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.get("path"), Some(&json!("/groups/g1")));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_get_surfaces_transport_errors_unchanged() {
        let transport = Arc::new(CountingTransport::default());
        let client = Client::new(Arc::clone(&transport), CachePolicy::Unbounded);

        let error = client.get("/groups/missing").await.unwrap_err();
        assert_eq!(
            error,
            TransportError::NotFound {
                path: "/groups/missing".to_string()
            }
        );

        // Failures are not cached
        let _ = client.get("/groups/missing").await;
        assert_eq!(transport.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let transport = Arc::new(CountingTransport::default());
        let client = Client::new(Arc::clone(&transport), CachePolicy::Unbounded);

        client.get("/groups/g1").await.unwrap();
        client.invalidate("/groups/g1").await;
        client.get("/groups/g1").await.unwrap();

        assert_eq!(transport.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_clones_share_the_cache() {
        let transport = Arc::new(CountingTransport::default());
        let client = Client::new(Arc::clone(&transport), CachePolicy::Unbounded);
        let clone = client.clone();

        client.get("/groups/g1").await.unwrap();
        clone.get("/groups/g1").await.unwrap();

        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_factories_do_not_touch_the_transport() {
        let transport = Arc::new(CountingTransport::default());
        let client = Client::new(Arc::clone(&transport), CachePolicy::Unbounded);

        let host = client.host("g1", "abc");
        let snapshot = client.snapshot("g1", "c1", "s1");

        assert!(!host.is_loaded());
        assert!(!snapshot.is_loaded());
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_client_debug_hides_transport() {
        let client = Client::new(CountingTransport::default(), CachePolicy::Unbounded);
        let debug_str = format!("{:?}", client);
        assert!(debug_str.starts_with("Client"));
        assert!(debug_str.contains("Unbounded"));
    }
}
