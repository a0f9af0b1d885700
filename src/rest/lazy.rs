//! The lazy-load state machine shared by every resource type.
//!
//! A [`Lazy<R>`] starts out holding only an identity and a [`Client`].
//! The first field read loads the resource:
//!
//! 1. resolve the fetch path from the key
//! 2. ask the client for the document (cache first, then transport)
//! 3. map the document onto `R` and mark the resource loaded
//!
//! A failure at any step is returned to the caller and leaves the resource
//! unloaded, so a later read tries again. Once loaded, reads never fetch.
//!
//! The load is guarded by a [`OnceCell`]: concurrent first reads on the same
//! instance run one load and all see the same fields.

use std::fmt;

use tokio::sync::OnceCell;

use crate::clients::{Client, Document};
use crate::rest::{RemoteResource, ResourceError, ResourceId, ResourceKey};

/// A resource addressed by identity whose fields load on first access.
///
/// Concrete types add typed accessors on `Lazy<Group>`, `Lazy<Host>` and so
/// on; each of them goes through [`Lazy::get`].
///
/// # Example
///
/// ```rust,ignore
/// let host = client.host("5196d3628d022db4cbc26d9e", "680ab316473d6b28f966364b947134fc");
/// assert!(!host.is_loaded());
///
/// let port = host.port().await?;      // one fetch
/// let name = host.hostname().await?;  // no fetch
/// assert!(host.is_loaded());
/// ```
pub struct Lazy<R: RemoteResource> {
    client: Client,
    key: ResourceKey,
    fields: OnceCell<R>,
}

// Verify Lazy is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Lazy<crate::rest::resources::Host>>();
};

impl<R: RemoteResource> Lazy<R> {
    /// Creates an unloaded resource. Performs no I/O.
    #[must_use]
    pub fn new(client: Client, key: ResourceKey) -> Self {
        Self {
            client,
            key,
            fields: OnceCell::new(),
        }
    }

    /// Creates a resource that is already loaded from `document`.
    ///
    /// Used for entries of a list response. The transport is never called.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Decode`] if the document does not map onto `R`.
    pub fn from_document(
        client: Client,
        key: ResourceKey,
        document: &Document,
    ) -> Result<Self, ResourceError> {
        let fields = R::apply(document)?;
        Ok(Self {
            client,
            key,
            fields: OnceCell::new_with(Some(fields)),
        })
    }

    /// Returns the resource's own id.
    #[must_use]
    pub const fn id(&self) -> &ResourceId {
        self.key.id()
    }

    /// Returns the full identity, including parent ids.
    #[must_use]
    pub const fn key(&self) -> &ResourceKey {
        &self.key
    }

    /// Returns the client this resource loads through.
    #[must_use]
    pub const fn client(&self) -> &Client {
        &self.client
    }

    /// Returns `true` once the fields have been populated.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.fields.initialized()
    }

    /// Returns the fetch path for this resource.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidId`] or
    /// [`ResourceError::PathResolutionFailed`] if the key cannot form a path.
    pub fn path(&self) -> Result<String, ResourceError> {
        R::resolve_path(&self.key)
    }

    /// Returns the fields, loading them first if needed.
    ///
    /// # Errors
    ///
    /// Returns the [`ResourceError`] of the failed load. The resource stays
    /// unloaded and the next call tries again.
    pub async fn get(&self) -> Result<&R, ResourceError> {
        self.fields.get_or_try_init(|| self.load()).await
    }

    /// Returns the fields if already loaded, without loading.
    #[must_use]
    pub fn loaded(&self) -> Option<&R> {
        self.fields.get()
    }

    /// Consumes the resource, returning its fields if loaded.
    #[must_use]
    pub fn into_loaded(self) -> Option<R> {
        self.fields.into_inner()
    }

    async fn load(&self) -> Result<R, ResourceError> {
        let path = self.path()?;
        tracing::debug!(resource = R::NAME, %path, "Loading resource");

        let document = self
            .client
            .get(&path)
            .await
            .map_err(|e| ResourceError::from_transport(e, R::NAME, self.key.id().as_str()))?;

        R::apply(&document).map_err(|e| {
            tracing::warn!(resource = R::NAME, %path, error = %e, "Resource document did not map");
            e
        })
    }
}

impl<R: RemoteResource + Clone> Clone for Lazy<R> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            key: self.key.clone(),
            fields: self.fields.clone(),
        }
    }
}

impl<R: RemoteResource + fmt::Debug> fmt::Debug for Lazy<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lazy")
            .field("resource", &R::NAME)
            .field("key", &self.key)
            .field("fields", &self.fields.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{CachePolicy, Transport, TransportError};
    use crate::rest::resources::Group;
    use crate::rest::Scope;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct FlakyTransport {
        calls: AtomicUsize,
        failures: usize,
    }

    #[async_trait]
    impl Transport for FlakyTransport {
        async fn fetch(&self, _path: &str) -> Result<Document, TransportError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures {
                return Err(TransportError::Network {
                    message: "connection reset".to_string(),
                });
            }
            Document::try_from(json!({"name": "prod"}))
        }
    }

    fn group_key(id: &str) -> ResourceKey {
        ResourceKey::new(Scope::global(), id.into())
    }

    #[tokio::test]
    async fn test_get_loads_once() {
        let transport = Arc::new(FlakyTransport {
            calls: AtomicUsize::new(0),
            failures: 0,
        });
        let client = Client::new(Arc::clone(&transport), CachePolicy::Unbounded);
        let group: Lazy<Group> = Lazy::new(client, group_key("g1"));

        assert!(group.loaded().is_none());
        assert_eq!(group.get().await.unwrap().name, "prod");
        assert_eq!(group.get().await.unwrap().name, "prod");
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_load_is_retryable() {
        let transport = Arc::new(FlakyTransport {
            calls: AtomicUsize::new(0),
            failures: 1,
        });
        let client = Client::new(Arc::clone(&transport), CachePolicy::Unbounded);
        let group: Lazy<Group> = Lazy::new(client, group_key("g1"));

        let error = group.get().await.unwrap_err();
        assert!(matches!(error, ResourceError::Transport(TransportError::Network { .. })));
        assert!(!group.is_loaded());

        assert_eq!(group.get().await.unwrap().name, "prod");
        assert!(group.is_loaded());
        assert_eq!(transport.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_invalid_id_fails_before_fetch() {
        let transport = Arc::new(FlakyTransport {
            calls: AtomicUsize::new(0),
            failures: 0,
        });
        let client = Client::new(Arc::clone(&transport), CachePolicy::Unbounded);
        let group: Lazy<Group> = Lazy::new(client, group_key("a/b"));

        assert!(matches!(
            group.get().await,
            Err(ResourceError::InvalidId { .. })
        ));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_into_loaded_returns_fields_only_when_loaded() {
        let client = Client::new(
            FlakyTransport {
                calls: AtomicUsize::new(0),
                failures: 0,
            },
            CachePolicy::Unbounded,
        );
        let document = Document::try_from(json!({"name": "staging"})).unwrap();

        let loaded: Lazy<Group> =
            Lazy::from_document(client.clone(), group_key("g1"), &document).unwrap();
        assert_eq!(loaded.into_loaded().unwrap().name, "staging");

        let unloaded: Lazy<Group> = Lazy::new(client, group_key("g2"));
        assert!(unloaded.into_loaded().is_none());
    }

    #[test]
    fn test_debug_shows_resource_and_key() {
        let client = Client::new(
            FlakyTransport {
                calls: AtomicUsize::new(0),
                failures: 0,
            },
            CachePolicy::Unbounded,
        );
        let group: Lazy<Group> = Lazy::new(client, group_key("g1"));

        let debug_str = format!("{group:?}");
        assert!(debug_str.contains("Group"));
        assert!(debug_str.contains("g1"));
        assert!(debug_str.contains("None"));
    }
}
