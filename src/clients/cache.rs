//! Document cache keyed by fetch path.
//!
//! [`DocumentCache`] memoizes raw [`Document`]s under the exact path they
//! were fetched from. It knows nothing about resources: a key is a path, a
//! value is a document.
//!
//! # Policies
//!
//! - [`CachePolicy::Unbounded`]: keep every document for the life of the cache
//! - [`CachePolicy::Bounded`]: evict once `max_capacity` documents are held
//! - [`CachePolicy::Expiring`]: drop documents `ttl` after insertion, optionally bounded
//!
//! # Concurrency
//!
//! The cache is cheap to clone; clones share storage. [`DocumentCache::get_or_fetch`]
//! coalesces concurrent misses on the same key into one fetch, while misses
//! on different keys proceed independently.

use std::future::Future;
use std::time::Duration;

use moka::future::Cache;

use crate::clients::errors::TransportError;
use crate::clients::transport::Document;

/// Eviction and expiry policy for a [`DocumentCache`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CachePolicy {
    /// No eviction and no expiry.
    #[default]
    Unbounded,
    /// Size-bounded eviction.
    Bounded {
        /// Maximum number of documents held.
        max_capacity: u64,
    },
    /// Time-to-live expiry, optionally size-bounded.
    Expiring {
        /// How long a document stays visible after insertion.
        ttl: Duration,
        /// Maximum number of documents held, if bounded.
        max_capacity: Option<u64>,
    },
}

/// Outcome of [`DocumentCache::get_or_fetch`].
#[derive(Clone, Debug)]
pub struct CacheLookup {
    /// The cached or freshly fetched document.
    pub document: Document,
    /// `true` if this call ran the fetch and inserted the document.
    pub fetched: bool,
}

/// Shared in-memory cache of documents keyed by fetch path.
///
/// # Example
///
/// ```rust
/// use mms::clients::{CachePolicy, Document, DocumentCache};
/// use serde_json::json;
///
/// # tokio_test::block_on(async {
/// let cache = DocumentCache::new(CachePolicy::Unbounded);
/// let document = Document::try_from(json!({"name": "prod"})).unwrap();
///
/// cache.put("/groups/g1", document.clone()).await;
/// assert_eq!(cache.get("/groups/g1").await, Some(document));
///
/// cache.invalidate("/groups/g1").await;
/// assert!(cache.get("/groups/g1").await.is_none());
/// # });
/// ```
#[derive(Clone)]
pub struct DocumentCache {
    entries: Cache<String, Document>,
    policy: CachePolicy,
}

// Verify DocumentCache is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<DocumentCache>();
};

impl DocumentCache {
    /// Creates an empty cache with the given policy.
    #[must_use]
    pub fn new(policy: CachePolicy) -> Self {
        let mut builder = Cache::builder();
        match policy {
            CachePolicy::Unbounded => {}
            CachePolicy::Bounded { max_capacity } => {
                builder = builder.max_capacity(max_capacity);
            }
            CachePolicy::Expiring { ttl, max_capacity } => {
                builder = builder.time_to_live(ttl);
                if let Some(max_capacity) = max_capacity {
                    builder = builder.max_capacity(max_capacity);
                }
            }
        }

        Self {
            entries: builder.build(),
            policy,
        }
    }

    /// Returns the policy this cache was built with.
    #[must_use]
    pub const fn policy(&self) -> CachePolicy {
        self.policy
    }

    /// Returns the document stored under `key`, if present and not expired.
    pub async fn get(&self, key: &str) -> Option<Document> {
        self.entries.get(key).await
    }

    /// Stores `document` under `key`, replacing any previous entry.
    pub async fn put(&self, key: impl Into<String>, document: Document) {
        self.entries.insert(key.into(), document).await;
    }

    /// Removes the entry stored under `key`.
    pub async fn invalidate(&self, key: &str) {
        self.entries.invalidate(key).await;
    }

    /// Removes every entry.
    pub fn invalidate_all(&self) {
        self.entries.invalidate_all();
    }

    /// Returns the number of live entries after applying pending evictions.
    pub async fn entry_count(&self) -> u64 {
        self.entries.run_pending_tasks().await;
        self.entries.entry_count()
    }

    /// Returns the document under `key`, running `fetch` to fill it on a miss.
    ///
    /// Concurrent callers missing on the same key wait for a single `fetch`
    /// and all receive its result. A failed fetch inserts nothing, so the
    /// next caller fetches again.
    ///
    /// # Errors
    ///
    /// Returns the error produced by `fetch`.
    pub async fn get_or_fetch<F>(&self, key: &str, fetch: F) -> Result<CacheLookup, TransportError>
    where
        F: Future<Output = Result<Document, TransportError>>,
    {
        let entry = self
            .entries
            .entry_by_ref(key)
            .or_try_insert_with(fetch)
            .await
            .map_err(|error| (*error).clone())?;

        Ok(CacheLookup {
            fetched: entry.is_fresh(),
            document: entry.into_value(),
        })
    }
}

impl std::fmt::Debug for DocumentCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentCache")
            .field("policy", &self.policy)
            .field("entry_count", &self.entries.entry_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn document(name: &str) -> Document {
        Document::try_from(json!({ "name": name })).unwrap()
    }

    #[tokio::test]
    async fn test_put_is_visible_to_get() {
        let cache = DocumentCache::new(CachePolicy::Unbounded);
        cache.put("/groups/g1", document("prod")).await;

        assert_eq!(cache.get("/groups/g1").await, Some(document("prod")));
        assert!(cache.get("/groups/g2").await.is_none());
    }

    #[tokio::test]
    async fn test_put_replaces_previous_entry() {
        let cache = DocumentCache::new(CachePolicy::Unbounded);
        cache.put("/groups/g1", document("old")).await;
        cache.put("/groups/g1", document("new")).await;

        assert_eq!(cache.get("/groups/g1").await, Some(document("new")));
        assert_eq!(cache.entry_count().await, 1);
    }

    #[tokio::test]
    async fn test_invalidate_all_clears_entries() {
        let cache = DocumentCache::new(CachePolicy::Unbounded);
        cache.put("/groups/g1", document("a")).await;
        cache.put("/groups/g2", document("b")).await;

        cache.invalidate_all();

        assert!(cache.get("/groups/g1").await.is_none());
        assert!(cache.get("/groups/g2").await.is_none());
    }

    #[tokio::test]
    async fn test_expiring_policy_hides_stale_entries() {
        let cache = DocumentCache::new(CachePolicy::Expiring {
            ttl: Duration::from_millis(50),
            max_capacity: None,
        });
        cache.put("/groups/g1", document("prod")).await;
        assert!(cache.get("/groups/g1").await.is_some());

        tokio::time::sleep(Duration::from_millis(120)).await;
        assert!(cache.get("/groups/g1").await.is_none());
    }

    #[tokio::test]
    async fn test_bounded_policy_never_exceeds_capacity() {
        let cache = DocumentCache::new(CachePolicy::Bounded { max_capacity: 2 });
        for i in 0..10 {
            cache.put(format!("/groups/g{i}"), document("x")).await;
        }

        assert!(cache.entry_count().await <= 2);
    }

    #[tokio::test]
    async fn test_get_or_fetch_reports_fetch_then_hit() {
        let cache = DocumentCache::new(CachePolicy::Unbounded);

        let first = cache
            .get_or_fetch("/groups/g1", async { Ok(document("prod")) })
            .await
            .unwrap();
        assert!(first.fetched);

        let second = cache
            .get_or_fetch("/groups/g1", async { Ok(document("other")) })
            .await
            .unwrap();
        assert!(!second.fetched);
        assert_eq!(second.document, document("prod"));
    }

    #[tokio::test]
    async fn test_get_or_fetch_does_not_cache_failures() {
        let cache = DocumentCache::new(CachePolicy::Unbounded);

        let result = cache
            .get_or_fetch("/groups/g1", async {
                Err(TransportError::Network {
                    message: "connection reset".to_string(),
                })
            })
            .await;
        assert!(matches!(result, Err(TransportError::Network { .. })));
        assert!(cache.get("/groups/g1").await.is_none());

        let retry = cache
            .get_or_fetch("/groups/g1", async { Ok(document("prod")) })
            .await
            .unwrap();
        assert!(retry.fetched);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_get_or_fetch_coalesces_concurrent_misses() {
        let cache = DocumentCache::new(CachePolicy::Unbounded);
        let calls = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..16 {
            let cache = cache.clone();
            let calls = Arc::clone(&calls);
            handles.push(tokio::spawn(async move {
                cache
                    .get_or_fetch("/groups/g1", async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(20)).await;
                        Ok(document("prod"))
                    })
                    .await
                    .unwrap()
                    .document
            }));
        }

        for handle in handles {
            assert_eq!(handle.await.unwrap(), document("prod"));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
