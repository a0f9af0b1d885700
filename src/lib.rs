//! # MMS API Rust Client
//!
//! A lazy-loading, caching object model for the MMS fleet-management API:
//! groups, hosts, clusters, backup snapshots, and restore jobs.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`MmsConfig`] and [`MmsConfigBuilder`]
//! - Validated newtypes for API credentials and the service URL
//! - A pluggable [`Transport`] seam with a reqwest-backed [`HttpTransport`]
//! - A shared [`Client`] that memoizes documents by path with a [`CachePolicy`]
//! - [`Lazy`] resources that fetch on first field access and never again
//!
//! ## Quick Start
//!
//! ```rust
//! use mms::{ApiKey, ApiUser, ApiVersion, MmsConfig};
//!
//! let config = MmsConfig::builder()
//!     .api_user(ApiUser::new("ops@example.com").unwrap())
//!     .api_key(ApiKey::new("your-api-key").unwrap())
//!     .api_version(ApiVersion::latest())
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Lazy Resources
//!
//! Building a resource costs nothing; the first accessor fetches its
//! document through the client's cache.
//!
//! ```rust,ignore
//! use mms::Client;
//!
//! let client = Client::from_config(&config)?;
//! let host = client.host("5196d3628d022db4cbc26d9e", "680ab316473d6b28f966364b947134fc");
//!
//! assert!(!host.is_loaded());
//! println!("{} on port {}", host.hostname().await?, host.port().await?);
//! assert!(host.is_loaded());
//! ```
//!
//! ## Testing Against a Stub
//!
//! Any [`Transport`] can back a client, so tests can serve documents from memory:
//!
//! ```rust
//! use async_trait::async_trait;
//! use mms::{CachePolicy, Client, Document, Transport, TransportError};
//! use serde_json::json;
//!
//! struct Stub;
//!
//! #[async_trait]
//! impl Transport for Stub {
//!     async fn fetch(&self, _path: &str) -> Result<Document, TransportError> {
//!         Document::try_from(json!({"hostname": "node1", "port": 27017, "typeName": "REPLICA_PRIMARY"}))
//!     }
//! }
//!
//! # tokio_test::block_on(async {
//! let client = Client::new(Stub, CachePolicy::Unbounded);
//! let host = client.host("g1", "abc");
//! assert_eq!(host.name().await.unwrap(), "node1");
//! # });
//! ```
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events: cache hits, misses and loads at
//! `debug`, transport retries and unmappable documents at `warn`. It installs
//! no subscriber.

pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

// Re-export public types at crate root for convenience
pub use config::{ApiKey, ApiUser, ApiVersion, BaseUrl, MmsConfig, MmsConfigBuilder};
pub use error::ConfigError;

// Re-export client types
pub use clients::{
    CachePolicy, Client, Document, DocumentCache, HttpTransport, Transport, TransportError,
};

// Re-export resource types
pub use rest::resources::{Cluster, Group, Host, RestoreJob, Snapshot};
pub use rest::{Lazy, ListParams, ResourceError, ResourceId, ResourceList};
