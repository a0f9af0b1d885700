//! Transport, caching, and the shared client.
//!
//! This module holds everything between a resource and the network:
//!
//! - [`Transport`]: the `fetch(path)` seam, producing [`Document`]s
//! - [`HttpTransport`]: the reqwest-backed production transport
//! - [`HttpRequest`] / [`HttpResponse`]: the transport's request and response types
//! - [`DocumentCache`]: path-keyed document memoization with a [`CachePolicy`]
//! - [`Client`]: the caching gateway and resource factory
//!
//! # Example
//!
//! ```rust,ignore
//! use mms::{ApiKey, ApiUser, CachePolicy, Client, MmsConfig};
//! use std::time::Duration;
//!
//! let config = MmsConfig::builder()
//!     .api_user(ApiUser::new("ops@example.com")?)
//!     .api_key(ApiKey::new("api-key")?)
//!     .cache_policy(CachePolicy::Expiring {
//!         ttl: Duration::from_secs(60),
//!         max_capacity: Some(10_000),
//!     })
//!     .build()?;
//!
//! let client = Client::from_config(&config)?;
//! let document = client.get("/groups/5196d3628d022db4cbc26d9e").await?;
//! ```
//!
//! # Retry Behavior
//!
//! [`HttpTransport`] retries transient failures when the configured `tries`
//! is greater than 1:
//!
//! - **429 (Rate Limited)**: waits for `Retry-After`, or 1 second if absent
//! - **500 (Server Error)**: waits a fixed 1 second
//! - **Other errors**: returned immediately
//!
//! The [`Client`] itself never retries.

mod cache;
mod client;
mod errors;
mod http_request;
mod http_response;
mod http_transport;
mod transport;

pub use cache::{CacheLookup, CachePolicy, DocumentCache};
pub use client::Client;
pub use errors::{InvalidHttpRequestError, TransportError};
pub use http_request::{HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;
pub use http_transport::{HttpTransport, CLIENT_VERSION, RETRY_WAIT_TIME};
pub use transport::{Document, Transport};
