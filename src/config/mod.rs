//! Configuration types for the MMS API client.
//!
//! This module provides the configuration used to build a
//! [`Client`](crate::clients::Client) backed by the HTTP transport.
//!
//! # Overview
//!
//! - [`MmsConfig`]: All client settings
//! - [`MmsConfigBuilder`]: Builder for [`MmsConfig`]
//! - [`ApiUser`], [`ApiKey`]: Validated API credentials (the key is masked in debug output)
//! - [`BaseUrl`]: Validated service URL
//! - [`ApiVersion`]: Public API version
//!
//! # Example
//!
//! ```rust
//! use mms::{ApiKey, ApiUser, CachePolicy, MmsConfig};
//! use std::time::Duration;
//!
//! let config = MmsConfig::builder()
//!     .api_user(ApiUser::new("ops@example.com").unwrap())
//!     .api_key(ApiKey::new("api-key").unwrap())
//!     .cache_policy(CachePolicy::Expiring {
//!         ttl: Duration::from_secs(60),
//!         max_capacity: Some(1_000),
//!     })
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_url().as_ref(), "https://cloud.mongodb.com");
//! ```

mod newtypes;
mod version;

use std::time::Duration;

pub use newtypes::{ApiKey, ApiUser, BaseUrl};
pub use version::ApiVersion;

use crate::clients::CachePolicy;
use crate::error::ConfigError;

/// Default timeout applied to each HTTP request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the MMS API client.
///
/// # Thread Safety
///
/// `MmsConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct MmsConfig {
    api_user: ApiUser,
    api_key: ApiKey,
    base_url: BaseUrl,
    api_version: ApiVersion,
    cache_policy: CachePolicy,
    tries: u32,
    request_timeout: Duration,
    user_agent_prefix: Option<String>,
}

impl MmsConfig {
    /// Creates a new builder for constructing an `MmsConfig`.
    #[must_use]
    pub fn builder() -> MmsConfigBuilder {
        MmsConfigBuilder::new()
    }

    /// Returns the API user.
    #[must_use]
    pub const fn api_user(&self) -> &ApiUser {
        &self.api_user
    }

    /// Returns the API key.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Returns the service base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the API version.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Returns the document cache policy.
    #[must_use]
    pub const fn cache_policy(&self) -> CachePolicy {
        self.cache_policy
    }

    /// Returns how many times the transport attempts a request that fails
    /// with 429 or 500.
    #[must_use]
    pub const fn tries(&self) -> u32 {
        self.tries
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify MmsConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<MmsConfig>();
};

/// Builder for constructing [`MmsConfig`] instances.
///
/// Required fields are `api_user` and `api_key`.
///
/// # Defaults
///
/// - `base_url`: `https://cloud.mongodb.com`
/// - `api_version`: latest (`v1.0`)
/// - `cache_policy`: [`CachePolicy::Unbounded`]
/// - `tries`: 1 (no retries)
/// - `request_timeout`: 30 seconds
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct MmsConfigBuilder {
    api_user: Option<ApiUser>,
    api_key: Option<ApiKey>,
    base_url: Option<BaseUrl>,
    api_version: Option<ApiVersion>,
    cache_policy: Option<CachePolicy>,
    tries: Option<u32>,
    request_timeout: Option<Duration>,
    user_agent_prefix: Option<String>,
}

impl MmsConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API user (required).
    #[must_use]
    pub fn api_user(mut self, user: ApiUser) -> Self {
        self.api_user = Some(user);
        self
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Sets the service base URL.
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API version.
    #[must_use]
    pub fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Sets the document cache policy.
    #[must_use]
    pub const fn cache_policy(mut self, policy: CachePolicy) -> Self {
        self.cache_policy = Some(policy);
        self
    }

    /// Sets the number of attempts for requests failing with 429 or 500.
    #[must_use]
    pub const fn tries(mut self, tries: u32) -> Self {
        self.tries = Some(tries);
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`MmsConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `api_user` or
    /// `api_key` are not set, and [`ConfigError::InvalidTries`] if `tries`
    /// is zero.
    pub fn build(self) -> Result<MmsConfig, ConfigError> {
        let api_user = self
            .api_user
            .ok_or(ConfigError::MissingRequiredField { field: "api_user" })?;
        let api_key = self
            .api_key
            .ok_or(ConfigError::MissingRequiredField { field: "api_key" })?;

        let tries = self.tries.unwrap_or(1);
        if tries == 0 {
            return Err(ConfigError::InvalidTries { tries });
        }

        Ok(MmsConfig {
            api_user,
            api_key,
            base_url: self.base_url.unwrap_or_default(),
            api_version: self.api_version.unwrap_or_else(ApiVersion::latest),
            cache_policy: self.cache_policy.unwrap_or_default(),
            tries,
            request_timeout: self.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT),
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
