//! MMS public API version definitions.
//!
//! This module provides the [`ApiVersion`] enum that selects the
//! `/api/public/{version}` prefix every request path is mounted under.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// MMS public API version.
///
/// # Example
///
/// ```rust
/// use mms::ApiVersion;
///
/// let version = ApiVersion::latest();
/// assert_eq!(version.to_string(), "v1.0");
///
/// let version: ApiVersion = "v1.0".parse().unwrap();
/// assert_eq!(version, ApiVersion::V1_0);
/// assert_eq!(version.base_path(), "/api/public/v1.0");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ApiVersion {
    /// API version v1.0.
    V1_0,
    /// Custom version string (`vMAJOR.MINOR`) for versions not known to this crate.
    Custom(String),
}

impl ApiVersion {
    /// Returns the latest known API version.
    #[must_use]
    pub const fn latest() -> Self {
        Self::V1_0
    }

    /// Returns `true` for versions known to this crate.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }

    /// Returns the path prefix resource paths are appended to.
    #[must_use]
    pub fn base_path(&self) -> String {
        format!("/api/public/{self}")
    }

    fn is_valid_version_format(s: &str) -> bool {
        let Some(rest) = s.strip_prefix('v') else {
            return false;
        };
        let mut parts = rest.split('.');
        let (Some(major), Some(minor), None) = (parts.next(), parts.next(), parts.next()) else {
            return false;
        };
        [major, minor]
            .iter()
            .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()))
    }
}

impl Default for ApiVersion {
    fn default() -> Self {
        Self::latest()
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V1_0 => f.write_str("v1.0"),
            Self::Custom(s) => f.write_str(s),
        }
    }
}

impl FromStr for ApiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();

        match s.as_str() {
            "v1.0" => Ok(Self::V1_0),
            _ if Self::is_valid_version_format(&s) => Ok(Self::Custom(s)),
            _ => Err(ConfigError::InvalidApiVersion { version: s }),
        }
    }
}
