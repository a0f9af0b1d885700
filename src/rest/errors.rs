//! Resource-level error types.
//!
//! A failed load surfaces as a [`ResourceError`]. Transport failures are
//! classified into the resource taxonomy:
//!
//! - **not found**: [`ResourceError::NotFound`]
//! - **unauthorized**: [`ResourceError::Unauthorized`]
//! - **decode failure**: [`ResourceError::Decode`], for bodies that are not
//!   documents and for documents missing or mistyping a required field
//! - **anything else**: [`ResourceError::Transport`], carrying the original
//!   [`TransportError`]
//!
//! No error poisons a resource. After any of these the resource is still
//! unloaded and the next access tries again.
//!
//! # Example
//!
//! ```rust,ignore
//! use mms::rest::ResourceError;
//!
//! let host = client.host("5196d3628d022db4cbc26d9e", "680ab316473d6b28f966364b947134fc");
//! match host.hostname().await {
//!     Ok(hostname) => println!("{hostname}"),
//!     Err(ResourceError::NotFound { resource, id }) => println!("{resource} {id} is gone"),
//!     Err(e) => println!("load failed: {e}"),
//! }
//! ```

use thiserror::Error;

use crate::clients::TransportError;

/// Errors returned when resolving, fetching, or mapping a resource.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResourceError {
    /// The remote service has no such resource.
    #[error("{resource} with id {id} not found")]
    NotFound {
        /// The resource type name.
        resource: &'static str,
        /// The id (or list path) that was requested.
        id: String,
    },

    /// The credentials were rejected.
    #[error("Not authorized to read {resource} at {path}")]
    Unauthorized {
        /// The resource type name.
        resource: &'static str,
        /// The fetch path that was rejected.
        path: String,
    },

    /// The document could not be mapped onto the resource's fields.
    #[error("Failed to decode {resource}: {message}")]
    Decode {
        /// The resource type name.
        resource: &'static str,
        /// What was missing or mistyped.
        message: String,
    },

    /// No path template matches the ids the resource was built with.
    #[error("Cannot resolve path for {resource}::{operation} with provided IDs")]
    PathResolutionFailed {
        /// The resource type name.
        resource: &'static str,
        /// The operation being resolved.
        operation: &'static str,
    },

    /// An id cannot be placed in a fetch path.
    #[error("Invalid resource id '{id}'")]
    InvalidId {
        /// The rejected id.
        id: String,
    },

    /// Any other transport failure.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl ResourceError {
    /// Classifies a transport failure for the given resource.
    #[must_use]
    pub fn from_transport(error: TransportError, resource: &'static str, id: &str) -> Self {
        match error {
            TransportError::NotFound { .. } => Self::NotFound {
                resource,
                id: id.to_string(),
            },
            TransportError::Unauthorized { path, .. } => Self::Unauthorized { resource, path },
            TransportError::Decode { message } => Self::Decode { resource, message },
            other => Self::Transport(other),
        }
    }

    /// Returns `true` for [`ResourceError::NotFound`].
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

// Verify ResourceError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceError>();
};
