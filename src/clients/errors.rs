//! Transport error types.
//!
//! # Error Handling
//!
//! Every failure a [`Transport`](crate::clients::Transport) can report is a
//! [`TransportError`]:
//!
//! - [`TransportError::NotFound`]: the service answered 404
//! - [`TransportError::Unauthorized`]: the service answered 401 or 403
//! - [`TransportError::Status`]: any other non-2xx response
//! - [`TransportError::MaxRetries`]: 429/500 responses outlasted the configured tries
//! - [`TransportError::Network`]: connection, TLS, or timeout failure
//! - [`TransportError::Decode`]: the body was not a JSON object
//! - [`TransportError::InvalidRequest`]: the request failed validation before sending
//!
//! `TransportError` is `Clone` so that one failed fetch can be handed to every
//! caller that was waiting on the same cache key.
//!
//! # Example
//!
//! ```rust,ignore
//! use mms::clients::TransportError;
//!
//! match client.get("/groups/5196d3628d022db4cbc26d9e").await {
//!     Ok(document) => println!("{document:?}"),
//!     Err(TransportError::NotFound { path }) => println!("nothing at {path}"),
//!     Err(TransportError::Unauthorized { .. }) => println!("check the API key"),
//!     Err(e) => println!("fetch failed: {e}"),
//! }
//! ```

use thiserror::Error;

/// Error returned when a request fails validation before it is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// The path is empty or not absolute.
    #[error("Invalid request path '{path}'. Paths must start with '/'.")]
    InvalidPath {
        /// The rejected path.
        path: String,
    },

    /// The request was configured with zero attempts.
    #[error("A request needs at least one attempt.")]
    NoTries,
}

/// Unified error type for document fetches.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// No document exists at the path (HTTP 404).
    #[error("No document found at {path}")]
    NotFound {
        /// The requested path.
        path: String,
    },

    /// The credentials were rejected (HTTP 401/403).
    #[error("Unauthorized request to {path} (status {code})")]
    Unauthorized {
        /// The requested path.
        path: String,
        /// The HTTP status code.
        code: u16,
    },

    /// Any other non-successful response.
    #[error("Request to {path} failed with status {code}: {message}")]
    Status {
        /// The requested path.
        path: String,
        /// The HTTP status code.
        code: u16,
        /// Serialized error body.
        message: String,
        /// Reference ID for error reporting (from X-Request-Id header).
        error_reference: Option<String>,
    },

    /// Retry attempts were exhausted on 429/500 responses.
    #[error("Exceeded maximum retry count of {tries} for {path}. Last message: {message}")]
    MaxRetries {
        /// The requested path.
        path: String,
        /// The HTTP status code of the last response.
        code: u16,
        /// The number of attempts made.
        tries: u32,
        /// Serialized error body of the last response.
        message: String,
    },

    /// Network, TLS, or timeout failure.
    #[error("Network error: {message}")]
    Network {
        /// Description of the underlying failure.
        message: String,
    },

    /// The response body could not be decoded into a document.
    #[error("Failed to decode response: {message}")]
    Decode {
        /// Description of the decoding failure.
        message: String,
    },

    /// The request failed validation.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),
}

impl TransportError {
    /// Returns `true` for [`TransportError::NotFound`].
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` for [`TransportError::Unauthorized`].
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        Self::Network {
            message: error.to_string(),
        }
    }
}

// Verify TransportError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TransportError>();
};
