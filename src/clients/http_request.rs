//! HTTP request type for the MMS transport.
//!
//! The object model is read-only, so every request is a `GET`. This module
//! provides the [`HttpRequest`] type and its builder.

use crate::clients::errors::InvalidHttpRequestError;

/// A `GET` request against the MMS public API.
///
/// The path is relative to the versioned API prefix and may already carry a
/// query string (list paths such as `/groups?pageNum=2` do).
///
/// # Example
///
/// ```rust
/// use mms::clients::HttpRequest;
///
/// let request = HttpRequest::builder("/groups/g1/hosts/abc")
///     .tries(3)
///     .build()
///     .unwrap();
///
/// assert_eq!(request.path, "/groups/g1/hosts/abc");
/// assert_eq!(request.tries, 3);
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// The path (relative to the API base path) for this request.
    pub path: String,
    /// Number of times to attempt the request (default: 1).
    pub tries: u32,
}

impl HttpRequest {
    /// Creates a new builder for the given path.
    #[must_use]
    pub fn builder(path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(path)
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the path is not absolute or
    /// `tries` is zero.
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if !self.path.starts_with('/') || self.path.len() < 2 {
            return Err(InvalidHttpRequestError::InvalidPath {
                path: self.path.clone(),
            });
        }

        if self.tries == 0 {
            return Err(InvalidHttpRequestError::NoTries);
        }

        Ok(())
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    path: String,
    tries: u32,
}

impl HttpRequestBuilder {
    fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            tries: 1,
        }
    }

    /// Sets the number of times to attempt the request.
    ///
    /// Default is 1 (no retries). Higher values retry 429 and 500 responses.
    #[must_use]
    pub const fn tries(mut self, tries: u32) -> Self {
        self.tries = tries;
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            path: self.path,
            tries: self.tries,
        };
        request.verify()?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_creates_valid_request() {
        let request = HttpRequest::builder("/groups").build().unwrap();

        assert_eq!(request.path, "/groups");
        assert_eq!(request.tries, 1);
    }

    #[test]
    fn test_verify_rejects_relative_and_empty_paths() {
        for path in ["", "/", "groups/g1"] {
            let result = HttpRequest::builder(path).build();
            assert!(
                matches!(result, Err(InvalidHttpRequestError::InvalidPath { .. })),
                "expected '{path}' to be rejected"
            );
        }
    }

    #[test]
    fn test_verify_rejects_zero_tries() {
        let result = HttpRequest::builder("/groups").tries(0).build();
        assert!(matches!(result, Err(InvalidHttpRequestError::NoTries)));
    }
}
