//! HTTP response type for the MMS transport.

use std::collections::HashMap;

/// An HTTP response from the MMS API.
///
/// Contains the status code, headers, the parsed body, and the `Retry-After`
/// hint used by the retry loop.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, lowercased (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed response body.
    pub body: serde_json::Value,
    /// Seconds to wait before retrying (from `Retry-After` header).
    ///
    /// Only finite, non-negative values are kept.
    pub retry_request_after: Option<f64>,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`, parsing the `Retry-After` header.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: serde_json::Value) -> Self {
        let retry_request_after = headers
            .get("retry-after")
            .and_then(|values| values.first())
            .and_then(|value| value.trim().parse::<f64>().ok())
            .filter(|secs| secs.is_finite() && *secs >= 0.0);

        Self {
            code,
            headers,
            body,
            retry_request_after,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the `X-Request-Id` header value, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.headers
            .get("x-request-id")
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the service's error detail (`detail` or `reason` field), if any.
    ///
    /// MMS error bodies look like
    /// `{"detail": "...", "error": 404, "errorCode": "...", "reason": "Not Found"}`.
    #[must_use]
    pub fn error_detail(&self) -> Option<&str> {
        self.body
            .get("detail")
            .or_else(|| self.body.get("reason"))
            .and_then(serde_json::Value::as_str)
    }
}
