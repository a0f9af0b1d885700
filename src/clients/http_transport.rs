//! HTTP transport for the MMS public API.
//!
//! This module provides [`HttpTransport`], the production
//! [`Transport`] implementation. It owns URL construction, credentials,
//! default headers, status-code classification, and the retry loop, so none
//! of those concerns leak into the caching client.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;

use crate::clients::errors::TransportError;
use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::HttpResponse;
use crate::clients::transport::{Document, Transport};
use crate::config::{ApiKey, ApiUser, MmsConfig};

/// Fixed retry wait time in seconds when no `Retry-After` is given.
pub const RETRY_WAIT_TIME: u64 = 1;

/// Crate version from Cargo.toml.
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP transport for the MMS public API.
///
/// The transport handles:
/// - URL construction: `{base_url}/api/public/{version}{path}`
/// - Credentials on every request
/// - Default headers including User-Agent and Accept
/// - Status classification into [`TransportError`] variants
/// - Retries for 429 and 500 responses when `tries > 1`
///
/// # Thread Safety
///
/// `HttpTransport` is `Send + Sync`.
///
/// # Example
///
/// ```rust,ignore
/// use mms::{ApiKey, ApiUser, MmsConfig};
/// use mms::clients::{HttpTransport, Transport};
///
/// let config = MmsConfig::builder()
///     .api_user(ApiUser::new("ops@example.com")?)
///     .api_key(ApiKey::new("api-key")?)
///     .build()?;
///
/// let transport = HttpTransport::new(&config)?;
/// let document = transport.fetch("/groups").await?;
/// ```
#[derive(Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_uri: String,
    base_path: String,
    default_headers: HashMap<String, String>,
    api_user: ApiUser,
    api_key: ApiKey,
    tries: u32,
}

// Verify HttpTransport is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpTransport>();
};

impl HttpTransport {
    /// Creates a new HTTP transport from the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Network`] if the underlying HTTP client
    /// cannot be created (e.g. TLS initialization failure).
    pub fn new(config: &MmsConfig) -> Result<Self, TransportError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}mms-api v{CLIENT_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            base_uri: config.base_url().as_ref().to_string(),
            base_path: config.api_version().base_path(),
            default_headers,
            api_user: config.api_user().clone(),
            api_key: config.api_key().clone(),
            tries: config.tries(),
        })
    }

    /// Returns the base URI (scheme and host) for this transport.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Returns the versioned base path (e.g. `/api/public/v1.0`).
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Returns the default headers sent with every request.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends a request and returns the successful response.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if validation fails, the network fails, the
    /// service answers with a non-2xx status, retries are exhausted, or a
    /// successful body is not valid JSON.
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        request.verify()?;

        let url = format!("{}{}{}", self.base_uri, self.base_path, request.path);

        let mut tries: u32 = 0;
        loop {
            tries += 1;

            let mut req_builder = self
                .client
                .get(&url)
                .basic_auth(self.api_user.as_ref(), Some(self.api_key.as_ref()));

            for (key, value) in &self.default_headers {
                req_builder = req_builder.header(key, value);
            }

            tracing::debug!(path = %request.path, attempt = tries, "GET");
            let res = req_builder.send().await?;

            let code = res.status().as_u16();
            let res_headers = Self::parse_response_headers(res.headers());
            let body_text = res.text().await?;

            let ok = (200..=299).contains(&code);
            let body = Self::parse_body(&body_text, ok)?;
            let response = HttpResponse::new(code, res_headers, body);

            if response.is_ok() {
                return Ok(response);
            }

            let path = request.path.clone();
            match code {
                401 | 403 => return Err(TransportError::Unauthorized { path, code }),
                404 => return Err(TransportError::NotFound { path }),
                _ => {}
            }

            let error_message = Self::serialize_error(&response);

            let should_retry = code == 429 || code == 500;
            if !should_retry || tries >= request.tries {
                if should_retry && request.tries > 1 {
                    return Err(TransportError::MaxRetries {
                        path,
                        code,
                        tries: request.tries,
                        message: error_message,
                    });
                }
                return Err(TransportError::Status {
                    path,
                    code,
                    message: error_message,
                    error_reference: response.request_id().map(String::from),
                });
            }

            let delay = Self::calculate_retry_delay(&response, code);
            tracing::warn!(
                path = %request.path,
                status = code,
                attempt = tries,
                "Retrying MMS request in {:?}",
                delay
            );
            tokio::time::sleep(delay).await;
        }
    }

    /// Parses a body. Successful responses must be JSON; error bodies fall
    /// back to the raw text.
    fn parse_body(body_text: &str, ok: bool) -> Result<serde_json::Value, TransportError> {
        if body_text.trim().is_empty() {
            return Ok(serde_json::json!({}));
        }

        match serde_json::from_str(body_text) {
            Ok(value) => Ok(value),
            Err(e) if ok => Err(TransportError::Decode {
                message: e.to_string(),
            }),
            Err(_) => Ok(serde_json::json!({ "raw_body": body_text })),
        }
    }

    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    fn calculate_retry_delay(response: &HttpResponse, status: u16) -> Duration {
        // Retry-After only applies to 429
        if status == 429 {
            if let Some(delay) = response
                .retry_request_after
                .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
            {
                return delay;
            }
        }
        Duration::from_secs(RETRY_WAIT_TIME)
    }

    fn serialize_error(response: &HttpResponse) -> String {
        let mut error_body = serde_json::Map::new();

        if let Some(detail) = response.error_detail() {
            error_body.insert("detail".to_string(), serde_json::json!(detail));
        }
        if let Some(error_code) = response.body.get("errorCode") {
            error_body.insert("errorCode".to_string(), error_code.clone());
        }
        if let Some(raw) = response.body.get("raw_body") {
            error_body.insert("raw_body".to_string(), raw.clone());
        }
        if let Some(request_id) = response.request_id() {
            error_body.insert(
                "error_reference".to_string(),
                serde_json::json!(format!(
                    "If you report this error, please include this id: {request_id}."
                )),
            );
        }

        serde_json::to_string(&error_body).unwrap_or_else(|_| "{}".to_string())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(&self, path: &str) -> Result<Document, TransportError> {
        let request = HttpRequest::builder(path).tries(self.tries).build()?;
        let response = self.request(request).await?;
        Document::try_from(response.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_test_config() -> MmsConfig {
        MmsConfig::builder()
            .api_user(ApiUser::new("ops@example.com").unwrap())
            .api_key(ApiKey::new("test-api-key").unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_transport_construction_from_config() {
        let transport = HttpTransport::new(&create_test_config()).unwrap();

        assert_eq!(transport.base_uri(), "https://cloud.mongodb.com");
        assert_eq!(transport.base_path(), "/api/public/v1.0");
    }

    #[test]
    fn test_user_agent_header_format() {
        let transport = HttpTransport::new(&create_test_config()).unwrap();

        let user_agent = transport.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("mms-api v"));
        assert!(user_agent.contains("Rust"));
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let config = MmsConfig::builder()
            .api_user(ApiUser::new("ops@example.com").unwrap())
            .api_key(ApiKey::new("test-api-key").unwrap())
            .user_agent_prefix("fleet-audit/2.0")
            .build()
            .unwrap();
        let transport = HttpTransport::new(&config).unwrap();

        let user_agent = transport.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("fleet-audit/2.0 | mms-api v"));
    }

    #[test]
    fn test_accept_header_is_json() {
        let transport = HttpTransport::new(&create_test_config()).unwrap();

        assert_eq!(
            transport.default_headers().get("Accept"),
            Some(&"application/json".to_string())
        );
    }

    #[test]
    fn test_parse_body_rejects_malformed_success_bodies() {
        let result = HttpTransport::parse_body("{not json", true);
        assert!(matches!(result, Err(TransportError::Decode { .. })));
    }

    #[test]
    fn test_parse_body_keeps_raw_error_bodies() {
        let body = HttpTransport::parse_body("<html>bad gateway</html>", false).unwrap();
        assert_eq!(body, json!({"raw_body": "<html>bad gateway</html>"}));
        assert_eq!(HttpTransport::parse_body("  ", true).unwrap(), json!({}));
    }

    #[test]
    fn test_serialize_error_includes_detail_and_reference() {
        let mut headers = HashMap::new();
        headers.insert("x-request-id".to_string(), vec!["req-42".to_string()]);
        let response = HttpResponse::new(
            400,
            headers,
            json!({"detail": "Invalid page number", "errorCode": "INVALID_PAGE"}),
        );

        let message = HttpTransport::serialize_error(&response);
        assert!(message.contains("Invalid page number"));
        assert!(message.contains("INVALID_PAGE"));
        assert!(message.contains("req-42"));
    }

    #[test]
    fn test_retry_delay_honors_retry_after_for_429_only() {
        let mut headers = HashMap::new();
        headers.insert("retry-after".to_string(), vec!["0.25".to_string()]);
        let response = HttpResponse::new(429, headers, json!({}));

        assert_eq!(
            HttpTransport::calculate_retry_delay(&response, 429),
            Duration::from_millis(250)
        );
        assert_eq!(
            HttpTransport::calculate_retry_delay(&response, 500),
            Duration::from_secs(RETRY_WAIT_TIME)
        );
    }

    #[test]
    fn test_retry_delay_falls_back_on_unrepresentable_values() {
        for secs in [-1.0, f64::NAN, f64::INFINITY] {
            let mut response = HttpResponse::new(429, HashMap::new(), json!({}));
            response.retry_request_after = Some(secs);

            assert_eq!(
                HttpTransport::calculate_retry_delay(&response, 429),
                Duration::from_secs(RETRY_WAIT_TIME)
            );
        }
    }
}
