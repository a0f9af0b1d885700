//! The transport seam and the document type it produces.
//!
//! A [`Transport`] turns a request path into a decoded [`Document`]. The
//! [`Client`](crate::clients::Client) only ever talks to this trait, which
//! keeps HTTP details, authentication, and retries out of the caching and
//! resource layers and lets tests substitute an in-memory implementation.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::clients::TransportError;

/// Fetches raw documents by path.
///
/// Implementations must be shareable across tasks; the client holds one
/// behind an `Arc` for its whole lifetime.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetches the document stored at `path` (e.g. `/groups/g1/hosts/abc`).
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] distinguishing not-found, unauthorized,
    /// network, and decode failures.
    async fn fetch(&self, path: &str) -> Result<Document, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn fetch(&self, path: &str) -> Result<Document, TransportError> {
        (**self).fetch(path).await
    }
}

/// A decoded response body: a JSON object keyed by wire field names.
///
/// Documents are immutable and cheap to clone, so the same body can live in
/// the cache and be handed to any number of loads.
///
/// # Example
///
/// ```rust
/// use mms::clients::Document;
/// use serde_json::json;
///
/// let document = Document::try_from(json!({"hostname": "node1", "port": 27017})).unwrap();
/// assert_eq!(document.get("port"), Some(&json!(27017)));
/// assert!(Document::try_from(json!([1, 2, 3])).is_err());
/// ```
#[derive(Clone, PartialEq)]
pub struct Document(Arc<Value>);

impl Document {
    /// Returns the value stored under `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the whole body as a JSON value (always an object).
    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Returns the number of top-level fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.as_object().map_or(0, Map::len)
    }

    /// Returns `true` if the document has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Map<String, Value>> for Document {
    fn from(map: Map<String, Value>) -> Self {
        Self(Arc::new(Value::Object(map)))
    }
}

impl TryFrom<Value> for Document {
    type Error = TransportError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self::from(map)),
            other => Err(TransportError::Decode {
                message: format!("expected a JSON object, found {}", json_kind(&other)),
            }),
        }
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Document").field(&self.0).finish()
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
