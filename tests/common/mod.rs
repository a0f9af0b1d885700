//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use mms::{CachePolicy, Client, Document, Transport, TransportError};
use serde_json::Value;

/// In-memory transport serving fixed documents by path and recording calls.
#[derive(Default)]
pub struct StubTransport {
    documents: Mutex<HashMap<String, Value>>,
    calls: Mutex<Vec<String>>,
    failures_left: AtomicUsize,
    delay: Option<Duration>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays every fetch, widening the window for concurrent callers.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Fails the next `count` fetches with a network error.
    pub fn failing_first(self, count: usize) -> Self {
        self.failures_left.store(count, Ordering::SeqCst);
        self
    }

    pub fn serve(self, path: &str, body: Value) -> Self {
        self.documents
            .lock()
            .unwrap()
            .insert(path.to_string(), body);
        self
    }

    /// Total number of fetches, successful or not.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls_to(&self, path: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.as_str() == path)
            .count()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn fetch(&self, path: &str) -> Result<Document, TransportError> {
        self.calls.lock().unwrap().push(path.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let failing = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(TransportError::Network {
                message: "connection reset by peer".to_string(),
            });
        }

        let body = self.documents.lock().unwrap().get(path).cloned();
        match body {
            Some(body) => Document::try_from(body),
            None => Err(TransportError::NotFound {
                path: path.to_string(),
            }),
        }
    }
}

/// Builds an unbounded client over `transport`, keeping a handle for assertions.
pub fn client_over(transport: StubTransport) -> (Client, Arc<StubTransport>) {
    let transport = Arc::new(transport);
    let client = Client::new(Arc::clone(&transport), CachePolicy::Unbounded);
    (client, transport)
}

/// Installs a test subscriber honoring `RUST_LOG`; safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
