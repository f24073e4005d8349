//! Transport abstraction for testability.
//!
//! The client never owns an HTTP stack. It is handed a [`Fetch`]
//! implementation at construction and issues every request through it, so
//! tests (and embedders with their own HTTP client) can substitute any
//! transport. A plain async closure works as a transport too.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::Mutex;

use async_trait::async_trait;

/// Error type a transport may fail with.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// An outbound GET request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Absolute URL including the encoded query string.
    pub url: String,
    /// Extra headers, sorted by name as they come from the configuration.
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    /// Looks up a header by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// A response handed back by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates an empty response with the given status.
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// A 200 response carrying `body` serialized as JSON.
    pub fn json(body: &serde_json::Value) -> Self {
        Self::new(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
    }

    /// Adds a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Replaces the body.
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Looks up a header by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

/// Capability to perform one HTTP GET.
///
/// Implementations should neither retry nor cache; the client relies on one
/// call per query. Cancellation is whatever the implementation supports;
/// dropping the returned future is the usual way.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Performs the request, failing only when no response was obtained.
    async fn fetch(&self, request: HttpRequest) -> Result<HttpResponse, BoxError>;
}

#[async_trait]
impl<F, Fut> Fetch for F
where
    F: Fn(HttpRequest) -> Fut + Send + Sync,
    Fut: Future<Output = Result<HttpResponse, BoxError>> + Send + 'static,
{
    async fn fetch(&self, request: HttpRequest) -> Result<HttpResponse, BoxError> {
        (self)(request).await
    }
}

// === Mock implementation for testing ===

#[derive(Debug, Clone)]
enum Scripted {
    Respond(HttpResponse),
    Fail(String),
}

/// Scripted transport for testing.
///
/// Replays queued outcomes in order, then falls back to a fixed response if
/// one was set. Every request is recorded.
///
/// # Example
///
/// ```
/// use appdir_client::{HttpResponse, MockFetch};
/// use serde_json::json;
///
/// let fetch = MockFetch::new()
///     .respond(HttpResponse::json(&json!({ "results": [] })))
///     .fail("connection reset");
/// ```
#[derive(Debug, Default)]
pub struct MockFetch {
    script: Mutex<VecDeque<Scripted>>,
    fallback: Option<HttpResponse>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockFetch {
    /// Create a mock with nothing scripted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that answers every request with `response`.
    pub fn always(response: HttpResponse) -> Self {
        Self {
            fallback: Some(response),
            ..Self::default()
        }
    }

    /// Queue a response.
    pub fn respond(self, response: HttpResponse) -> Self {
        self.push(Scripted::Respond(response));
        self
    }

    /// Queue a transport failure.
    pub fn fail(self, message: impl Into<String>) -> Self {
        self.push(Scripted::Fail(message.into()));
        self
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn push(&self, outcome: Scripted) {
        self.script
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push_back(outcome);
    }

    fn next_outcome(&self) -> Option<Scripted> {
        self.script
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front()
            .or_else(|| self.fallback.clone().map(Scripted::Respond))
    }
}

#[async_trait]
impl Fetch for MockFetch {
    async fn fetch(&self, request: HttpRequest) -> Result<HttpResponse, BoxError> {
        let url = request.url.clone();
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request);

        match self.next_outcome() {
            Some(Scripted::Respond(response)) => Ok(response),
            Some(Scripted::Fail(message)) => Err(message.into()),
            None => Err(format!("no scripted response for {url}").into()),
        }
    }
}
