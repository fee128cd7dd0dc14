//! Mock implementations for testing.
//!
//! Provides a spy transport that replays queued responses and records
//! every request it receives.

use crate::errors::TransportError;
use crate::transport::{FileUpload, HttpRequest, HttpResponse, HttpTransport, RequestBody};
use async_trait::async_trait;
use http::HeaderMap;
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Mock response configuration
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// Response body
    pub body: String,
    /// HTTP status code
    pub status: u16,
    /// Transport failure to return instead of a response
    pub error: Option<TransportError>,
}

impl MockResponse {
    /// Create a successful JSON response
    pub fn json<T: Serialize>(data: &T) -> Self {
        Self::ok(serde_json::to_string(data).unwrap_or_default())
    }

    /// Create a successful response with raw body
    pub fn ok(body: impl Into<String>) -> Self {
        Self::with_status(200, body)
    }

    /// Create a response with any status
    pub fn with_status(status: u16, body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            status,
            error: None,
        }
    }

    /// Create a transport failure; no response is produced
    pub fn error(error: TransportError) -> Self {
        Self {
            body: String::new(),
            status: 0,
            error: Some(error),
        }
    }
}

/// Recorded request for verification
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Request method
    pub method: String,
    /// Request URL, query string included
    pub url: Url,
    /// Request headers
    pub headers: HeaderMap,
    /// Request body
    pub body: RequestBody,
    /// Timeout applied to the request
    pub timeout: Duration,
}

impl RecordedRequest {
    /// URL path
    pub fn path(&self) -> &str {
        self.url.path()
    }

    /// First value of a query parameter
    pub fn query_param(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    }

    /// Header value as text
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Form or multipart text fields, in order
    pub fn fields(&self) -> &[(String, String)] {
        match &self.body {
            RequestBody::Empty => &[],
            RequestBody::Form(fields) => fields,
            RequestBody::Multipart { fields, .. } => fields,
        }
    }

    /// Value of one body field
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields()
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Uploaded files
    pub fn files(&self) -> &[FileUpload] {
        match &self.body {
            RequestBody::Multipart { files, .. } => files,
            _ => &[],
        }
    }
}

/// Mock HTTP transport for testing
pub struct MockHttpTransport {
    /// Queue of responses to return
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    /// Recorded requests
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    /// Default response if queue is empty
    default_response: Option<MockResponse>,
}

impl MockHttpTransport {
    /// Create a new mock transport
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            default_response: None,
        }
    }

    /// Add a response to the queue
    pub fn add_response(self, response: MockResponse) -> Self {
        self.responses.lock().push_back(response);
        self
    }

    /// Add multiple responses
    pub fn add_responses(self, responses: impl IntoIterator<Item = MockResponse>) -> Self {
        self.responses.lock().extend(responses);
        self
    }

    /// Set default response when queue is empty
    pub fn with_default_response(mut self, response: MockResponse) -> Self {
        self.default_response = Some(response);
        self
    }

    /// Get recorded requests
    pub fn recorded_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    /// Get the last recorded request
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.lock().last().cloned()
    }

    /// Number of requests received
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    /// Get remaining response count
    pub fn remaining_responses(&self) -> usize {
        self.responses.lock().len()
    }

    fn record_request(&self, request: &HttpRequest) {
        self.requests.lock().push(RecordedRequest {
            method: request.method.to_string(),
            url: request.url.clone(),
            headers: request.headers.clone(),
            body: request.body.clone(),
            timeout: request.timeout,
        });
    }

    fn next_response(&self) -> Option<MockResponse> {
        let mut queue = self.responses.lock();
        queue.pop_front().or_else(|| self.default_response.clone())
    }
}

impl Default for MockHttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for MockHttpTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.record_request(&request);

        let response = self.next_response().ok_or_else(|| {
            TransportError::ConnectionFailed {
                message: "No mock response configured".to_string(),
            }
        })?;

        if let Some(error) = response.error {
            return Err(error);
        }

        Ok(HttpResponse::new(response.status, response.body))
    }
}

impl std::fmt::Debug for MockHttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockHttpTransport")
            .field("pending_responses", &self.responses.lock().len())
            .field("recorded_requests", &self.requests.lock().len())
            .finish()
    }
}
