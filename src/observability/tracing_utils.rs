//! Tracing helpers for API requests.

use std::time::{Duration, Instant};
use tracing::{span, Level, Span};

/// Create a request span with common attributes
pub fn create_request_span(method: &str, path: &str) -> Span {
    span!(
        Level::INFO,
        "mailgun_request",
        method = %method,
        path = %path,
        otel.kind = "client",
        otel.status_code = tracing::field::Empty,
        http.status_code = tracing::field::Empty,
        error.message = tracing::field::Empty,
    )
}

/// Record the HTTP status on a span
pub fn record_status(span: &Span, status: u16) {
    span.record("http.status_code", status);
    span.record("otel.status_code", if status == 200 { "OK" } else { "ERROR" });
}

/// Record an error on a span
pub fn record_error(span: &Span, error: &str) {
    span.record("otel.status_code", "ERROR");
    span.record("error.message", error);
}

/// Request-scoped timing
#[derive(Debug, Clone)]
pub struct RequestTrace {
    /// Start time
    pub start_time: Instant,
    /// HTTP method
    pub method: String,
    /// Endpoint path
    pub path: String,
}

impl RequestTrace {
    /// Start timing a request
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            start_time: Instant::now(),
            method: method.into(),
            path: path.into(),
        }
    }

    /// Get elapsed time
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Get elapsed milliseconds
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed().as_millis() as u64
    }
}
