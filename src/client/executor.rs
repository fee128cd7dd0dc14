//! Single execution path shared by every service.

use crate::auth::AuthManager;
use crate::config::MailgunConfig;
use crate::errors::{MailgunError, MailgunResult, ResponseError};
use crate::observability::{
    create_request_span, mask_path, record_error, record_status, redact_url, RequestTrace,
};
use crate::transport::{HttpRequest, HttpResponse, HttpTransport, RequestBody};
use crate::types::{FieldMap, Resource, Sendable};
use http::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn, Instrument};

/// Builds, authenticates, sends and classifies API requests
#[derive(Clone)]
pub struct RequestExecutor {
    config: Arc<MailgunConfig>,
    auth: AuthManager,
    transport: Arc<dyn HttpTransport>,
}

impl RequestExecutor {
    /// Create a new executor
    pub fn new(config: Arc<MailgunConfig>, transport: Arc<dyn HttpTransport>) -> Self {
        let auth = AuthManager::new(config.clone());
        Self {
            config,
            auth,
            transport,
        }
    }

    /// Client configuration
    pub fn config(&self) -> &MailgunConfig {
        &self.config
    }

    /// Sending domain
    pub fn domain(&self) -> &str {
        self.config.domain()
    }

    /// Execute one request and return the parsed body.
    ///
    /// Entity fields are merged with `params`; `params` win on collisions.
    /// GET and DELETE carry the result in the query string, POST and PUT in
    /// a form body (multipart when the entity has files).
    pub async fn execute(
        &self,
        method: Method,
        segments: &[&str],
        entity: Option<&(dyn Sendable + Sync)>,
        params: FieldMap,
    ) -> MailgunResult<Value> {
        let request = self.build_request(method, segments, entity, params)?;
        let trace = request_trace(&request.method, segments);
        let span = create_request_span(&trace.method, &trace.path);

        debug!(parent: &span, url = %redact_url(request.url.as_str()), "Sending request");

        let response = match self.transport.execute(request).instrument(span.clone()).await {
            Ok(response) => response,
            Err(err) => {
                record_error(&span, &err.to_string());
                warn!(parent: &span, error = %err, "Transport failure");
                return Err(err.into());
            }
        };

        record_status(&span, response.status);
        debug!(
            parent: &span,
            status = response.status,
            duration_ms = trace.elapsed_ms(),
            "Received response"
        );

        let result = classify(response);
        if let Err(err) = &result {
            record_error(&span, &err.to_string());
            warn!(parent: &span, error_code = err.error_code(), error = %err, "Request failed");
        }
        result
    }

    fn build_request(
        &self,
        method: Method,
        segments: &[&str],
        entity: Option<&(dyn Sendable + Sync)>,
        params: FieldMap,
    ) -> MailgunResult<HttpRequest> {
        let mut url = self.config.endpoint_url(segments);
        let headers = self.auth.headers()?;

        let (mut fields, files) = match entity {
            Some(entity) => (entity.to_fields(), entity.files()),
            None => (FieldMap::new(), Vec::new()),
        };
        fields.merge(params);

        let body = if method == Method::GET || method == Method::DELETE {
            if !fields.is_empty() {
                url.query_pairs_mut().extend_pairs(fields.iter());
            }
            RequestBody::Empty
        } else if files.is_empty() {
            RequestBody::Form(fields.into_pairs())
        } else {
            RequestBody::Multipart {
                fields: fields.into_pairs(),
                files,
            }
        };

        Ok(HttpRequest::new(method, url, headers, self.config.timeout).with_body(body))
    }
}

impl std::fmt::Debug for RequestExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestExecutor")
            .field("config", &self.config)
            .field("auth", &self.auth)
            .finish()
    }
}

/// Timing and span labels for a request; addresses in the path are masked
fn request_trace(method: &Method, segments: &[&str]) -> RequestTrace {
    RequestTrace::new(method.as_str(), mask_path(&segments.join("/")))
}

/// Classify a raw response.
///
/// Status >= 500 is a server fault whose body is ignored, 200 is success
/// (an empty body parses to `null`), anything else is an API error.
pub fn classify(response: HttpResponse) -> MailgunResult<Value> {
    match response.status {
        status if status >= 500 => Err(MailgunError::Server { status }),
        200 => {
            if response.body.iter().all(u8::is_ascii_whitespace) {
                return Ok(Value::Null);
            }
            Ok(serde_json::from_slice(&response.body)?)
        }
        status => Err(MailgunError::from_api_response(status, &response.text())),
    }
}

/// Take `key` out of a response object and deserialize it
pub(crate) fn extract<T: DeserializeOwned>(mut body: Value, key: &'static str) -> MailgunResult<T> {
    match body.get_mut(key).map(Value::take) {
        Some(value) if !value.is_null() => Ok(serde_json::from_value(value)?),
        _ => Err(ResponseError::MissingField { field: key }.into()),
    }
}

/// Load a resource wrapped under `key`
pub(crate) fn load_wrapped<T: Resource>(mut body: Value, key: &'static str) -> MailgunResult<T> {
    match body.get_mut(key).map(Value::take) {
        Some(value) if !value.is_null() => T::load(value),
        _ => Err(ResponseError::MissingField { field: key }.into()),
    }
}
