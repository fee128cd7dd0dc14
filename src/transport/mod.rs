//! HTTP transport layer for the Mailgun client.
//!
//! The transport only moves bytes: it sends one request and hands back the
//! status and body, or a [`TransportError`] when no response was obtained.
//! Authentication and response classification live in the client.

use crate::errors::TransportError;
use async_trait::async_trait;
use bytes::Bytes;
use http::{HeaderMap, Method};
use once_cell::sync::OnceCell;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

/// HTTP transport trait for making API requests
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Execute one request
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Request body
#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    /// No body
    #[default]
    Empty,
    /// `application/x-www-form-urlencoded` fields
    Form(Vec<(String, String)>),
    /// `multipart/form-data` fields and files
    Multipart {
        /// Text fields
        fields: Vec<(String, String)>,
        /// Files
        files: Vec<FileUpload>,
    },
}

/// A fully-built HTTP request
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute URL, query string included
    pub url: Url,
    /// Request headers
    pub headers: HeaderMap,
    /// Request body
    pub body: RequestBody,
    /// Request timeout
    pub timeout: Duration,
}

impl HttpRequest {
    /// Create a new request with an empty body
    pub fn new(method: Method, url: Url, headers: HeaderMap, timeout: Duration) -> Self {
        Self {
            method,
            url,
            headers,
            body: RequestBody::Empty,
            timeout,
        }
    }

    /// Set the body
    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }
}

/// Raw HTTP response
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body
    pub body: Bytes,
}

impl HttpResponse {
    /// Create a new response
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Body as text, lossily decoded
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// File upload data
#[derive(Debug, Clone, PartialEq)]
pub struct FileUpload {
    /// Form field name
    pub field_name: String,
    /// File name
    pub file_name: String,
    /// File content
    pub content: Bytes,
    /// MIME type
    pub mime_type: String,
}

impl FileUpload {
    /// Create a new file upload
    pub fn new(
        field_name: impl Into<String>,
        file_name: impl Into<String>,
        content: impl Into<Bytes>,
    ) -> Self {
        let file_name_str = file_name.into();
        let mime_type = mime_guess::from_path(&file_name_str)
            .first_or_octet_stream()
            .to_string();

        Self {
            field_name: field_name.into(),
            file_name: file_name_str,
            content: content.into(),
            mime_type,
        }
    }
}

/// Default HTTP transport implementation using reqwest.
///
/// The underlying client is built on first use and reused for every later
/// request; it is released when the transport is dropped.
pub struct ReqwestTransport {
    client: OnceCell<Client>,
}

impl ReqwestTransport {
    /// Create a new transport; no connection resources are allocated yet
    pub fn new() -> Self {
        Self {
            client: OnceCell::new(),
        }
    }

    /// Create a new transport with a pre-built client
    pub fn with_client(client: Client) -> Self {
        Self {
            client: OnceCell::with_value(client),
        }
    }

    /// Whether the underlying client has been created
    pub fn is_initialized(&self) -> bool {
        self.client.get().is_some()
    }

    fn client(&self) -> Result<&Client, TransportError> {
        self.client.get_or_try_init(|| {
            debug!("Creating HTTP client");
            ClientBuilder::new()
                .build()
                .map_err(|e| TransportError::Http(e.to_string()))
        })
    }

    fn multipart_form(
        fields: Vec<(String, String)>,
        files: Vec<FileUpload>,
    ) -> Result<reqwest::multipart::Form, TransportError> {
        let mut form = reqwest::multipart::Form::new();

        for (name, value) in fields {
            form = form.text(name, value);
        }

        for file in files {
            let part = reqwest::multipart::Part::bytes(file.content.to_vec())
                .file_name(file.file_name)
                .mime_str(&file.mime_type)
                .map_err(|e| TransportError::Http(e.to_string()))?;
            form = form.part(file.field_name, part);
        }

        Ok(form)
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        // Every per-call setting is applied explicitly; nothing carries over.
        let mut builder = self
            .client()?
            .request(request.method, request.url)
            .headers(request.headers)
            .timeout(request.timeout);

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Form(fields) => builder.form(&fields),
            RequestBody::Multipart { fields, files } => {
                builder.multipart(Self::multipart_form(fields, files)?)
            }
        };

        let response = builder.send().await.map_err(TransportError::from)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(TransportError::from)?;

        debug!(status, bytes = body.len(), "Received response");
        Ok(HttpResponse { status, body })
    }
}

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_is_created_lazily() {
        let transport = ReqwestTransport::new();
        assert!(!transport.is_initialized());

        let first = transport.client().unwrap() as *const Client;
        let second = transport.client().unwrap() as *const Client;
        assert!(transport.is_initialized());
        assert_eq!(first, second);
    }

    #[test]
    fn test_request_builder() {
        let url = Url::parse("https://api.mailgun.net/v2/routes").unwrap();
        let request = HttpRequest::new(Method::GET, url, HeaderMap::new(), Duration::from_secs(10));

        assert_eq!(request.method, Method::GET);
        assert!(matches!(request.body, RequestBody::Empty));

        let request = request.with_body(RequestBody::Form(vec![("a".into(), "b".into())]));
        assert!(matches!(request.body, RequestBody::Form(ref f) if f.len() == 1));
    }

    #[test]
    fn test_file_upload_mime_detection() {
        let upload = FileUpload::new("attachment[1]", "test.png", vec![0u8; 10]);
        assert_eq!(upload.mime_type, "image/png");

        let upload = FileUpload::new("attachment[1]", "blob", vec![0u8; 10]);
        assert_eq!(upload.mime_type, "application/octet-stream");
    }

    #[test]
    fn test_response_text() {
        let response = HttpResponse::new(404, "Not found");
        assert_eq!(response.text(), "Not found");
    }
}
