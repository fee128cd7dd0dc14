//! Error types for the Mailgun client.
//!
//! Every failed operation resolves to exactly one [`MailgunError`] variant so
//! callers can tell local precondition failures, transport failures, remote
//! faults and API rejections apart.

use thiserror::Error;

/// Result type for Mailgun operations
pub type MailgunResult<T> = Result<T, MailgunError>;

/// Root error type for the Mailgun client
#[derive(Error, Debug)]
pub enum MailgunError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Local precondition violated; nothing was sent
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// No response was obtained from the server
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The server answered with a 5xx status
    #[error("Mailgun server error (HTTP {status})")]
    Server {
        /// HTTP status code
        status: u16,
    },

    /// The server rejected the request
    #[error("API error (HTTP {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Message reported by the API, or the raw body
        message: String,
    },

    /// A successful response could not be interpreted
    #[error("Response error: {0}")]
    Response(#[from] ResponseError),
}

impl MailgunError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "MAILGUN_CONFIG",
            Self::Validation(_) => "MAILGUN_VALIDATION",
            Self::Transport(_) => "MAILGUN_TRANSPORT",
            Self::Server { .. } => "MAILGUN_SERVER",
            Self::Api { .. } => "MAILGUN_API",
            Self::Response(_) => "MAILGUN_RESPONSE",
        }
    }

    /// Whether the failure is plausibly transient.
    ///
    /// The client never retries on its own; this is a hint for callers.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Server { .. })
    }

    /// Get HTTP status code if the server answered
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Server { status } | Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Build an API error from a non-200, non-5xx response body.
    ///
    /// The JSON `message` field wins when present and non-empty, otherwise
    /// the raw body text is used.
    pub fn from_api_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|json| {
                json.get("message")
                    .and_then(|m| m.as_str())
                    .filter(|m| !m.is_empty())
                    .map(String::from)
            })
            .unwrap_or_else(|| body.to_string());

        Self::Api { status, message }
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigurationError {
    /// Missing sending domain
    #[error("Domain is missing")]
    MissingDomain,

    /// Missing API key
    #[error("API key is missing")]
    MissingApiKey,

    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration {
        /// Error message
        message: String,
    },
}

/// Preconditions enforced before any request is issued
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Bulk member submission with no members
    #[error("The members list is empty")]
    EmptyMemberBatch,

    /// Bulk member submission above the service limit
    #[error("The maximum number of members allowed in one request is {max}, got {count}")]
    TooManyMembers {
        /// Members supplied
        count: usize,
        /// Service limit
        max: usize,
    },

    /// Message recipient list is full
    #[error("The maximum number of recipients allowed for batch sending is {max}")]
    TooManyRecipients {
        /// Service limit
        max: usize,
    },

    /// Message has no sender
    #[error("Message has no sender address")]
    MissingSender,

    /// Message has no primary recipients
    #[error("Message has no recipients")]
    MissingRecipients,
}

/// Failures where no HTTP response was obtained
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Connection failed
    #[error("Connection failed: {message}")]
    ConnectionFailed {
        /// Error message
        message: String,
    },

    /// Request timeout
    #[error("Request timed out: {message}")]
    Timeout {
        /// Error message
        message: String,
    },

    /// Other HTTP-level failure
    #[error("HTTP error: {0}")]
    Http(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout {
                message: err.to_string(),
            }
        } else if err.is_connect() {
            TransportError::ConnectionFailed {
                message: err.to_string(),
            }
        } else {
            TransportError::Http(err.to_string())
        }
    }
}

/// Response interpretation errors
#[derive(Error, Debug)]
pub enum ResponseError {
    /// JSON deserialization error
    #[error("Deserialization error: {message}")]
    DeserializationError {
        /// Error message
        message: String,
    },

    /// A field the operation depends on is absent
    #[error("Missing field '{field}' in response")]
    MissingField {
        /// Field name
        field: &'static str,
    },
}

impl From<serde_json::Error> for ResponseError {
    fn from(err: serde_json::Error) -> Self {
        ResponseError::DeserializationError {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for MailgunError {
    fn from(err: serde_json::Error) -> Self {
        MailgunError::Response(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_is_retryable() {
        assert!(MailgunError::Server { status: 503 }.is_retryable());
        assert!(MailgunError::Transport(TransportError::Timeout {
            message: "timed out".to_string()
        })
        .is_retryable());

        assert!(!MailgunError::Validation(ValidationError::EmptyMemberBatch).is_retryable());
        assert!(!MailgunError::Api {
            status: 400,
            message: "bad".to_string()
        }
        .is_retryable());
    }

    #[test]
    fn test_api_error_prefers_json_message() {
        let err = MailgunError::from_api_response(404, r#"{"message":"Address not found"}"#);
        assert!(matches!(
            err,
            MailgunError::Api { status: 404, ref message } if message == "Address not found"
        ));
    }

    #[test]
    fn test_api_error_falls_back_to_raw_body() {
        let err = MailgunError::from_api_response(401, "Forbidden");
        assert!(matches!(
            err,
            MailgunError::Api { status: 401, ref message } if message == "Forbidden"
        ));

        let err = MailgunError::from_api_response(400, r#"{"message":""}"#);
        assert!(matches!(
            err,
            MailgunError::Api { ref message, .. } if message == r#"{"message":""}"#
        ));
    }

    #[test]
    fn test_status_code() {
        assert_eq!(MailgunError::Server { status: 502 }.status_code(), Some(502));
        assert_eq!(
            MailgunError::Validation(ValidationError::MissingSender).status_code(),
            None
        );
        assert_eq!(MailgunError::Server { status: 500 }.error_code(), "MAILGUN_SERVER");
    }
}
