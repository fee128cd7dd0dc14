//! Authentication management for the Mailgun client.
//!
//! Every request carries HTTP Basic credentials with the fixed user `api`
//! and the account's private key.

use crate::config::MailgunConfig;
use crate::errors::{ConfigurationError, MailgunResult};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use http::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use std::sync::Arc;

/// Basic-auth user name expected by the API
pub const API_USER: &str = "api";

/// Authentication manager for Mailgun API requests
#[derive(Clone)]
pub struct AuthManager {
    config: Arc<MailgunConfig>,
}

impl AuthManager {
    /// Create a new authentication manager
    pub fn new(config: Arc<MailgunConfig>) -> Self {
        Self { config }
    }

    /// Headers for an API request
    pub fn headers(&self) -> MailgunResult<HeaderMap> {
        let mut headers = HeaderMap::new();

        let mut auth_value = HeaderValue::from_str(&self.basic_credentials()).map_err(|_| {
            ConfigurationError::InvalidConfiguration {
                message: "API key contains characters not allowed in a header".to_string(),
            }
        })?;
        auth_value.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_value);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        Ok(headers)
    }

    /// Whether a key is configured
    pub fn has_api_key(&self) -> bool {
        !self.config.api_key().is_empty()
    }

    fn basic_credentials(&self) -> String {
        let raw = format!("{}:{}", API_USER, self.config.api_key());
        format!("Basic {}", STANDARD.encode(raw))
    }
}

impl std::fmt::Debug for AuthManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthManager")
            .field("user", &API_USER)
            .field("has_api_key", &self.has_api_key())
            .finish()
    }
}
