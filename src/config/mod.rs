//! Configuration management for the Mailgun client.
//!
//! Supports configuration via:
//! - Explicit values
//! - Environment variables
//! - Builder pattern

use crate::errors::{ConfigurationError, MailgunError, MailgunResult};
use crate::observability::Redacted;
use crate::types::{Address, ClicksTracking};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use url::Url;

/// Sender defaults copied into every message created by the client.
///
/// Flags are tri-state: `None` means the field is left out of the request
/// and the domain-level setting on the Mailgun side applies.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageDefaults {
    /// Default `From` address
    pub from: Option<Address>,
    /// Tags applied to every message
    pub tags: Vec<String>,
    /// Campaign identifier
    pub campaign_id: Option<String>,
    /// DKIM signing
    pub dkim: Option<bool>,
    /// Test mode
    pub test_mode: Option<bool>,
    /// Tracking
    pub tracking: Option<bool>,
    /// Clicks tracking mode
    pub clicks_tracking: Option<ClicksTracking>,
    /// Opens tracking
    pub opens_tracking: Option<bool>,
}

/// Configuration for the Mailgun client
#[derive(Clone)]
pub struct MailgunConfig {
    /// Sending domain
    pub(crate) domain: String,
    /// Private API key
    pub(crate) api_key: SecretString,
    /// Base URL for API requests
    pub base_url: Url,
    /// Request timeout
    pub timeout: Duration,
    /// Defaults for new messages
    pub message_defaults: MessageDefaults,
}

impl std::fmt::Debug for MailgunConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailgunConfig")
            .field("domain", &self.domain)
            .field("api_key", &Redacted::new(&self.api_key))
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("message_defaults", &self.message_defaults)
            .finish()
    }
}

impl Default for MailgunConfig {
    fn default() -> Self {
        Self {
            domain: String::new(),
            api_key: SecretString::new(String::new()),
            base_url: default_base_url(),
            timeout: Duration::from_secs(crate::DEFAULT_TIMEOUT_SECS),
            message_defaults: MessageDefaults::default(),
        }
    }
}

fn default_base_url() -> Url {
    Url::parse(crate::DEFAULT_BASE_URL).expect("default base URL is valid")
}

impl MailgunConfig {
    /// Create a new configuration builder
    pub fn builder() -> MailgunConfigBuilder {
        MailgunConfigBuilder::new()
    }

    /// Create configuration from environment variables
    pub fn from_env() -> MailgunResult<Self> {
        let mut builder = MailgunConfigBuilder::new();

        if let Ok(domain) = std::env::var("MAILGUN_DOMAIN") {
            builder = builder.domain(domain);
        }
        if let Ok(key) = std::env::var("MAILGUN_API_KEY") {
            builder = builder.api_key(key);
        }
        if let Ok(url) = std::env::var("MAILGUN_BASE_URL") {
            builder = builder.base_url(&url)?;
        }
        if let Ok(timeout) = std::env::var("MAILGUN_TIMEOUT") {
            if let Ok(secs) = timeout.parse::<u64>() {
                builder = builder.timeout(Duration::from_secs(secs));
            }
        }

        // Message defaults
        if let Ok(address) = std::env::var("MAILGUN_FROM_ADDRESS") {
            let name = std::env::var("MAILGUN_FROM_NAME").ok();
            builder = builder.from(address, name);
        }
        if let Ok(tags) = std::env::var("MAILGUN_TAGS") {
            for tag in tags.split(',').map(str::trim).filter(|t| !t.is_empty()) {
                builder = builder.tag(tag);
            }
        }
        if let Ok(campaign) = std::env::var("MAILGUN_CAMPAIGN_ID") {
            builder = builder.campaign_id(campaign);
        }

        builder.build()
    }

    /// Get the sending domain
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Expose the API key for request signing
    pub(crate) fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    /// Build the full URL for an endpoint from raw path segments.
    ///
    /// Each segment is percent-encoded on its own, so addresses and ids
    /// can be passed through untouched.
    pub fn endpoint_url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Validate the configuration
    pub fn validate(&self) -> MailgunResult<()> {
        if self.domain.trim().is_empty() {
            return Err(MailgunError::Configuration(ConfigurationError::MissingDomain));
        }
        if self.api_key.expose_secret().is_empty() {
            return Err(MailgunError::Configuration(ConfigurationError::MissingApiKey));
        }
        if self.base_url.cannot_be_a_base() {
            return Err(MailgunError::Configuration(
                ConfigurationError::InvalidConfiguration {
                    message: format!("Base URL cannot carry a path: {}", self.base_url),
                },
            ));
        }
        Ok(())
    }
}

/// Builder for MailgunConfig
#[derive(Default)]
pub struct MailgunConfigBuilder {
    config: MailgunConfig,
}

impl MailgunConfigBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            config: MailgunConfig::default(),
        }
    }

    /// Set the sending domain
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.config.domain = domain.into();
        self
    }

    /// Set the API key
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = SecretString::new(key.into());
        self
    }

    /// Set the base URL
    pub fn base_url(mut self, url: &str) -> Result<Self, ConfigurationError> {
        self.config.base_url =
            Url::parse(url).map_err(|e| ConfigurationError::InvalidConfiguration {
                message: format!("Invalid URL: {}", e),
            })?;
        Ok(self)
    }

    /// Set the timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the default sender
    pub fn from(mut self, address: impl Into<String>, name: Option<String>) -> Self {
        self.config.message_defaults.from = Some(Address::new(address, name));
        self
    }

    /// Add a default tag
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.config.message_defaults.tags.push(tag.into());
        self
    }

    /// Set the default campaign
    pub fn campaign_id(mut self, campaign_id: impl Into<String>) -> Self {
        self.config.message_defaults.campaign_id = Some(campaign_id.into());
        self
    }

    /// Enable or disable DKIM signatures
    pub fn dkim(mut self, enabled: bool) -> Self {
        self.config.message_defaults.dkim = Some(enabled);
        self
    }

    /// Enable or disable test mode
    pub fn test_mode(mut self, enabled: bool) -> Self {
        self.config.message_defaults.test_mode = Some(enabled);
        self
    }

    /// Enable or disable tracking
    pub fn tracking(mut self, enabled: bool) -> Self {
        self.config.message_defaults.tracking = Some(enabled);
        self
    }

    /// Set the clicks tracking mode
    pub fn clicks_tracking(mut self, mode: ClicksTracking) -> Self {
        self.config.message_defaults.clicks_tracking = Some(mode);
        self
    }

    /// Enable or disable opens tracking
    pub fn opens_tracking(mut self, enabled: bool) -> Self {
        self.config.message_defaults.opens_tracking = Some(enabled);
        self
    }

    /// Replace all message defaults at once
    pub fn message_defaults(mut self, defaults: MessageDefaults) -> Self {
        self.config.message_defaults = defaults;
        self
    }

    /// Build the configuration
    pub fn build(self) -> MailgunResult<MailgunConfig> {
        self.config.validate()?;
        Ok(self.config)
    }

    /// Build the configuration without validation (for testing)
    pub fn build_unchecked(self) -> MailgunConfig {
        self.config
    }
}
