//! Managed client component.
//!
//! Holds the client's settings as plain fields that a host application can
//! fill in during start-up, then builds the [`MailgunClient`] on first use
//! and hands out that same instance for the rest of the process.

use crate::client::MailgunClient;
use crate::config::{MailgunConfigBuilder, MessageDefaults};
use crate::errors::{ConfigurationError, MailgunResult};
use crate::observability::Redacted;
use crate::transport::HttpTransport;
use crate::types::{Address, ClicksTracking, Message};
use once_cell::sync::OnceCell;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Lazily-initialized, process-wide Mailgun client
#[derive(Default)]
pub struct MailgunComponent {
    domain: String,
    api_key: String,
    base_url: Option<String>,
    timeout: Option<Duration>,
    defaults: MessageDefaults,
    transport: Option<Arc<dyn HttpTransport>>,
    client: OnceCell<MailgunClient>,
}

impl MailgunComponent {
    /// Create an unconfigured component
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sending domain
    pub fn set_domain(&mut self, domain: impl Into<String>) -> MailgunResult<&mut Self> {
        self.ensure_unused()?;
        self.domain = domain.into();
        Ok(self)
    }

    /// Set the API key
    pub fn set_api_key(&mut self, key: impl Into<String>) -> MailgunResult<&mut Self> {
        self.ensure_unused()?;
        self.api_key = key.into();
        Ok(self)
    }

    /// Override the API base URL
    pub fn set_base_url(&mut self, url: impl Into<String>) -> MailgunResult<&mut Self> {
        self.ensure_unused()?;
        self.base_url = Some(url.into());
        Ok(self)
    }

    /// Override the request timeout
    pub fn set_timeout(&mut self, timeout: Duration) -> MailgunResult<&mut Self> {
        self.ensure_unused()?;
        self.timeout = Some(timeout);
        Ok(self)
    }

    /// Set the default sender
    pub fn set_from(
        &mut self,
        address: impl Into<String>,
        name: Option<String>,
    ) -> MailgunResult<&mut Self> {
        self.ensure_unused()?;
        self.defaults.from = Some(Address::new(address, name));
        Ok(self)
    }

    /// Replace the default tags
    pub fn set_tags<I, S>(&mut self, tags: I) -> MailgunResult<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ensure_unused()?;
        self.defaults.tags = tags.into_iter().map(Into::into).collect();
        Ok(self)
    }

    /// Set the default campaign
    pub fn set_campaign_id(&mut self, campaign_id: impl Into<String>) -> MailgunResult<&mut Self> {
        self.ensure_unused()?;
        self.defaults.campaign_id = Some(campaign_id.into());
        Ok(self)
    }

    /// Enable or disable DKIM signatures
    pub fn set_dkim(&mut self, enabled: bool) -> MailgunResult<&mut Self> {
        self.ensure_unused()?;
        self.defaults.dkim = Some(enabled);
        Ok(self)
    }

    /// Enable or disable test mode
    pub fn set_test_mode(&mut self, enabled: bool) -> MailgunResult<&mut Self> {
        self.ensure_unused()?;
        self.defaults.test_mode = Some(enabled);
        Ok(self)
    }

    /// Enable or disable tracking
    pub fn set_tracking(&mut self, enabled: bool) -> MailgunResult<&mut Self> {
        self.ensure_unused()?;
        self.defaults.tracking = Some(enabled);
        Ok(self)
    }

    /// Set the clicks tracking mode
    pub fn set_clicks_tracking(&mut self, mode: ClicksTracking) -> MailgunResult<&mut Self> {
        self.ensure_unused()?;
        self.defaults.clicks_tracking = Some(mode);
        Ok(self)
    }

    /// Enable or disable opens tracking
    pub fn set_opens_tracking(&mut self, enabled: bool) -> MailgunResult<&mut Self> {
        self.ensure_unused()?;
        self.defaults.opens_tracking = Some(enabled);
        Ok(self)
    }

    /// Use a custom transport for the client
    pub fn set_transport(&mut self, transport: Arc<dyn HttpTransport>) -> MailgunResult<&mut Self> {
        self.ensure_unused()?;
        self.transport = Some(transport);
        Ok(self)
    }

    /// Whether the client has been built
    pub fn is_initialized(&self) -> bool {
        self.client.get().is_some()
    }

    /// The shared client, built from the current settings on first call
    pub fn client(&self) -> MailgunResult<&MailgunClient> {
        self.client.get_or_try_init(|| self.build_client())
    }

    /// Create a message seeded with the configured defaults
    pub fn new_message(&self) -> MailgunResult<Message> {
        Ok(self.client()?.new_message())
    }

    fn build_client(&self) -> MailgunResult<MailgunClient> {
        let mut builder = MailgunConfigBuilder::new()
            .domain(self.domain.clone())
            .api_key(self.api_key.clone())
            .message_defaults(self.defaults.clone());
        if let Some(url) = &self.base_url {
            builder = builder.base_url(url)?;
        }
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let config = builder.build()?;

        info!(domain = %config.domain(), "Initializing Mailgun client");
        match &self.transport {
            Some(transport) => MailgunClient::with_transport(config, transport.clone()),
            None => MailgunClient::new(config),
        }
    }

    fn ensure_unused(&self) -> MailgunResult<()> {
        if self.is_initialized() {
            return Err(ConfigurationError::InvalidConfiguration {
                message: "settings cannot change after the client has been created".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

impl std::fmt::Debug for MailgunComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailgunComponent")
            .field("domain", &self.domain)
            .field("api_key", &Redacted::new(&self.api_key))
            .field("defaults", &self.defaults)
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::MailgunError;
    use crate::mocks::{MockHttpTransport, MockResponse};
    use crate::services::routes::RoutesServiceTrait;

    fn configured() -> MailgunComponent {
        let mut component = MailgunComponent::new();
        component
            .set_domain("example.com")
            .unwrap()
            .set_api_key("key-test")
            .unwrap()
            .set_from("noreply@example.com", None)
            .unwrap()
            .set_tags(["newsletter", "weekly"])
            .unwrap()
            .set_dkim(true)
            .unwrap();
        component
    }

    #[test]
    fn test_client_built_once() {
        let component = configured();
        assert!(!component.is_initialized());

        let first = component.client().unwrap() as *const MailgunClient;
        let second = component.client().unwrap() as *const MailgunClient;

        assert!(component.is_initialized());
        assert_eq!(first, second);
    }

    #[test]
    fn test_debug_redacts_key() {
        let printed = format!("{:?}", configured());
        assert!(!printed.contains("key-test"));
        assert!(printed.contains("api_key: [REDACTED]"));
    }

    #[test]
    fn test_settings_frozen_after_first_use() {
        let mut component = configured();
        component.client().unwrap();

        assert!(matches!(
            component.set_domain("other.com"),
            Err(MailgunError::Configuration(_))
        ));
        assert_eq!(component.client().unwrap().domain(), "example.com");
    }

    #[test]
    fn test_missing_settings_fail() {
        let component = MailgunComponent::new();
        assert!(component.client().is_err());
        assert!(!component.is_initialized());
    }

    #[test]
    fn test_new_message_carries_defaults() {
        let message = configured().new_message().unwrap();
        assert_eq!(message.tags(), ["newsletter".to_string(), "weekly".to_string()]);
        assert_eq!(message.from().map(|a| a.address.as_str()), Some("noreply@example.com"));
    }

    #[tokio::test]
    async fn test_custom_transport_is_used() {
        let transport = Arc::new(
            MockHttpTransport::new().add_response(MockResponse::ok(r#"{"message":"ok"}"#)),
        );
        let mut component = configured();
        component.set_transport(transport.clone()).unwrap();

        let deleted = component
            .client()
            .unwrap()
            .routes()
            .delete("4f3bad2335335426750048c6")
            .await
            .unwrap();

        assert!(deleted);
        assert_eq!(transport.request_count(), 1);
    }
}
