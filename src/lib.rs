//! Mailgun API Client
//!
//! Typed client for the Mailgun transactional-email API with:
//! - Message sending with recipients, attachments, tags and delivery options
//! - Mailing lists and members, including bulk member import
//! - Unsubscribes, spam complaints, bounces and inbound routes
//! - Webhook signature verification
//! - Structured logging with secret redaction
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use mailgun_client::services::messages::MessagesServiceTrait;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create client from environment
//!     let client = mailgun_client::create_client_from_env()?;
//!
//!     // Send a message seeded with the configured defaults
//!     let mut message = client.new_message();
//!     message
//!         .set_from("me@samples.mailgun.org", Some("Excited User".to_string()))
//!         .set_subject("Hello")
//!         .set_text("Testing some Mailgun awesomeness!");
//!     message.add_to("you@example.com", None)?;
//!
//!     let id = client.messages().send(&message).await?;
//!     println!("Message queued: {}", id);
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `rustls` - TLS via rustls (default)
//! - `native-tls` - TLS via the platform library

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

// Core modules
pub mod auth;
pub mod client;
pub mod config;
pub mod errors;
pub mod transport;
pub mod types;

// Services
pub mod services;

// Integration
pub mod component;
pub mod webhooks;

// Observability
pub mod observability;

// Testing utilities
pub mod fixtures;
pub mod mocks;

// Tests
#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use client::{Mailgun, MailgunClient};
pub use component::MailgunComponent;
pub use config::{MailgunConfig, MailgunConfigBuilder, MessageDefaults};
pub use errors::{MailgunError, MailgunResult};
pub use types::{Address, ListOptions, Message, Page};

/// Default base URL for the Mailgun API
pub const DEFAULT_BASE_URL: &str = "https://api.mailgun.net/v2/";

/// Default timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Create a Mailgun client with the given configuration
pub fn create_client(config: MailgunConfig) -> MailgunResult<MailgunClient> {
    MailgunClient::new(config)
}

/// Create a Mailgun client from environment variables
///
/// Reads:
/// - `MAILGUN_DOMAIN` - Sending domain
/// - `MAILGUN_API_KEY` - Private API key
/// - `MAILGUN_BASE_URL` - API base URL override
/// - `MAILGUN_TIMEOUT` - Request timeout in seconds
/// - `MAILGUN_FROM_ADDRESS` / `MAILGUN_FROM_NAME` - Default sender
/// - `MAILGUN_TAGS` - Comma-separated default tags
/// - `MAILGUN_CAMPAIGN_ID` - Default campaign
pub fn create_client_from_env() -> MailgunResult<MailgunClient> {
    let config = MailgunConfig::from_env()?;
    create_client(config)
}
