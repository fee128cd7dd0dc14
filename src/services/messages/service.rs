//! Messages service implementation.

use crate::client::{extract, RequestExecutor};
use crate::errors::MailgunResult;
use crate::types::{FieldMap, Message};
use async_trait::async_trait;
use http::Method;
use tracing::{debug, instrument};

/// Trait for messages service operations
#[async_trait]
pub trait MessagesServiceTrait: Send + Sync {
    /// Send a message and return the id Mailgun assigned to it
    async fn send(&self, message: &Message) -> MailgunResult<String>;
}

/// Messages service implementation
#[derive(Clone)]
pub struct MessagesService {
    executor: RequestExecutor,
}

impl MessagesService {
    /// Create a new messages service
    pub fn new(executor: RequestExecutor) -> Self {
        Self { executor }
    }
}

#[async_trait]
impl MessagesServiceTrait for MessagesService {
    #[instrument(skip(self, message), fields(domain = %self.executor.domain(), recipients = message.to().len()))]
    async fn send(&self, message: &Message) -> MailgunResult<String> {
        message.validate()?;

        let domain = self.executor.domain();
        let body = self
            .executor
            .execute(
                Method::POST,
                &[domain, "messages"],
                Some(message),
                FieldMap::new(),
            )
            .await?;

        let id: String = extract(body, "id")?;
        debug!(id = %id, "Message queued");
        Ok(id)
    }
}
