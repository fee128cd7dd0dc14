//! Bounces service implementation.

use crate::client::{load_wrapped, RequestExecutor};
use crate::errors::MailgunResult;
use crate::observability::mask_address;
use crate::types::{Bounce, FieldMap, ListOptions, Page};
use async_trait::async_trait;
use http::Method;
use tracing::instrument;

/// Trait for bounce operations
#[async_trait]
pub trait BouncesServiceTrait: Send + Sync {
    /// List bounces for the domain
    async fn list(&self, options: ListOptions) -> MailgunResult<Page<Bounce>>;

    /// Get the bounce record for an address
    async fn get(&self, address: &str) -> MailgunResult<Bounce>;

    /// Add an address to the bounces table
    async fn create(&self, bounce: &Bounce) -> MailgunResult<bool>;

    /// Remove an address from the bounces table
    async fn delete(&self, address: &str) -> MailgunResult<bool>;
}

/// Bounces service implementation
#[derive(Clone)]
pub struct BouncesService {
    executor: RequestExecutor,
}

impl BouncesService {
    /// Create a new bounces service
    pub fn new(executor: RequestExecutor) -> Self {
        Self { executor }
    }
}

#[async_trait]
impl BouncesServiceTrait for BouncesService {
    #[instrument(skip(self))]
    async fn list(&self, options: ListOptions) -> MailgunResult<Page<Bounce>> {
        let domain = self.executor.domain();
        let body = self
            .executor
            .execute(Method::GET, &[domain, "bounces"], None, options.to_params())
            .await?;
        Ok(serde_json::from_value(body)?)
    }

    #[instrument(skip(self, address), fields(address = %mask_address(address)))]
    async fn get(&self, address: &str) -> MailgunResult<Bounce> {
        let domain = self.executor.domain();
        let body = self
            .executor
            .execute(Method::GET, &[domain, "bounces", address], None, FieldMap::new())
            .await?;
        load_wrapped(body, "bounce")
    }

    #[instrument(skip(self, bounce), fields(address = %mask_address(&bounce.address), code = bounce.code))]
    async fn create(&self, bounce: &Bounce) -> MailgunResult<bool> {
        let domain = self.executor.domain();
        self.executor
            .execute(Method::POST, &[domain, "bounces"], Some(bounce), FieldMap::new())
            .await?;
        Ok(true)
    }

    #[instrument(skip(self, address), fields(address = %mask_address(address)))]
    async fn delete(&self, address: &str) -> MailgunResult<bool> {
        let domain = self.executor.domain();
        self.executor
            .execute(
                Method::DELETE,
                &[domain, "bounces", address],
                None,
                FieldMap::new(),
            )
            .await?;
        Ok(true)
    }
}
