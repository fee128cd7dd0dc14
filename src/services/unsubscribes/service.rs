//! Unsubscribes service implementation.

use crate::client::RequestExecutor;
use crate::errors::MailgunResult;
use crate::observability::mask_address;
use crate::types::{FieldMap, ListOptions, Page, Unsubscribe};
use async_trait::async_trait;
use http::Method;
use tracing::instrument;

/// Trait for unsubscribe operations
#[async_trait]
pub trait UnsubscribesServiceTrait: Send + Sync {
    /// List unsubscribe records for the domain
    async fn list(&self, options: ListOptions) -> MailgunResult<Page<Unsubscribe>>;

    /// All unsubscribe records for one address
    async fn get_for_address(&self, address: &str) -> MailgunResult<Page<Unsubscribe>>;

    /// Add an unsubscribe record
    async fn create(&self, unsubscribe: &Unsubscribe) -> MailgunResult<bool>;

    /// Delete one record by id
    async fn delete(&self, id: &str) -> MailgunResult<bool>;

    /// Delete every record for an address
    async fn delete_for_address(&self, address: &str) -> MailgunResult<bool>;
}

/// Unsubscribes service implementation
#[derive(Clone)]
pub struct UnsubscribesService {
    executor: RequestExecutor,
}

impl UnsubscribesService {
    /// Create a new unsubscribes service
    pub fn new(executor: RequestExecutor) -> Self {
        Self { executor }
    }
}

#[async_trait]
impl UnsubscribesServiceTrait for UnsubscribesService {
    #[instrument(skip(self))]
    async fn list(&self, options: ListOptions) -> MailgunResult<Page<Unsubscribe>> {
        let domain = self.executor.domain();
        let body = self
            .executor
            .execute(
                Method::GET,
                &[domain, "unsubscribes"],
                None,
                options.to_params(),
            )
            .await?;
        Ok(serde_json::from_value(body)?)
    }

    #[instrument(skip(self, address), fields(address = %mask_address(address)))]
    async fn get_for_address(&self, address: &str) -> MailgunResult<Page<Unsubscribe>> {
        let domain = self.executor.domain();
        let body = self
            .executor
            .execute(
                Method::GET,
                &[domain, "unsubscribes", address],
                None,
                FieldMap::new(),
            )
            .await?;
        Ok(serde_json::from_value(body)?)
    }

    #[instrument(skip(self, unsubscribe), fields(address = %mask_address(&unsubscribe.address)))]
    async fn create(&self, unsubscribe: &Unsubscribe) -> MailgunResult<bool> {
        let domain = self.executor.domain();
        self.executor
            .execute(
                Method::POST,
                &[domain, "unsubscribes"],
                Some(unsubscribe),
                FieldMap::new(),
            )
            .await?;
        Ok(true)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> MailgunResult<bool> {
        let domain = self.executor.domain();
        self.executor
            .execute(
                Method::DELETE,
                &[domain, "unsubscribes", id],
                None,
                FieldMap::new(),
            )
            .await?;
        Ok(true)
    }

    #[instrument(skip(self, address), fields(address = %mask_address(address)))]
    async fn delete_for_address(&self, address: &str) -> MailgunResult<bool> {
        let domain = self.executor.domain();
        self.executor
            .execute(
                Method::DELETE,
                &[domain, "unsubscribes", address],
                None,
                FieldMap::new(),
            )
            .await?;
        Ok(true)
    }
}
