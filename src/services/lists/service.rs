//! Mailing lists service implementation.

use crate::client::{load_wrapped, RequestExecutor};
use crate::errors::MailgunResult;
use crate::observability::mask_address;
use crate::types::{FieldMap, ListOptions, MailingList, Page};
use async_trait::async_trait;
use http::Method;
use serde_json::Value;
use tracing::instrument;

/// Trait for mailing list operations
#[async_trait]
pub trait ListsServiceTrait: Send + Sync {
    /// List mailing lists
    async fn list(&self, options: ListOptions) -> MailgunResult<Page<MailingList>>;

    /// Get one mailing list
    async fn get(&self, address: &str) -> MailgunResult<MailingList>;

    /// Create a mailing list
    async fn create(&self, list: &MailingList) -> MailgunResult<MailingList>;

    /// Update the list at `address`; only the fields set on `list` change
    async fn update(&self, address: &str, list: &MailingList) -> MailgunResult<MailingList>;

    /// Delete a mailing list
    async fn delete(&self, address: &str) -> MailgunResult<bool>;

    /// Delivery statistics for a list, as returned by the API
    async fn stats(&self, address: &str) -> MailgunResult<Value>;
}

/// Mailing lists service implementation
#[derive(Clone)]
pub struct ListsService {
    executor: RequestExecutor,
}

impl ListsService {
    /// Create a new lists service
    pub fn new(executor: RequestExecutor) -> Self {
        Self { executor }
    }
}

#[async_trait]
impl ListsServiceTrait for ListsService {
    #[instrument(skip(self))]
    async fn list(&self, options: ListOptions) -> MailgunResult<Page<MailingList>> {
        let body = self
            .executor
            .execute(Method::GET, &["lists"], None, options.to_params())
            .await?;
        Ok(serde_json::from_value(body)?)
    }

    #[instrument(skip(self, address), fields(address = %mask_address(address)))]
    async fn get(&self, address: &str) -> MailgunResult<MailingList> {
        let body = self
            .executor
            .execute(Method::GET, &["lists", address], None, FieldMap::new())
            .await?;
        load_wrapped(body, "list")
    }

    #[instrument(skip(self, list), fields(address = %mask_address(&list.address)))]
    async fn create(&self, list: &MailingList) -> MailgunResult<MailingList> {
        let body = self
            .executor
            .execute(Method::POST, &["lists"], Some(list), FieldMap::new())
            .await?;
        load_wrapped(body, "list")
    }

    #[instrument(skip(self, address, list), fields(address = %mask_address(address)))]
    async fn update(&self, address: &str, list: &MailingList) -> MailgunResult<MailingList> {
        let body = self
            .executor
            .execute(Method::PUT, &["lists", address], Some(list), FieldMap::new())
            .await?;
        load_wrapped(body, "list")
    }

    #[instrument(skip(self, address), fields(address = %mask_address(address)))]
    async fn delete(&self, address: &str) -> MailgunResult<bool> {
        self.executor
            .execute(Method::DELETE, &["lists", address], None, FieldMap::new())
            .await?;
        Ok(true)
    }

    #[instrument(skip(self, address), fields(address = %mask_address(address)))]
    async fn stats(&self, address: &str) -> MailgunResult<Value> {
        self.executor
            .execute(Method::GET, &["lists", address, "stats"], None, FieldMap::new())
            .await
    }
}
