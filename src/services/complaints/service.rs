//! Spam complaints service implementation.

use crate::client::{load_wrapped, RequestExecutor};
use crate::errors::MailgunResult;
use crate::observability::mask_address;
use crate::types::{Complaint, FieldMap, ListOptions, Page};
use async_trait::async_trait;
use http::Method;
use tracing::instrument;

/// Trait for spam complaint operations
#[async_trait]
pub trait ComplaintsServiceTrait: Send + Sync {
    /// List complaints for the domain
    async fn list(&self, options: ListOptions) -> MailgunResult<Page<Complaint>>;

    /// Get the complaint record for an address
    async fn get(&self, address: &str) -> MailgunResult<Complaint>;

    /// Add an address to the complaints table
    async fn create(&self, complaint: &Complaint) -> MailgunResult<bool>;

    /// Remove an address from the complaints table
    async fn delete(&self, address: &str) -> MailgunResult<bool>;
}

/// Spam complaints service implementation
#[derive(Clone)]
pub struct ComplaintsService {
    executor: RequestExecutor,
}

impl ComplaintsService {
    /// Create a new complaints service
    pub fn new(executor: RequestExecutor) -> Self {
        Self { executor }
    }
}

#[async_trait]
impl ComplaintsServiceTrait for ComplaintsService {
    #[instrument(skip(self))]
    async fn list(&self, options: ListOptions) -> MailgunResult<Page<Complaint>> {
        let domain = self.executor.domain();
        let body = self
            .executor
            .execute(Method::GET, &[domain, "complaints"], None, options.to_params())
            .await?;
        Ok(serde_json::from_value(body)?)
    }

    #[instrument(skip(self, address), fields(address = %mask_address(address)))]
    async fn get(&self, address: &str) -> MailgunResult<Complaint> {
        let domain = self.executor.domain();
        let body = self
            .executor
            .execute(
                Method::GET,
                &[domain, "complaints", address],
                None,
                FieldMap::new(),
            )
            .await?;
        load_wrapped(body, "complaint")
    }

    #[instrument(skip(self, complaint), fields(address = %mask_address(&complaint.address)))]
    async fn create(&self, complaint: &Complaint) -> MailgunResult<bool> {
        let domain = self.executor.domain();
        self.executor
            .execute(
                Method::POST,
                &[domain, "complaints"],
                Some(complaint),
                FieldMap::new(),
            )
            .await?;
        Ok(true)
    }

    #[instrument(skip(self, address), fields(address = %mask_address(address)))]
    async fn delete(&self, address: &str) -> MailgunResult<bool> {
        let domain = self.executor.domain();
        self.executor
            .execute(
                Method::DELETE,
                &[domain, "complaints", address],
                None,
                FieldMap::new(),
            )
            .await?;
        Ok(true)
    }
}
