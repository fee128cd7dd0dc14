//! Mailing list members service implementation.

use super::*;
use crate::client::{load_wrapped, RequestExecutor};
use crate::errors::MailgunResult;
use crate::observability::mask_address;
use crate::types::{FieldMap, ListMember, ListOptions, MailingList, Page};
use async_trait::async_trait;
use http::Method;
use tracing::instrument;

/// Trait for mailing list member operations
#[async_trait]
pub trait MembersServiceTrait: Send + Sync {
    /// List the members of a list
    async fn list(&self, list_address: &str, options: ListOptions)
        -> MailgunResult<Page<ListMember>>;

    /// Get one member
    async fn get(&self, list_address: &str, member_address: &str) -> MailgunResult<ListMember>;

    /// Add a member, optionally updating it when it already exists
    async fn add(
        &self,
        list_address: &str,
        member: &ListMember,
        upsert: Upsert,
    ) -> MailgunResult<ListMember>;

    /// Add up to 1,000 members in one call and return the updated list
    async fn add_many(
        &self,
        list_address: &str,
        members: &[ListMember],
        upsert: Upsert,
    ) -> MailgunResult<MailingList>;

    /// Update a member; only the fields set on `member` change
    async fn update(
        &self,
        list_address: &str,
        member_address: &str,
        member: &ListMember,
    ) -> MailgunResult<ListMember>;

    /// Remove a member from a list
    async fn delete(&self, list_address: &str, member_address: &str) -> MailgunResult<bool>;
}

/// Mailing list members service implementation
#[derive(Clone)]
pub struct MembersService {
    executor: RequestExecutor,
}

impl MembersService {
    /// Create a new members service
    pub fn new(executor: RequestExecutor) -> Self {
        Self { executor }
    }
}

#[async_trait]
impl MembersServiceTrait for MembersService {
    #[instrument(skip(self, list_address), fields(list = %mask_address(list_address)))]
    async fn list(
        &self,
        list_address: &str,
        options: ListOptions,
    ) -> MailgunResult<Page<ListMember>> {
        let body = self
            .executor
            .execute(
                Method::GET,
                &["lists", list_address, "members"],
                None,
                options.to_params(),
            )
            .await?;
        Ok(serde_json::from_value(body)?)
    }

    #[instrument(
        skip(self, list_address, member_address),
        fields(list = %mask_address(list_address), member = %mask_address(member_address))
    )]
    async fn get(&self, list_address: &str, member_address: &str) -> MailgunResult<ListMember> {
        let body = self
            .executor
            .execute(
                Method::GET,
                &["lists", list_address, "members", member_address],
                None,
                FieldMap::new(),
            )
            .await?;
        load_wrapped(body, "member")
    }

    #[instrument(
        skip(self, list_address, member),
        fields(list = %mask_address(list_address), member = %mask_address(&member.address))
    )]
    async fn add(
        &self,
        list_address: &str,
        member: &ListMember,
        upsert: Upsert,
    ) -> MailgunResult<ListMember> {
        let body = self
            .executor
            .execute(
                Method::POST,
                &["lists", list_address, "members"],
                Some(member),
                upsert.to_params(),
            )
            .await?;
        load_wrapped(body, "member")
    }

    #[instrument(
        skip(self, list_address, members),
        fields(list = %mask_address(list_address), count = members.len())
    )]
    async fn add_many(
        &self,
        list_address: &str,
        members: &[ListMember],
        upsert: Upsert,
    ) -> MailgunResult<MailingList> {
        let params = bulk_member_params(members, upsert)?;
        let body = self
            .executor
            .execute(
                Method::POST,
                &["lists", list_address, "members.json"],
                None,
                params,
            )
            .await?;
        load_wrapped(body, "list")
    }

    #[instrument(
        skip(self, list_address, member_address, member),
        fields(list = %mask_address(list_address), member = %mask_address(member_address))
    )]
    async fn update(
        &self,
        list_address: &str,
        member_address: &str,
        member: &ListMember,
    ) -> MailgunResult<ListMember> {
        let body = self
            .executor
            .execute(
                Method::PUT,
                &["lists", list_address, "members", member_address],
                Some(member),
                FieldMap::new(),
            )
            .await?;
        load_wrapped(body, "member")
    }

    #[instrument(
        skip(self, list_address, member_address),
        fields(list = %mask_address(list_address), member = %mask_address(member_address))
    )]
    async fn delete(&self, list_address: &str, member_address: &str) -> MailgunResult<bool> {
        self.executor
            .execute(
                Method::DELETE,
                &["lists", list_address, "members", member_address],
                None,
                FieldMap::new(),
            )
            .await?;
        Ok(true)
    }
}
