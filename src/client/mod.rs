//! Mailgun client implementation.
//!
//! Provides the main entry point for interacting with the Mailgun API.

mod executor;

pub use executor::{classify, RequestExecutor};
pub(crate) use executor::{extract, load_wrapped};

use crate::config::MailgunConfig;
use crate::errors::MailgunResult;
use crate::services::{
    BouncesService, ComplaintsService, ListsService, MembersService, MessagesService,
    RoutesService, UnsubscribesService,
};
use crate::transport::{HttpTransport, ReqwestTransport};
use crate::types::{FieldMap, Message, Sendable};
use http::Method;
use serde_json::Value;
use std::sync::Arc;

/// Trait defining the Mailgun client interface
pub trait Mailgun: Send + Sync {
    /// Get the configuration
    fn config(&self) -> &MailgunConfig;

    /// Create a message seeded with the configured sender defaults
    fn new_message(&self) -> Message;

    /// Get the messages service
    fn messages(&self) -> &dyn crate::services::messages::MessagesServiceTrait;

    /// Get the mailing lists service
    fn lists(&self) -> &dyn crate::services::lists::ListsServiceTrait;

    /// Get the mailing list members service
    fn members(&self) -> &dyn crate::services::members::MembersServiceTrait;

    /// Get the unsubscribes service
    fn unsubscribes(&self) -> &dyn crate::services::unsubscribes::UnsubscribesServiceTrait;

    /// Get the complaints service
    fn complaints(&self) -> &dyn crate::services::complaints::ComplaintsServiceTrait;

    /// Get the bounces service
    fn bounces(&self) -> &dyn crate::services::bounces::BouncesServiceTrait;

    /// Get the routes service
    fn routes(&self) -> &dyn crate::services::routes::RoutesServiceTrait;
}

/// Main Mailgun client implementation.
///
/// One client owns one transport; every service shares it.
#[derive(Clone)]
pub struct MailgunClient {
    executor: RequestExecutor,
    messages_service: MessagesService,
    lists_service: ListsService,
    members_service: MembersService,
    unsubscribes_service: UnsubscribesService,
    complaints_service: ComplaintsService,
    bounces_service: BouncesService,
    routes_service: RoutesService,
}

impl MailgunClient {
    /// Create a new Mailgun client with the given configuration
    pub fn new(config: MailgunConfig) -> MailgunResult<Self> {
        Self::with_transport(config, Arc::new(ReqwestTransport::new()))
    }

    /// Create a new Mailgun client with a custom transport
    pub fn with_transport(
        config: MailgunConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> MailgunResult<Self> {
        config.validate()?;
        let executor = RequestExecutor::new(Arc::new(config), transport);

        Ok(Self {
            messages_service: MessagesService::new(executor.clone()),
            lists_service: ListsService::new(executor.clone()),
            members_service: MembersService::new(executor.clone()),
            unsubscribes_service: UnsubscribesService::new(executor.clone()),
            complaints_service: ComplaintsService::new(executor.clone()),
            bounces_service: BouncesService::new(executor.clone()),
            routes_service: RoutesService::new(executor.clone()),
            executor,
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &MailgunConfig {
        self.executor.config()
    }

    /// Get the sending domain
    pub fn domain(&self) -> &str {
        self.executor.domain()
    }

    /// Create a message seeded with the configured sender defaults
    pub fn new_message(&self) -> Message {
        Message::with_defaults(&self.config().message_defaults)
    }

    /// Execute a raw API call.
    ///
    /// `segments` are joined under the base URL and percent-encoded one by
    /// one. Entity fields are merged with `params`, which win on collisions.
    pub async fn execute(
        &self,
        method: Method,
        segments: &[&str],
        entity: Option<&(dyn Sendable + Sync)>,
        params: FieldMap,
    ) -> MailgunResult<Value> {
        self.executor.execute(method, segments, entity, params).await
    }

    /// Get the messages service
    pub fn messages(&self) -> &MessagesService {
        &self.messages_service
    }

    /// Get the mailing lists service
    pub fn lists(&self) -> &ListsService {
        &self.lists_service
    }

    /// Get the mailing list members service
    pub fn members(&self) -> &MembersService {
        &self.members_service
    }

    /// Get the unsubscribes service
    pub fn unsubscribes(&self) -> &UnsubscribesService {
        &self.unsubscribes_service
    }

    /// Get the complaints service
    pub fn complaints(&self) -> &ComplaintsService {
        &self.complaints_service
    }

    /// Get the bounces service
    pub fn bounces(&self) -> &BouncesService {
        &self.bounces_service
    }

    /// Get the routes service
    pub fn routes(&self) -> &RoutesService {
        &self.routes_service
    }
}

impl Mailgun for MailgunClient {
    fn config(&self) -> &MailgunConfig {
        self.executor.config()
    }

    fn new_message(&self) -> Message {
        MailgunClient::new_message(self)
    }

    fn messages(&self) -> &dyn crate::services::messages::MessagesServiceTrait {
        &self.messages_service
    }

    fn lists(&self) -> &dyn crate::services::lists::ListsServiceTrait {
        &self.lists_service
    }

    fn members(&self) -> &dyn crate::services::members::MembersServiceTrait {
        &self.members_service
    }

    fn unsubscribes(&self) -> &dyn crate::services::unsubscribes::UnsubscribesServiceTrait {
        &self.unsubscribes_service
    }

    fn complaints(&self) -> &dyn crate::services::complaints::ComplaintsServiceTrait {
        &self.complaints_service
    }

    fn bounces(&self) -> &dyn crate::services::bounces::BouncesServiceTrait {
        &self.bounces_service
    }

    fn routes(&self) -> &dyn crate::services::routes::RoutesServiceTrait {
        &self.routes_service
    }
}

impl std::fmt::Debug for MailgunClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailgunClient")
            .field("executor", &self.executor)
            .finish()
    }
}
