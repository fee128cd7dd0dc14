//! Routes service implementation.

use super::*;
use crate::client::{load_wrapped, RequestExecutor};
use crate::errors::MailgunResult;
use crate::types::{FieldMap, ListOptions, Page, Route};
use async_trait::async_trait;
use http::Method;
use tracing::instrument;

/// Trait for route operations
#[async_trait]
pub trait RoutesServiceTrait: Send + Sync {
    /// List routes
    async fn list(&self, options: ListOptions) -> MailgunResult<Page<Route>>;

    /// Get one route
    async fn get(&self, id: &str) -> MailgunResult<Route>;

    /// Create a route
    async fn create(&self, route: &Route) -> MailgunResult<Route>;

    /// Update a route; only the fields set on `route` change
    async fn update(&self, id: &str, route: &Route) -> MailgunResult<Route>;

    /// Delete a route
    async fn delete(&self, id: &str) -> MailgunResult<bool>;
}

/// Routes service implementation
#[derive(Clone)]
pub struct RoutesService {
    executor: RequestExecutor,
}

impl RoutesService {
    /// Create a new routes service
    pub fn new(executor: RequestExecutor) -> Self {
        Self { executor }
    }
}

#[async_trait]
impl RoutesServiceTrait for RoutesService {
    #[instrument(skip(self))]
    async fn list(&self, options: ListOptions) -> MailgunResult<Page<Route>> {
        let body = self
            .executor
            .execute(Method::GET, &["routes"], None, options.to_params())
            .await?;
        Ok(serde_json::from_value(body)?)
    }

    #[instrument(skip(self))]
    async fn get(&self, id: &str) -> MailgunResult<Route> {
        let body = self
            .executor
            .execute(Method::GET, &["routes", id], None, FieldMap::new())
            .await?;
        load_wrapped(body, "route")
    }

    #[instrument(skip(self, route), fields(expression = %route.expression))]
    async fn create(&self, route: &Route) -> MailgunResult<Route> {
        let body = self
            .executor
            .execute(Method::POST, &["routes"], Some(route), FieldMap::new())
            .await?;
        load_wrapped(body, "route")
    }

    #[instrument(skip(self, route))]
    async fn update(&self, id: &str, route: &Route) -> MailgunResult<Route> {
        let body = self
            .executor
            .execute(Method::PUT, &["routes", id], Some(route), FieldMap::new())
            .await?;
        route_from_update(body)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> MailgunResult<bool> {
        self.executor
            .execute(Method::DELETE, &["routes", id], None, FieldMap::new())
            .await?;
        Ok(true)
    }
}
