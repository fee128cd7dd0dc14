//! Inbound routing rule entity.

use super::marshal::{deserialize_timestamp, FieldMap, Sendable};
use super::Resource;
use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

/// Expression matching every inbound message
pub const CATCH_ALL: &str = "catch_all()";

fn default_expression() -> String {
    CATCH_ALL.to_string()
}

/// An inbound route: a filter expression plus the actions to run on a match
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Route {
    /// Route id (server-assigned), its natural key
    #[serde(default)]
    pub id: Option<String>,
    /// Evaluation priority; lower runs first
    #[serde(default)]
    pub priority: i64,
    /// Filter expression
    #[serde(default = "default_expression")]
    pub expression: String,
    /// Actions, in order
    #[serde(default)]
    pub actions: Vec<String>,
    /// Description
    #[serde(default)]
    pub description: Option<String>,
    /// Creation time (server-assigned)
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub created_at: Option<DateTime<FixedOffset>>,
}

impl Default for Route {
    fn default() -> Self {
        Self {
            id: None,
            priority: 0,
            expression: default_expression(),
            actions: Vec::new(),
            description: None,
            created_at: None,
        }
    }
}

impl Route {
    /// Create a catch-all route with no actions
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the priority
    pub fn priority(mut self, priority: i64) -> Self {
        self.priority = priority;
        self
    }

    /// Set a raw filter expression
    pub fn expression(mut self, expression: impl Into<String>) -> Self {
        self.expression = expression.into();
        self
    }

    /// Match the recipient against a regular expression.
    ///
    /// Captures can be referenced from actions, e.g. `\1` or `\g<name>`.
    pub fn match_recipient(self, pattern: &str) -> Self {
        self.expression(format!("match_recipient(\"{}\")", pattern))
    }

    /// Match a MIME header against a regular expression
    pub fn match_header(self, header: &str, pattern: &str) -> Self {
        self.expression(format!("match_header(\"{}\", \"{}\")", header, pattern))
    }

    /// Match every message
    pub fn catch_all(self) -> Self {
        self.expression(CATCH_ALL)
    }

    /// Append a raw action
    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.actions.push(action.into());
        self
    }

    /// Append a forward action to an address or URL
    pub fn forward(self, destination: &str) -> Self {
        self.action(forward_action(destination))
    }

    /// Append a stop action
    pub fn stop(self) -> Self {
        self.action(STOP_ACTION)
    }

    /// Remove every occurrence of an action
    pub fn remove_action(&mut self, action: &str) {
        self.actions.retain(|a| a != action);
    }

    /// Remove a forward action
    pub fn remove_forward(&mut self, destination: &str) {
        self.remove_action(&forward_action(destination));
    }

    /// Remove the stop action
    pub fn remove_stop(&mut self) {
        self.remove_action(STOP_ACTION);
    }

    /// Set the description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

const STOP_ACTION: &str = "stop()";

fn forward_action(destination: &str) -> String {
    format!("forward(\"{}\")", destination)
}

impl Sendable for Route {
    fn to_fields(&self) -> FieldMap {
        let mut fields = FieldMap::new();
        fields.insert("priority", self.priority.to_string());
        fields.insert_opt("expression", Some(&self.expression));
        fields.insert_indexed("action", &self.actions);
        fields.insert_opt("description", self.description.as_deref());
        fields
    }
}

impl Resource for Route {
    fn key(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }
}
