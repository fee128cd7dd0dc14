//! Mailing list member entity.

use super::marshal::{FieldMap, Sendable};
use super::Resource;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Maximum number of members accepted by one bulk-add call
pub const MAX_BULK_MEMBERS: usize = 1000;

/// A member of a mailing list
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ListMember {
    /// Member address, its natural key
    pub address: String,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Custom variables
    #[serde(default)]
    pub vars: Map<String, Value>,
    /// Subscription state; left out of writes when unset
    #[serde(default)]
    pub subscribed: Option<bool>,
}

impl ListMember {
    /// Create a new member
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            name: None,
            vars: Map::new(),
            subscribed: None,
        }
    }

    /// Set the name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add a custom variable
    pub fn var(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// Set the subscription state
    pub fn subscribed(mut self, subscribed: bool) -> Self {
        self.subscribed = Some(subscribed);
        self
    }
}

impl Sendable for ListMember {
    fn to_fields(&self) -> FieldMap {
        let mut fields = FieldMap::new();
        fields.insert_opt("address", Some(&self.address));
        fields.insert_opt("name", self.name.as_deref());
        if !self.vars.is_empty() {
            fields.insert("vars", Value::Object(self.vars.clone()).to_string());
        }
        fields.insert_flag("subscribed", self.subscribed);
        fields
    }
}

impl Resource for ListMember {
    fn key(&self) -> &str {
        &self.address
    }
}
