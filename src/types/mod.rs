//! Domain entities for the Mailgun API.
//!
//! Every writable entity implements [`Sendable`], turning itself into the
//! flat field map the API expects. Every readable entity implements
//! [`Resource`], which loads it from a parsed JSON item and names its
//! natural key for re-keying list results.

use crate::errors::MailgunResult;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub mod bounce;
pub mod complaint;
pub mod list;
pub mod marshal;
pub mod member;
pub mod message;
pub mod page;
pub mod route;
pub mod unsubscribe;

pub use bounce::*;
pub use complaint::*;
pub use list::*;
pub use marshal::{FieldMap, Sendable};
pub use member::*;
pub use message::*;
pub use page::*;
pub use route::*;
pub use unsubscribe::*;

/// An email address with an optional display name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address {
    /// Bare email address
    pub address: String,
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Address {
    /// Create a new address
    pub fn new(address: impl Into<String>, name: Option<String>) -> Self {
        Self {
            address: address.into(),
            name,
        }
    }

    /// Create an address without a display name
    pub fn bare(address: impl Into<String>) -> Self {
        Self::new(address, None)
    }
}

impl From<&str> for Address {
    fn from(s: &str) -> Self {
        Self::bare(s)
    }
}

impl From<String> for Address {
    fn from(s: String) -> Self {
        Self::bare(s)
    }
}

/// `Name <address>` when a name is present, else the bare address
impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.name.as_deref().filter(|n| !n.is_empty()) {
            Some(name) => write!(f, "{} <{}>", name, self.address),
            None => write!(f, "{}", self.address),
        }
    }
}

/// A record the API returns, loadable from one JSON item
pub trait Resource: DeserializeOwned {
    /// Natural identifier used to key list results (address or id)
    fn key(&self) -> &str;

    /// Populate the entity, server-assigned fields included, from JSON
    fn load(data: serde_json::Value) -> MailgunResult<Self> {
        Ok(serde_json::from_value(data)?)
    }
}
