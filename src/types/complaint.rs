//! Spam complaint entity.

use super::marshal::{deserialize_timestamp, FieldMap, Sendable};
use super::Resource;
use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

/// A spam complaint record
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Complaint {
    /// Complaining address, its natural key
    pub address: String,
    /// Number of complaints (server-assigned)
    #[serde(default)]
    pub count: Option<u64>,
    /// Creation time (server-assigned)
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub created_at: Option<DateTime<FixedOffset>>,
}

impl Complaint {
    /// Create a complaint record for an address
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            count: None,
            created_at: None,
        }
    }
}

impl Sendable for Complaint {
    fn to_fields(&self) -> FieldMap {
        let mut fields = FieldMap::new();
        fields.insert_opt("address", Some(&self.address));
        fields
    }
}

impl Resource for Complaint {
    fn key(&self) -> &str {
        &self.address
    }
}
