//! Unsubscribe record entity.

use super::marshal::{deserialize_timestamp, FieldMap, Sendable};
use super::Resource;
use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

/// Tag value meaning "every message from the domain"
pub const ALL_TAGS: &str = "*";

fn all_tags() -> String {
    ALL_TAGS.to_string()
}

/// An unsubscribe record
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Unsubscribe {
    /// Record id (server-assigned), its natural key
    #[serde(default)]
    pub id: Option<String>,
    /// Unsubscribed address
    pub address: String,
    /// Tag unsubscribed from
    #[serde(default = "all_tags")]
    pub tag: String,
    /// Creation time (server-assigned)
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub created_at: Option<DateTime<FixedOffset>>,
}

impl Unsubscribe {
    /// Unsubscribe an address from the whole domain
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            id: None,
            address: address.into(),
            tag: all_tags(),
            created_at: None,
        }
    }

    /// Limit the unsubscribe to one tag
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }
}

impl Sendable for Unsubscribe {
    fn to_fields(&self) -> FieldMap {
        let mut fields = FieldMap::new();
        fields.insert_opt("address", Some(&self.address));
        fields.insert_opt("tag", Some(&self.tag));
        fields
    }
}

impl Resource for Unsubscribe {
    fn key(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_fields_default_tag() {
        let fields = Unsubscribe::new("a@example.com").to_fields();
        assert_eq!(fields.get("address"), Some("a@example.com"));
        assert_eq!(fields.get("tag"), Some("*"));

        let fields = Unsubscribe::new("a@example.com").tag("newsletter").to_fields();
        assert_eq!(fields.get("tag"), Some("newsletter"));
    }

    #[test]
    fn test_load() {
        let record = Unsubscribe::load(fixtures::unsubscribe("u1", "a@example.com")).unwrap();
        assert_eq!(record.key(), "u1");
        assert_eq!(record.tag, "*");
        assert!(record.created_at.is_some());
    }
}
