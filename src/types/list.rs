//! Mailing list entity.

use super::marshal::{deserialize_timestamp, FieldMap, Sendable};
use super::Resource;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Who may post to a mailing list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    /// Only authenticated API calls
    #[default]
    Readonly,
    /// List members
    Members,
    /// Anyone
    Everyone,
}

impl AccessLevel {
    /// Wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessLevel::Readonly => "readonly",
            AccessLevel::Members => "members",
            AccessLevel::Everyone => "everyone",
        }
    }
}

/// A mailing list
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MailingList {
    /// List address, its natural key
    pub address: String,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Description
    #[serde(default)]
    pub description: Option<String>,
    /// Access level; left out of writes when unset
    #[serde(default)]
    pub access_level: Option<AccessLevel>,
    /// Number of members (server-assigned)
    #[serde(default)]
    pub members_count: Option<u64>,
    /// Creation time (server-assigned)
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub created_at: Option<DateTime<FixedOffset>>,
}

impl MailingList {
    /// Create a new mailing list
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            name: None,
            description: None,
            access_level: None,
            members_count: None,
            created_at: None,
        }
    }

    /// Set the name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the access level
    pub fn access_level(mut self, level: AccessLevel) -> Self {
        self.access_level = Some(level);
        self
    }
}

impl Sendable for MailingList {
    fn to_fields(&self) -> FieldMap {
        let mut fields = FieldMap::new();
        fields.insert_opt("address", Some(&self.address));
        fields.insert_opt("name", self.name.as_deref());
        fields.insert_opt("description", self.description.as_deref());
        fields.insert_opt("access_level", self.access_level.map(|l| l.as_str()));
        fields
    }
}

impl Resource for MailingList {
    fn key(&self) -> &str {
        &self.address
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fields() {
        let list = MailingList::new("dev@example.com")
            .name("Developers")
            .access_level(AccessLevel::Members);
        let fields = list.to_fields();

        assert_eq!(
            fields.iter().collect::<Vec<_>>(),
            vec![
                ("address", "dev@example.com"),
                ("name", "Developers"),
                ("access_level", "members"),
            ]
        );
    }

    #[test]
    fn test_load() {
        let list = MailingList::load(fixtures::mailing_list("dev@example.com")).unwrap();

        assert_eq!(list.key(), "dev@example.com");
        assert_eq!(list.access_level, Some(AccessLevel::Readonly));
        assert_eq!(list.members_count, Some(3));
        assert!(list.created_at.is_some());
    }
}
