//! Bounce record entity.

use super::marshal::{deserialize_timestamp, FieldMap, Sendable};
use super::Resource;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer};

/// Default SMTP error code for manually added bounces
pub const DEFAULT_BOUNCE_CODE: u16 = 550;

fn default_code() -> u16 {
    DEFAULT_BOUNCE_CODE
}

// The API has reported codes both as numbers and as strings.
fn deserialize_code<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Code {
        Number(u16),
        Text(String),
    }

    match Code::deserialize(deserializer)? {
        Code::Number(code) => Ok(code),
        Code::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// A bounce record
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Bounce {
    /// Bounced address, its natural key
    pub address: String,
    /// SMTP error code
    #[serde(default = "default_code", deserialize_with = "deserialize_code")]
    pub code: u16,
    /// Error description
    #[serde(default)]
    pub error: Option<String>,
    /// Creation time (server-assigned)
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub created_at: Option<DateTime<FixedOffset>>,
}

impl Bounce {
    /// Create a bounce record with the default 550 code
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            code: DEFAULT_BOUNCE_CODE,
            error: None,
            created_at: None,
        }
    }

    /// Set the SMTP error code
    pub fn code(mut self, code: u16) -> Self {
        self.code = code;
        self
    }

    /// Set the error description
    pub fn error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}

impl Sendable for Bounce {
    fn to_fields(&self) -> FieldMap {
        let mut fields = FieldMap::new();
        fields.insert_opt("address", Some(&self.address));
        fields.insert("code", self.code.to_string());
        fields.insert_opt("error", self.error.as_deref());
        fields
    }
}

impl Resource for Bounce {
    fn key(&self) -> &str {
        &self.address
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use serde_json::json;

    #[test]
    fn test_fields() {
        let fields = Bounce::new("gone@example.com").to_fields();
        assert_eq!(fields.get("code"), Some("550"));
        assert!(!fields.contains_key("error"));

        let fields = Bounce::new("gone@example.com")
            .code(554)
            .error("Mailbox full")
            .to_fields();
        assert_eq!(fields.get("code"), Some("554"));
        assert_eq!(fields.get("error"), Some("Mailbox full"));
    }

    #[test]
    fn test_load() {
        let bounce = Bounce::load(fixtures::bounce("gone@example.com")).unwrap();
        assert_eq!(bounce.code, 550);
        assert_eq!(bounce.error.as_deref(), Some("No such mailbox"));
    }

    #[test]
    fn test_load_string_code() {
        let bounce = Bounce::load(json!({"address": "x@example.com", "code": "421"})).unwrap();
        assert_eq!(bounce.code, 421);
        assert_eq!(bounce.created_at, None);
    }
}
