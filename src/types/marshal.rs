//! Field-map marshaling shared by all entities.
//!
//! Wire rules: unset values are omitted, repeated values become
//! `name[1]`, `name[2]`, ..., booleans are `yes`/`no`, and points in
//! time are RFC-2822 dates.

use crate::transport::FileUpload;
use chrono::{DateTime, FixedOffset, TimeZone};
use serde::{Deserialize, Deserializer};
use std::fmt::Display;

/// An entity that renders itself into request fields
pub trait Sendable {
    /// Flat field map for a POST/PUT request
    fn to_fields(&self) -> FieldMap;

    /// Files to upload alongside the fields
    fn files(&self) -> Vec<FileUpload> {
        Vec::new()
    }
}

/// Ordered request fields with unique keys.
///
/// Insertion order is kept so the encoded body is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    fields: Vec<(String, String)>,
}

impl FieldMap {
    /// Create an empty field map
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing an existing value for the same key in place
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((key, value)),
        }
    }

    /// Set a field only when the value is present and non-empty
    pub fn insert_opt<V: AsRef<str>>(&mut self, key: &str, value: Option<V>) {
        if let Some(value) = value {
            let value = value.as_ref();
            if !value.is_empty() {
                self.insert(key, value);
            }
        }
    }

    /// Set a `yes`/`no` field when the flag is set
    pub fn insert_flag(&mut self, key: &str, flag: Option<bool>) {
        if let Some(flag) = flag {
            self.insert(key, yes_no(flag));
        }
    }

    /// Set `name[1]`, `name[2]`, ... for each value, skipping empty values
    /// without leaving gaps in the numbering
    pub fn insert_indexed<I, V>(&mut self, name: &str, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Display,
    {
        let rendered = values
            .into_iter()
            .map(|v| v.to_string())
            .filter(|v| !v.is_empty());
        for (i, value) in rendered.enumerate() {
            self.insert(indexed_key(name, i + 1), value);
        }
    }

    /// Merge another map into this one; its values win on collisions
    pub fn merge(&mut self, other: FieldMap) {
        for (key, value) in other.fields {
            self.insert(key, value);
        }
    }

    /// Look up a field
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether a field is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether there are no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over fields in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    /// Consume into key/value pairs
    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.fields
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = FieldMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl IntoIterator for FieldMap {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

/// `name[index]`
pub fn indexed_key(name: &str, index: usize) -> String {
    format!("{}[{}]", name, index)
}

/// Wire form of a boolean
pub fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

/// RFC-2822 date with a two-digit day, e.g. `Tue, 01 Jan 2013 10:00:00 +0000`
pub fn format_rfc2822<Tz>(time: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    time.format("%a, %d %b %Y %H:%M:%S %z").to_string()
}

/// Parse a server timestamp, RFC-2822 first, RFC-3339 as a fallback
pub fn parse_timestamp(raw: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
    DateTime::parse_from_rfc2822(raw).or_else(|_| DateTime::parse_from_rfc3339(raw))
}

/// Serde adapter for optional server timestamps
pub(crate) fn deserialize_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<FixedOffset>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => parse_timestamp(raw)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
