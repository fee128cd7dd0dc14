//! Paginated list results.

use super::marshal::FieldMap;
use super::Resource;
use serde::Deserialize;
use std::collections::HashMap;

/// Default page size
pub const DEFAULT_LIMIT: u32 = 100;

/// Paging parameters for list operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListOptions {
    /// Maximum number of records to return
    pub limit: u32,
    /// Number of records to skip
    pub skip: u32,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            skip: 0,
        }
    }
}

impl ListOptions {
    /// Create options with a page size
    pub fn limit(limit: u32) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    /// Set the number of records to skip
    pub fn skip(mut self, skip: u32) -> Self {
        self.skip = skip;
        self
    }

    /// Query parameters
    pub fn to_params(&self) -> FieldMap {
        let mut params = FieldMap::new();
        params.insert("limit", self.limit.to_string());
        params.insert("skip", self.skip.to_string());
        params
    }
}

/// One page of a list operation.
///
/// `items` keeps the server's order; [`Page::into_keyed`] trades that
/// order for lookup by natural key.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    /// Records in server order
    #[serde(default)]
    pub items: Vec<T>,
    /// Total number of records on the server, when reported
    #[serde(default)]
    pub total_count: Option<u64>,
}

impl<T: Resource> Page<T> {
    /// Number of records on this page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the page is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Find a record by natural key
    pub fn get(&self, key: &str) -> Option<&T> {
        self.items.iter().find(|item| item.key() == key)
    }

    /// Re-key the records by natural key; a later duplicate replaces an earlier one
    pub fn into_keyed(self) -> HashMap<String, T> {
        self.items
            .into_iter()
            .map(|item| (item.key().to_string(), item))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::types::{Bounce, ListMember, MailingList, Route};
    use serde_json::json;

    #[test]
    fn test_list_options() {
        let params = ListOptions::default().to_params();
        assert_eq!(params.get("limit"), Some("100"));
        assert_eq!(params.get("skip"), Some("0"));

        let params = ListOptions::limit(10).skip(20).to_params();
        assert_eq!(params.get("limit"), Some("10"));
        assert_eq!(params.get("skip"), Some("20"));
    }

    #[test]
    fn test_page_into_keyed() {
        let body = json!({
            "total_count": 2,
            "items": [
                fixtures::list_member("b@example.com"),
                fixtures::list_member("a@example.com"),
            ]
        });
        let page: Page<ListMember> = serde_json::from_value(body).unwrap();

        assert_eq!(page.total_count, Some(2));
        assert_eq!(page.items[0].address, "b@example.com");
        assert!(page.get("a@example.com").is_some());

        let keyed = page.into_keyed();
        assert_eq!(keyed.len(), 2);
        assert_eq!(keyed["a@example.com"].address, "a@example.com");
    }

    #[test]
    fn test_page_of_entities_without_default() {
        let body = json!({
            "total_count": 1,
            "items": [fixtures::bounce("jane@example.com")]
        });
        let page: Page<Bounce> = serde_json::from_value(body).unwrap();
        assert_eq!(page.items[0].address, "jane@example.com");

        let empty: Page<MailingList> = serde_json::from_value(json!({})).unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.total_count, None);
    }

    #[test]
    fn test_page_keyed_by_id() {
        let body = json!({"items": [fixtures::route("r1"), fixtures::route("r2")]});
        let page: Page<Route> = serde_json::from_value(body).unwrap();

        assert_eq!(page.total_count, None);
        let keyed = page.into_keyed();
        assert!(keyed.contains_key("r1"));
        assert!(keyed.contains_key("r2"));
    }
}
