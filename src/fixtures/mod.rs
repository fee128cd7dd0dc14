//! Test fixtures for Mailgun API responses.
//!
//! Provides realistic JSON payloads, shaped like the live API's, for unit
//! tests.

use serde_json::{json, Value};

/// Creation timestamp used by every fixture
pub const CREATED_AT: &str = "Tue, 09 Aug 2011 20:50:27 GMT";

/// A mailing list item
pub fn mailing_list(address: &str) -> Value {
    json!({
        "address": address,
        "name": "Developers",
        "description": "Mailgun developers list",
        "access_level": "readonly",
        "members_count": 3,
        "created_at": CREATED_AT
    })
}

/// A mailing list member item
pub fn list_member(address: &str) -> Value {
    json!({
        "address": address,
        "name": "Bob Bar",
        "vars": {"plan": "pro"},
        "subscribed": true
    })
}

/// An unsubscribe record
pub fn unsubscribe(id: &str, address: &str) -> Value {
    json!({
        "id": id,
        "address": address,
        "tag": "*",
        "created_at": CREATED_AT
    })
}

/// A spam complaint record
pub fn complaint(address: &str) -> Value {
    json!({
        "address": address,
        "count": 2,
        "created_at": CREATED_AT
    })
}

/// A bounce record
pub fn bounce(address: &str) -> Value {
    json!({
        "address": address,
        "code": 550,
        "error": "No such mailbox",
        "created_at": CREATED_AT
    })
}

/// A route item
pub fn route(id: &str) -> Value {
    json!({
        "id": id,
        "priority": 1,
        "description": "Sample route",
        "expression": "match_recipient(\".*@gmail.com\")",
        "actions": ["forward(\"http://myhost.com/messages\")", "stop()"],
        "created_at": "Wed, 15 Feb 2012 13:03:31 GMT"
    })
}

/// Full response bodies
pub mod responses {
    use super::*;

    /// Accepted message
    pub fn send_message(id: &str) -> Value {
        json!({
            "id": id,
            "message": "Queued. Thank you."
        })
    }

    /// A single resource wrapped under `key`
    pub fn wrapped(key: &str, item: Value) -> Value {
        let mut body = serde_json::Map::new();
        body.insert(key.to_string(), item);
        Value::Object(body)
    }

    /// A page of items
    pub fn page(items: Vec<Value>) -> Value {
        json!({
            "total_count": items.len(),
            "items": items
        })
    }

    /// Plain confirmation message
    pub fn message(text: &str) -> Value {
        json!({ "message": text })
    }

    /// Error body
    pub fn error(text: &str) -> Value {
        json!({ "message": text })
    }
}
