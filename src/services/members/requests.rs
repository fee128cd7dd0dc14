//! Request helpers for the members service.

use crate::errors::{MailgunResult, ValidationError};
use crate::types::marshal::yes_no;
use crate::types::{FieldMap, ListMember, Sendable, MAX_BULK_MEMBERS};
use serde_json::{Map, Value};

/// Whether adding an existing member updates it instead of failing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Upsert {
    /// Fail when the member exists
    #[default]
    No,
    /// Update the existing member
    Yes,
}

impl Upsert {
    /// Query/form parameters for the flag
    pub fn to_params(self) -> FieldMap {
        let mut params = FieldMap::new();
        params.insert("upsert", yes_no(self == Upsert::Yes));
        params
    }
}

impl From<bool> for Upsert {
    fn from(upsert: bool) -> Self {
        if upsert {
            Upsert::Yes
        } else {
            Upsert::No
        }
    }
}

/// Form fields for a bulk addition: all members as one JSON array in
/// `members`, plus the upsert flag.
///
/// Each array element holds the member's form fields as strings, so flags
/// stay `yes`/`no` and `vars` stays a JSON-encoded string.
///
/// Fails before anything is sent when the batch is empty or too large.
pub fn bulk_member_params(members: &[ListMember], upsert: Upsert) -> MailgunResult<FieldMap> {
    if members.is_empty() {
        return Err(ValidationError::EmptyMemberBatch.into());
    }
    if members.len() > MAX_BULK_MEMBERS {
        return Err(ValidationError::TooManyMembers {
            count: members.len(),
            max: MAX_BULK_MEMBERS,
        }
        .into());
    }

    let encoded: Vec<Value> = members.iter().map(member_object).collect();

    let mut params = FieldMap::new();
    params.insert("members", Value::Array(encoded).to_string());
    params.merge(upsert.to_params());
    Ok(params)
}

fn member_object(member: &ListMember) -> Value {
    let object: Map<String, Value> = member
        .to_fields()
        .into_pairs()
        .into_iter()
        .map(|(key, value)| (key, Value::String(value)))
        .collect();
    Value::Object(object)
}
