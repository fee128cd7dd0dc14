//! Response handling for the routes service.

use crate::client::load_wrapped;
use crate::errors::MailgunResult;
use crate::types::{Resource, Route};
use serde_json::Value;

/// Read a route out of an update response.
///
/// Updates may answer with the route under a `route` key or with the route
/// fields at the top level; both are accepted.
pub fn route_from_update(body: Value) -> MailgunResult<Route> {
    if body.get("route").is_some_and(Value::is_object) {
        load_wrapped(body, "route")
    } else {
        Route::load(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use serde_json::json;

    #[test]
    fn test_wrapped_update_response() {
        let body = json!({"message": "Route has been updated", "route": fixtures::route("4f3bad2335335426750048c6")});
        let route = route_from_update(body).unwrap();
        assert_eq!(route.id.as_deref(), Some("4f3bad2335335426750048c6"));
    }

    #[test]
    fn test_top_level_update_response() {
        let mut body = fixtures::route("4f3bad2335335426750048c6");
        body["message"] = json!("Route has been updated");
        let route = route_from_update(body).unwrap();
        assert_eq!(route.id.as_deref(), Some("4f3bad2335335426750048c6"));
        assert_eq!(route.actions.len(), 2);
    }
}
