//! Service tests: endpoint paths, methods and result shapes.

use super::support::mock_client;
use crate::errors::{MailgunError, ResponseError, ValidationError};
use crate::fixtures::{self, responses};
use crate::mocks::MockResponse;
use crate::services::bounces::BouncesServiceTrait;
use crate::services::complaints::ComplaintsServiceTrait;
use crate::services::lists::ListsServiceTrait;
use crate::services::members::{MembersServiceTrait, Upsert};
use crate::services::messages::MessagesServiceTrait;
use crate::services::routes::RoutesServiceTrait;
use crate::services::unsubscribes::UnsubscribesServiceTrait;
use crate::types::{
    AccessLevel, Bounce, Complaint, ListMember, ListOptions, MailingList, Route, Unsubscribe,
    MAX_BULK_MEMBERS,
};
use pretty_assertions::assert_eq;
use serde_json::json;

const LIST: &str = "dev@samples.mailgun.org";

fn ok(body: serde_json::Value) -> MockResponse {
    MockResponse::json(&body)
}

// Messages

#[tokio::test]
async fn test_send_returns_message_id() {
    let (client, transport) = mock_client([ok(responses::send_message("<msg-id>"))]);
    let mut message = client.new_message();
    message
        .set_from("me@samples.mailgun.org", Some("Me".to_string()))
        .set_subject("Hello")
        .set_text("Testing some Mailgun awesomeness!")
        .set_test_mode(true);
    message.add_to("you@example.com", None).unwrap();

    let id = client.messages().send(&message).await.unwrap();

    assert_eq!(id, "<msg-id>");
    let request = transport.last_request().unwrap();
    assert_eq!(request.method, "POST");
    assert_eq!(request.path(), "/v2/samples.mailgun.org/messages");
    assert_eq!(request.field("from"), Some("Me <me@samples.mailgun.org>"));
    assert_eq!(request.field("to[1]"), Some("you@example.com"));
    assert_eq!(request.field("o:testmode"), Some("yes"));
}

#[tokio::test]
async fn test_send_without_sender_makes_no_request() {
    let (client, transport) = mock_client([]);
    let mut message = client.new_message();
    message.add_to("you@example.com", None).unwrap();

    let err = client.messages().send(&message).await.unwrap_err();

    assert!(matches!(
        err,
        MailgunError::Validation(ValidationError::MissingSender)
    ));
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_send_server_error() {
    let (client, _) = mock_client([MockResponse::with_status(500, "")]);
    let mut message = client.new_message();
    message.set_from("me@samples.mailgun.org", None);
    message.add_to("you@example.com", None).unwrap();

    let err = client.messages().send(&message).await.unwrap_err();
    assert_eq!(err.status_code(), Some(500));
    assert!(matches!(err, MailgunError::Server { status: 500 }));
}

#[tokio::test]
async fn test_send_response_without_id() {
    let (client, _) = mock_client([ok(responses::message("Queued. Thank you."))]);
    let mut message = client.new_message();
    message.set_from("me@samples.mailgun.org", None);
    message.add_to("you@example.com", None).unwrap();

    let err = client.messages().send(&message).await.unwrap_err();
    assert!(matches!(
        err,
        MailgunError::Response(ResponseError::MissingField { field: "id" })
    ));
}

#[tokio::test]
async fn test_send_response_with_malformed_id() {
    let (client, _) = mock_client([ok(json!({"id": 42, "message": "Queued. Thank you."}))]);
    let mut message = client.new_message();
    message.set_from("me@samples.mailgun.org", None);
    message.add_to("you@example.com", None).unwrap();

    let err = client.messages().send(&message).await.unwrap_err();
    assert!(matches!(
        err,
        MailgunError::Response(ResponseError::DeserializationError { .. })
    ));
}

// Mailing lists

#[tokio::test]
async fn test_list_mailing_lists() {
    let (client, transport) = mock_client([ok(responses::page(vec![
        fixtures::mailing_list("b@samples.mailgun.org"),
        fixtures::mailing_list("a@samples.mailgun.org"),
    ]))]);

    let page = client.lists().list(ListOptions::default()).await.unwrap();

    assert_eq!(page.total_count, Some(2));
    assert_eq!(page.items[0].address, "b@samples.mailgun.org");
    assert!(page.into_keyed().contains_key("a@samples.mailgun.org"));

    let request = transport.last_request().unwrap();
    assert_eq!(request.path(), "/v2/lists");
    assert_eq!(request.query_param("limit").as_deref(), Some("100"));
    assert_eq!(request.query_param("skip").as_deref(), Some("0"));
}

#[tokio::test]
async fn test_get_mailing_list() {
    let (client, transport) = mock_client([ok(responses::wrapped("list", fixtures::mailing_list(LIST)))]);

    let list = client.lists().get(LIST).await.unwrap();

    assert_eq!(list.address, LIST);
    assert_eq!(list.members_count, Some(3));
    assert_eq!(transport.last_request().unwrap().path(), "/v2/lists/dev@samples.mailgun.org");
}

#[tokio::test]
async fn test_get_missing_mailing_list() {
    let (client, _) = mock_client([MockResponse::with_status(
        404,
        r#"{"message":"Address not found"}"#,
    )]);

    let err = client.lists().get(LIST).await.unwrap_err();

    match err {
        MailgunError::Api { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Address not found");
        }
        other => panic!("expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_create_and_update_mailing_list() {
    let (client, transport) = mock_client([
        ok(responses::wrapped("list", fixtures::mailing_list(LIST))),
        ok(responses::wrapped("list", fixtures::mailing_list(LIST))),
    ]);

    let new_list = MailingList::new(LIST)
        .name("Developers")
        .access_level(AccessLevel::Members);
    let created = client.lists().create(&new_list).await.unwrap();
    assert_eq!(created.address, LIST);

    let create = transport.last_request().unwrap();
    assert_eq!(create.method, "POST");
    assert_eq!(create.path(), "/v2/lists");
    assert_eq!(create.field("access_level"), Some("members"));

    let changes = MailingList::new(LIST).description("Updated");
    client.lists().update(LIST, &changes).await.unwrap();

    let update = transport.last_request().unwrap();
    assert_eq!(update.method, "PUT");
    assert_eq!(update.field("description"), Some("Updated"));
    assert_eq!(update.field("name"), None);
}

#[tokio::test]
async fn test_delete_mailing_list() {
    let (client, transport) = mock_client([ok(responses::message("Mailing list has been removed"))]);

    assert!(client.lists().delete(LIST).await.unwrap());
    assert_eq!(transport.last_request().unwrap().method, "DELETE");
}

#[tokio::test]
async fn test_mailing_list_stats() {
    let stats = json!({"total": {"delivered": 10}, "unique": {"clicked": {"link": 2}}});
    let (client, transport) = mock_client([ok(stats.clone())]);

    assert_eq!(client.lists().stats(LIST).await.unwrap(), stats);
    assert_eq!(
        transport.last_request().unwrap().path(),
        "/v2/lists/dev@samples.mailgun.org/stats"
    );
}

// Members

#[tokio::test]
async fn test_add_member_with_upsert() {
    let (client, transport) = mock_client([ok(responses::wrapped(
        "member",
        fixtures::list_member("bob@example.com"),
    ))]);

    let member = ListMember::new("bob@example.com").name("Bob").subscribed(true);
    let added = client.members().add(LIST, &member, Upsert::Yes).await.unwrap();

    assert_eq!(added.address, "bob@example.com");
    let request = transport.last_request().unwrap();
    assert_eq!(request.path(), "/v2/lists/dev@samples.mailgun.org/members");
    assert_eq!(request.field("upsert"), Some("yes"));
    assert_eq!(request.field("subscribed"), Some("yes"));
}

#[tokio::test]
async fn test_list_get_update_delete_members() {
    let (client, transport) = mock_client([
        ok(responses::page(vec![fixtures::list_member("bob@example.com")])),
        ok(responses::wrapped("member", fixtures::list_member("bob@example.com"))),
        ok(responses::wrapped("member", fixtures::list_member("bob@example.com"))),
        ok(responses::message("Mailing list member has been deleted")),
    ]);

    let page = client
        .members()
        .list(LIST, ListOptions::limit(5))
        .await
        .unwrap();
    assert!(page.get("bob@example.com").is_some());
    assert_eq!(
        transport.last_request().unwrap().query_param("limit").as_deref(),
        Some("5")
    );

    let member = client.members().get(LIST, "bob@example.com").await.unwrap();
    assert_eq!(member.subscribed, Some(true));
    assert_eq!(
        transport.last_request().unwrap().path(),
        "/v2/lists/dev@samples.mailgun.org/members/bob@example.com"
    );

    let changes = ListMember::new("bob@example.com").subscribed(false);
    client
        .members()
        .update(LIST, "bob@example.com", &changes)
        .await
        .unwrap();
    assert_eq!(transport.last_request().unwrap().field("subscribed"), Some("no"));

    assert!(client.members().delete(LIST, "bob@example.com").await.unwrap());
    assert_eq!(transport.request_count(), 4);
}

#[tokio::test]
async fn test_add_many_members() {
    let (client, transport) = mock_client([ok(responses::wrapped("list", fixtures::mailing_list(LIST)))]);
    let members = vec![
        ListMember::new("a@example.com"),
        ListMember::new("b@example.com").var("age", 26).subscribed(false),
    ];

    let list = client
        .members()
        .add_many(LIST, &members, Upsert::No)
        .await
        .unwrap();

    assert_eq!(list.address, LIST);
    let request = transport.last_request().unwrap();
    assert_eq!(request.path(), "/v2/lists/dev@samples.mailgun.org/members.json");
    assert_eq!(request.field("upsert"), Some("no"));
    let encoded: serde_json::Value =
        serde_json::from_str(request.field("members").unwrap()).unwrap();
    assert_eq!(
        encoded,
        json!([
            {"address": "a@example.com"},
            {"address": "b@example.com", "vars": "{\"age\":26}", "subscribed": "no"}
        ])
    );
}

#[tokio::test]
async fn test_add_many_rejects_bad_batches_before_sending() {
    let (client, transport) = mock_client([]);

    let err = client
        .members()
        .add_many(LIST, &[], Upsert::No)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        MailgunError::Validation(ValidationError::EmptyMemberBatch)
    ));

    let too_many: Vec<_> = (0..=MAX_BULK_MEMBERS)
        .map(|i| ListMember::new(format!("user{}@example.com", i)))
        .collect();
    let err = client
        .members()
        .add_many(LIST, &too_many, Upsert::Yes)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        MailgunError::Validation(ValidationError::TooManyMembers { count: 1001, .. })
    ));

    assert_eq!(transport.request_count(), 0);
}

// Unsubscribes

#[tokio::test]
async fn test_unsubscribes() {
    let (client, transport) = mock_client([
        ok(responses::page(vec![
            fixtures::unsubscribe("u1", "a@example.com"),
            fixtures::unsubscribe("u2", "a@example.com"),
        ])),
        ok(responses::page(vec![fixtures::unsubscribe("u1", "a@example.com")])),
        ok(responses::message("Address has been added to the unsubscribes table")),
        ok(responses::message("Unsubscribe event has been removed")),
        ok(responses::message("Unsubscribe event has been removed")),
    ]);

    let keyed = client
        .unsubscribes()
        .list(ListOptions::default())
        .await
        .unwrap()
        .into_keyed();
    assert_eq!(keyed.len(), 2);
    assert!(keyed.contains_key("u2"));
    assert_eq!(
        transport.last_request().unwrap().path(),
        "/v2/samples.mailgun.org/unsubscribes"
    );

    let for_address = client
        .unsubscribes()
        .get_for_address("a@example.com")
        .await
        .unwrap();
    assert_eq!(for_address.len(), 1);
    assert_eq!(
        transport.last_request().unwrap().path(),
        "/v2/samples.mailgun.org/unsubscribes/a@example.com"
    );

    let record = Unsubscribe::new("a@example.com").tag("newsletter");
    assert!(client.unsubscribes().create(&record).await.unwrap());
    let create = transport.last_request().unwrap();
    assert_eq!(create.field("address"), Some("a@example.com"));
    assert_eq!(create.field("tag"), Some("newsletter"));

    assert!(client.unsubscribes().delete("u1").await.unwrap());
    assert_eq!(
        transport.last_request().unwrap().path(),
        "/v2/samples.mailgun.org/unsubscribes/u1"
    );

    assert!(client
        .unsubscribes()
        .delete_for_address("a@example.com")
        .await
        .unwrap());
    assert_eq!(transport.last_request().unwrap().method, "DELETE");
}

// Complaints

#[tokio::test]
async fn test_complaints() {
    let (client, transport) = mock_client([
        ok(responses::page(vec![fixtures::complaint("spam@example.com")])),
        ok(responses::wrapped("complaint", fixtures::complaint("spam@example.com"))),
        ok(responses::message("Address has been added to the complaints table")),
        ok(responses::message("Spam complaint has been removed")),
    ]);

    let page = client.complaints().list(ListOptions::default()).await.unwrap();
    assert_eq!(page.items[0].address, "spam@example.com");

    let complaint = client.complaints().get("spam@example.com").await.unwrap();
    assert_eq!(complaint.count, Some(2));
    assert_eq!(
        transport.last_request().unwrap().path(),
        "/v2/samples.mailgun.org/complaints/spam@example.com"
    );

    assert!(client
        .complaints()
        .create(&Complaint::new("spam@example.com"))
        .await
        .unwrap());
    assert!(client.complaints().delete("spam@example.com").await.unwrap());
    assert_eq!(transport.request_count(), 4);
}

// Bounces

#[tokio::test]
async fn test_bounces() {
    let (client, transport) = mock_client([
        ok(responses::page(vec![fixtures::bounce("gone@example.com")])),
        ok(responses::wrapped("bounce", fixtures::bounce("gone@example.com"))),
        ok(responses::message("Address has been added to the bounces table")),
        ok(responses::message("Bounced address has been removed")),
    ]);

    let keyed = client
        .bounces()
        .list(ListOptions::default())
        .await
        .unwrap()
        .into_keyed();
    assert_eq!(keyed["gone@example.com"].code, 550);

    let bounce = client.bounces().get("gone@example.com").await.unwrap();
    assert_eq!(bounce.error.as_deref(), Some("No such mailbox"));

    let new_bounce = Bounce::new("gone@example.com").code(554).error("Rejected");
    assert!(client.bounces().create(&new_bounce).await.unwrap());
    let create = transport.last_request().unwrap();
    assert_eq!(create.path(), "/v2/samples.mailgun.org/bounces");
    assert_eq!(create.field("code"), Some("554"));
    assert_eq!(create.field("error"), Some("Rejected"));

    assert!(client.bounces().delete("gone@example.com").await.unwrap());
}

// Routes

#[tokio::test]
async fn test_routes() {
    let id = "4f3bad2335335426750048c6";
    let mut top_level = fixtures::route(id);
    top_level["priority"] = json!(2);

    let (client, transport) = mock_client([
        ok(responses::page(vec![fixtures::route(id)])),
        ok(responses::wrapped("route", fixtures::route(id))),
        ok(json!({"message": "Route has been created", "route": fixtures::route(id)})),
        ok(top_level),
        ok(responses::message("Route has been deleted")),
    ]);

    let page = client.routes().list(ListOptions::default()).await.unwrap();
    assert!(page.get(id).is_some());
    assert_eq!(transport.last_request().unwrap().path(), "/v2/routes");

    let route = client.routes().get(id).await.unwrap();
    assert_eq!(route.actions.len(), 2);

    let new_route = Route::new()
        .priority(1)
        .match_recipient(".*@gmail.com")
        .forward("http://myhost.com/messages")
        .stop();
    let created = client.routes().create(&new_route).await.unwrap();
    assert_eq!(created.id.as_deref(), Some(id));
    let create = transport.last_request().unwrap();
    assert_eq!(create.field("action[1]"), Some("forward(\"http://myhost.com/messages\")"));
    assert_eq!(create.field("action[2]"), Some("stop()"));

    let updated = client
        .routes()
        .update(id, &Route::new().priority(2))
        .await
        .unwrap();
    assert_eq!(updated.priority, 2);
    assert_eq!(transport.last_request().unwrap().method, "PUT");

    assert!(client.routes().delete(id).await.unwrap());
    assert_eq!(
        transport.last_request().unwrap().path(),
        "/v2/routes/4f3bad2335335426750048c6"
    );
}
