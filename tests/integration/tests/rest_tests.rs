//! REST Integration Tests
//!
//! Run with: cargo test -p integration-tests --test rest_tests

use std::time::Duration;

use blackbox_rest::{RestClient, RestError};
use integration_tests::{MockConfig, MockServer, TEST_TOKEN};
use serde_json::json;

fn rest(server: &MockServer) -> RestClient {
    RestClient::from_config(&server.client_config()).unwrap()
}

#[tokio::test]
async fn test_get_guilds() {
    let server = MockServer::start().await.unwrap();
    let list = rest(&server).get_guilds().await.unwrap();

    assert_eq!(list.guilds.len(), 1);
    assert_eq!(list.guilds[0].name, "general");
    assert!(!list.guilds[0].dm);
    assert_eq!(list.dms[0].id, "d1");
    assert_eq!(list.unread_total(), 3);
}

#[tokio::test]
async fn test_get_self_has_private_fields() {
    let server = MockServer::start().await.unwrap();
    let me = rest(&server).get_self().await.unwrap();

    assert_eq!(me.id, "bot");
    assert!(me.is_detailed());
    assert_eq!(me.email.as_deref(), Some("bot@example.com"));
}

#[tokio::test]
async fn test_get_user_and_friends() {
    let server = MockServer::start().await.unwrap();
    let rest = rest(&server);

    let user = rest.get_user("u42").await.unwrap();
    assert_eq!(user.id, "u42");
    assert!(!user.is_detailed());

    let friends = rest.get_friends().await.unwrap();
    let names: Vec<_> = friends.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, ["alice", "bob"]);
}

#[tokio::test]
async fn test_get_messages_sends_query() {
    let server = MockServer::start().await.unwrap();
    let messages = rest(&server).get_messages("g1", 0, 5).await.unwrap();

    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].content, "second");
    assert!(messages.iter().all(|m| m.guild_id == "g1"));

    let query = &server.queries()[0];
    assert_eq!(query.guild_id, "g1");
    assert_eq!(query.params.get("time").map(String::as_str), Some("0"));
    assert_eq!(query.params.get("limit").map(String::as_str), Some("5"));
    assert_eq!(query.authorization.as_deref(), Some(TEST_TOKEN));
}

#[tokio::test]
async fn test_send_message() {
    let server = MockServer::start().await.unwrap();
    rest(&server).send_message("g1", "hello").await.unwrap();

    let post = &server.posts()[0];
    assert_eq!(post.body, json!({"content": "hello"}));
    assert_eq!(post.authorization.as_deref(), Some(TEST_TOKEN));
}

#[tokio::test]
async fn test_rejected_request() {
    let server = MockServer::start_with(MockConfig {
        post_status: axum::http::StatusCode::FORBIDDEN,
        ..MockConfig::default()
    })
    .await
    .unwrap();

    let err = rest(&server).send_message("g1", "hello").await.unwrap_err();
    assert!(matches!(err, RestError::RequestFailed { status: 403, .. }));
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn test_not_found() {
    let server = MockServer::start().await.unwrap();
    let err = rest(&server)
        .request::<serde_json::Value, ()>(blackbox_rest::Method::GET, "/nothing/here", None)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_closed_session() {
    let server = MockServer::start().await.unwrap();
    let rest = rest(&server);
    assert!(rest.close());

    assert!(matches!(rest.get_guilds().await, Err(RestError::SessionClosed)));
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert!(server.posts().is_empty());
}
