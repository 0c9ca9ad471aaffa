//! Gateway Integration Tests
//!
//! Each test runs a real client against an in-process mock of the service.
//!
//! Run with: cargo test -p integration-tests --test gateway_tests

use std::time::Duration;

use blackbox_core::Message;
use blackbox_gateway::{Client, Context, GatewayError};
use integration_tests::{dispatch_frame, message_json, MockConfig, MockServer, TEST_TOKEN};
use serde_json::{json, Value};
use tokio::sync::mpsc;

const WAIT: Duration = Duration::from_secs(5);

fn ping_pong(client: &mut Client) {
    client
        .on::<Message, _, _>("on_message_create", |ctx: Context, message| async move {
            if message.content == "ping" {
                ctx.reply(&message, "pong").await?;
            }
            Ok(())
        })
        .unwrap();
}

// ============================================================================
// Handshake Tests
// ============================================================================

#[tokio::test]
async fn test_identify_after_hello() {
    let server = MockServer::start().await.unwrap();
    let client = Client::new(server.client_config()).unwrap();
    let run = tokio::spawn(client.run());

    assert!(server.wait_for(WAIT, |s| s.received_op(0x1) == 1).await);
    assert_eq!(
        server.received()[0],
        json!({"op": 1, "data": {"token": TEST_TOKEN}, "event": ""})
    );

    server.kick();
    tokio::time::timeout(WAIT, run).await.unwrap().unwrap().unwrap();
    assert_eq!(server.received_op(0x1), 1);
    assert_eq!(server.connections(), 1);
}

#[tokio::test]
async fn test_wrong_token_ends_run() {
    let server = MockServer::start().await.unwrap();
    let client = Client::new(server.client_config_with_token("nope")).unwrap();
    let rest = client.rest().clone();

    tokio::time::timeout(WAIT, client.run()).await.unwrap().unwrap();
    assert!(rest.is_closed());
}

#[tokio::test]
async fn test_connect_failure() {
    // Reserve a port, then free it so nothing is listening there
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = blackbox_common::ClientConfig::new(TEST_TOKEN, format!("{addr}/api"));
    let client = Client::new(config).unwrap();
    let rest = client.rest().clone();

    let err = client.run().await.unwrap_err();
    assert!(matches!(err, GatewayError::Connection(_)));
    assert!(rest.is_closed());
}

// ============================================================================
// Heartbeat Tests
// ============================================================================

#[tokio::test]
async fn test_heartbeat_after_ready() {
    let server = MockServer::start_with(MockConfig {
        heartbeat_interval: 4_000,
        ..MockConfig::default()
    })
    .await
    .unwrap();
    let client = Client::new(server.client_config()).unwrap();
    let run = tokio::spawn(client.run());

    assert!(server.wait_for(WAIT, |s| s.received_op(0x9) >= 2).await);
    for heartbeat in server.received().iter().filter(|f| f["op"] == 9) {
        assert_eq!(heartbeat["data"], Value::Null);
    }

    server.kick();
    tokio::time::timeout(WAIT, run).await.unwrap().unwrap().unwrap();

    // Nothing is sent once the connection is gone
    let sent = server.received_op(0x9);
    tokio::time::sleep(Duration::from_millis(1_500)).await;
    assert_eq!(server.received_op(0x9), sent);
}

// ============================================================================
// Dispatch Tests
// ============================================================================

#[tokio::test]
async fn test_ping_pong() {
    let server = MockServer::start_with(MockConfig {
        script: vec![dispatch_frame("MESSAGE_CREATE", message_json("m1", "g1", "ping"))],
        ..MockConfig::default()
    })
    .await
    .unwrap();
    let mut client = Client::new(server.client_config()).unwrap();
    ping_pong(&mut client);
    let run = tokio::spawn(client.run());

    assert!(server.wait_for(WAIT, |s| s.posts().len() == 1).await);
    let post = &server.posts()[0];
    assert_eq!(post.guild_id, "g1");
    assert_eq!(post.body, json!({"content": "pong"}));
    assert_eq!(post.authorization.as_deref(), Some(TEST_TOKEN));

    server.kick();
    tokio::time::timeout(WAIT, run).await.unwrap().unwrap().unwrap();
}

#[tokio::test]
async fn test_bad_frames_do_not_stop_the_loop() {
    let server = MockServer::start_with(MockConfig {
        script: vec![
            "not json".to_string(),
            r#"{"data": null, "event": "MESSAGE_CREATE"}"#.to_string(),
            dispatch_frame("TYPING_START", json!({"userId": "u1", "guildId": "g1"})),
            dispatch_frame("GUILD_CREATE", json!({"id": "broken"})),
            dispatch_frame("MESSAGE_CREATE", message_json("m2", "g2", "ping")),
        ],
        ..MockConfig::default()
    })
    .await
    .unwrap();
    let mut client = Client::new(server.client_config()).unwrap();
    ping_pong(&mut client);
    client
        .bind("guild_create", |_ctx, _event| async { Ok(()) })
        .unwrap();
    let run = tokio::spawn(client.run());

    assert!(server.wait_for(WAIT, |s| s.posts().len() == 1).await);
    assert_eq!(server.posts()[0].guild_id, "g2");

    server.kick();
    tokio::time::timeout(WAIT, run).await.unwrap().unwrap().unwrap();
}

#[tokio::test]
async fn test_handler_failure_is_reported() {
    let server = MockServer::start_with(MockConfig {
        script: vec![dispatch_frame("MESSAGE_CREATE", message_json("m1", "g1", "ping"))],
        post_status: axum::http::StatusCode::FORBIDDEN,
        ..MockConfig::default()
    })
    .await
    .unwrap();
    let mut client = Client::new(server.client_config()).unwrap();
    ping_pong(&mut client);
    let mut faults = client.take_faults().unwrap();
    let run = tokio::spawn(client.run());

    let fault = tokio::time::timeout(WAIT, faults.recv()).await.unwrap().unwrap();
    assert_eq!(fault.name, "message_create");
    assert!(!fault.panicked);
    assert!(fault.error.to_string().contains("403"));

    server.kick();
    tokio::time::timeout(WAIT, run).await.unwrap().unwrap().unwrap();
}

#[tokio::test]
async fn test_ready_handler_uses_rest() {
    let server = MockServer::start().await.unwrap();
    let mut client = Client::new(server.client_config()).unwrap();
    let (tx, mut rx) = mpsc::unbounded_channel();
    client
        .on::<(), _, _>("ready", move |ctx: Context, ()| {
            let tx = tx.clone();
            async move {
                let me = ctx.get_self().await?;
                let guilds = ctx.get_guilds().await?;
                tx.send((me.name, guilds.guilds.len(), guilds.dms.len()))?;
                Ok(())
            }
        })
        .unwrap();
    let run = tokio::spawn(client.run());

    let (name, guilds, dms) = tokio::time::timeout(WAIT, rx.recv()).await.unwrap().unwrap();
    assert_eq!(name, "blackbox-bot");
    assert_eq!((guilds, dms), (1, 1));

    server.kick();
    tokio::time::timeout(WAIT, run).await.unwrap().unwrap().unwrap();
}

#[tokio::test]
async fn test_log_out_event() {
    let server = MockServer::start_with(MockConfig {
        script: vec![dispatch_frame("LOG_OUT", Value::Null)],
        ..MockConfig::default()
    })
    .await
    .unwrap();
    let mut client = Client::new(server.client_config()).unwrap();
    let (tx, mut rx) = mpsc::unbounded_channel();
    client
        .on::<(), _, _>("on_log_out", move |_ctx, ()| {
            let tx = tx.clone();
            async move {
                tx.send(())?;
                Ok(())
            }
        })
        .unwrap();
    let run = tokio::spawn(client.run());

    tokio::time::timeout(WAIT, rx.recv()).await.unwrap().unwrap();

    server.kick();
    tokio::time::timeout(WAIT, run).await.unwrap().unwrap().unwrap();
}
