//! Test helpers for integration tests
//!
//! [`MockServer`] speaks the gateway protocol over a real WebSocket and serves
//! the REST endpoints the client uses, recording everything it receives.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use blackbox_common::ClientConfig;
use futures_util::{SinkExt, StreamExt};
use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

use crate::fixtures::{guild_list_json, message_json, self_json, user_json, TEST_TOKEN};

/// Mock server behaviour
#[derive(Debug, Clone)]
pub struct MockConfig {
    /// Token IDENTIFY must carry; anything else gets an invalid session
    pub token: String,
    /// Interval announced in HELLO, in milliseconds
    pub heartbeat_interval: u64,
    /// Raw text frames sent right after READY
    pub script: Vec<String>,
    /// Status returned for posted messages
    pub post_status: StatusCode,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            token: TEST_TOKEN.to_string(),
            heartbeat_interval: 40_000,
            script: Vec::new(),
            post_status: StatusCode::OK,
        }
    }
}

/// A message posted through the REST API
#[derive(Debug, Clone)]
pub struct RecordedPost {
    pub guild_id: String,
    pub body: Value,
    pub authorization: Option<String>,
}

/// A message history request
#[derive(Debug, Clone)]
pub struct RecordedQuery {
    pub guild_id: String,
    pub params: HashMap<String, String>,
    pub authorization: Option<String>,
}

struct MockInner {
    config: MockConfig,
    received: Mutex<Vec<Value>>,
    posts: Mutex<Vec<RecordedPost>>,
    queries: Mutex<Vec<RecordedQuery>>,
    connections: AtomicUsize,
    kick: Notify,
}

type SharedState = Arc<MockInner>;

/// In-process blackbox service
pub struct MockServer {
    pub addr: SocketAddr,
    inner: SharedState,
    _handle: JoinHandle<()>,
}

impl MockServer {
    /// Start a server with the default behaviour
    pub async fn start() -> Result<Self> {
        Self::start_with(MockConfig::default()).await
    }

    /// Start a server with custom behaviour
    pub async fn start_with(config: MockConfig) -> Result<Self> {
        let inner = Arc::new(MockInner {
            config,
            received: Mutex::new(Vec::new()),
            posts: Mutex::new(Vec::new()),
            queries: Mutex::new(Vec::new()),
            connections: AtomicUsize::new(0),
            kick: Notify::new(),
        });

        let api = Router::new()
            .route("/ws/", get(gateway_handler))
            .route("/users/self/guilds", get(get_guilds))
            .route("/users/self/friends", get(get_friends))
            .route("/users/:user_id", get(get_user))
            .route("/guilds/:guild_id/msgs", get(get_messages).post(post_message))
            .with_state(Arc::clone(&inner));
        let app = Router::new().nest("/api", api);

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Ok(Self {
            addr,
            inner,
            _handle: handle,
        })
    }

    /// Endpoint in the form the client configuration expects
    pub fn endpoint(&self) -> String {
        format!("{}/api", self.addr)
    }

    /// Client configuration pointing at this server
    pub fn client_config(&self) -> ClientConfig {
        self.client_config_with_token(TEST_TOKEN)
    }

    pub fn client_config_with_token(&self, token: &str) -> ClientConfig {
        ClientConfig::new(token, self.endpoint())
    }

    /// Frames received on the gateway socket, in arrival order
    pub fn received(&self) -> Vec<Value> {
        self.inner.received.lock().clone()
    }

    /// Count received frames with the given op code
    pub fn received_op(&self, op: u64) -> usize {
        self.inner
            .received
            .lock()
            .iter()
            .filter(|frame| frame["op"].as_u64() == Some(op))
            .count()
    }

    pub fn posts(&self) -> Vec<RecordedPost> {
        self.inner.posts.lock().clone()
    }

    pub fn queries(&self) -> Vec<RecordedQuery> {
        self.inner.queries.lock().clone()
    }

    /// Number of gateway connections accepted so far
    pub fn connections(&self) -> usize {
        self.inner.connections.load(Ordering::SeqCst)
    }

    /// Send INVALID_SESSION to the connected client and hang up
    pub fn kick(&self) {
        self.inner.kick.notify_one();
    }

    /// Poll until `condition` holds, giving up after `timeout`
    pub async fn wait_for<F>(&self, timeout: Duration, condition: F) -> bool
    where
        F: Fn(&Self) -> bool,
    {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            if condition(self) {
                return true;
            }
            if tokio::time::Instant::now() >= deadline {
                return false;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }
}

fn authorization(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

fn frame(op: u8, data: Value) -> String {
    json!({"op": op, "data": data, "event": ""}).to_string()
}

// === Gateway ===

async fn gateway_handler(
    State(state): State<SharedState>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(state, socket))
}

async fn handle_socket(state: SharedState, socket: WebSocket) {
    state.connections.fetch_add(1, Ordering::SeqCst);
    let (mut sink, mut stream) = socket.split();

    let hello = frame(0x2, json!({"heartbeatInterval": state.config.heartbeat_interval}));
    if sink.send(Message::Text(hello)).await.is_err() {
        return;
    }

    loop {
        tokio::select! {
            message = stream.next() => {
                let text = match message {
                    Some(Ok(Message::Text(text))) => text,
                    Some(Ok(Message::Close(_)) | Err(_)) | None => break,
                    Some(Ok(_)) => continue,
                };
                let Ok(received) = serde_json::from_str::<Value>(&text) else {
                    continue;
                };
                state.received.lock().push(received.clone());

                match received["op"].as_u64() {
                    Some(0x1) if received["data"]["token"] == state.config.token.as_str() => {
                        let _ = sink.send(Message::Text(frame(0x3, Value::Null))).await;
                        for scripted in &state.config.script {
                            let _ = sink.send(Message::Text(scripted.clone())).await;
                        }
                    }
                    Some(0x1) => {
                        let _ = sink.send(Message::Text(frame(0x8, Value::Null))).await;
                        break;
                    }
                    Some(0x9) => {
                        let _ = sink.send(Message::Text(frame(0xA, Value::Null))).await;
                    }
                    _ => {}
                }
            }
            () = state.kick.notified() => {
                let _ = sink.send(Message::Text(frame(0x8, Value::Null))).await;
                break;
            }
        }
    }
}

// === REST ===

async fn get_guilds() -> impl IntoResponse {
    Json(guild_list_json())
}

async fn get_friends() -> impl IntoResponse {
    Json(json!([user_json("u1", "alice"), user_json("u2", "bob")]))
}

async fn get_user(Path(user_id): Path<String>) -> impl IntoResponse {
    if user_id == "self" {
        Json(self_json())
    } else {
        Json(user_json(&user_id, "someone"))
    }
}

async fn get_messages(
    State(state): State<SharedState>,
    Path(guild_id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    state.queries.lock().push(RecordedQuery {
        guild_id: guild_id.clone(),
        params,
        authorization: authorization(&headers),
    });
    Json(json!([
        message_json("m2", &guild_id, "second"),
        message_json("m1", &guild_id, "first"),
    ]))
}

async fn post_message(
    State(state): State<SharedState>,
    Path(guild_id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    state.posts.lock().push(RecordedPost {
        guild_id,
        body,
        authorization: authorization(&headers),
    });
    (state.config.post_status, Json(json!({})))
}
