//! Payload fixtures
//!
//! JSON bodies shaped like the ones the service sends.

use serde_json::{json, Value};

/// Token the mock server accepts
pub const TEST_TOKEN: &str = "test-token";

/// Public user payload
pub fn user_json(id: &str, name: &str) -> Value {
    json!({"id": id, "name": name, "imageId": format!("img-{id}")})
}

/// Current user payload, with the private fields
pub fn self_json() -> Value {
    json!({
        "id": "bot",
        "name": "blackbox-bot",
        "imageId": "img-bot",
        "email": "bot@example.com",
        "flags": 0,
        "options": {"theme": "dark"},
        "permissions": 1
    })
}

/// Message payload
pub fn message_json(id: &str, guild_id: &str, content: &str) -> Value {
    json!({
        "id": id,
        "author": user_json("u1", "alice"),
        "content": content,
        "guildId": guild_id,
        "created": 1_700_000_000_000_i64,
        "modified": 1_700_000_000_000_i64,
        "msgSaved": true,
        "requestId": format!("req-{id}"),
        "mentionsEveryone": false,
        "mentions": [],
        "attachments": null
    })
}

/// Unread marker payload
pub fn unread_json(count: i64) -> Value {
    json!({"msgId": "m0", "count": count, "time": 1_700_000_000_000_i64, "mentions": 0})
}

/// Guild and DM list payload
pub fn guild_list_json() -> Value {
    json!({
        "guilds": [{
            "id": "g1",
            "name": "general",
            "imageId": "img-g1",
            "ownerId": "u1",
            "saveChat": true,
            "unread": unread_json(2)
        }],
        "dms": [{
            "id": "d1",
            "name": "alice",
            "unread": unread_json(1)
        }]
    })
}

/// Text of a dispatch frame
pub fn dispatch_frame(event: &str, data: Value) -> String {
    json!({"op": 0, "data": data, "event": event}).to_string()
}
