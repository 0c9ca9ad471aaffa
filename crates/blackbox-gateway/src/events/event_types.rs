//! Gateway event types
//!
//! Defines every event name a handler can be bound to.

use super::PayloadKind;
use std::fmt;

/// Gateway event types
///
/// Dispatch events carry their wire name in the `event` field of op=0 frames.
/// `Ready` is raised locally when the handshake completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    // Connection events
    /// Handshake finished
    Ready,
    /// Session ended by the server
    LogOut,

    // Guild events
    GuildCreate,
    GuildDelete,
    GuildUpdate,

    // Invite events
    InviteCreate,
    InviteDelete,

    // Message events
    MessageCreate,
    MessageDelete,
    MessageUpdate,

    // DM events
    DmCreate,
    DmDelete,

    // Friend events
    FriendRequestAdd,
    FriendRequestRemove,
    FriendAdd,
    FriendRemove,

    // Member events
    MemberAdd,
    MemberRemove,
    MemberBan,
    MemberUnban,
    MemberAdminAdd,
    MemberAdminRemove,

    // Presence events
    TypingStart,

    // User events
    UserUpdate,
}

impl EventKind {
    /// Every bindable event
    pub const ALL: [Self; 24] = [
        Self::Ready,
        Self::LogOut,
        Self::GuildCreate,
        Self::GuildDelete,
        Self::GuildUpdate,
        Self::InviteCreate,
        Self::InviteDelete,
        Self::MessageCreate,
        Self::MessageDelete,
        Self::MessageUpdate,
        Self::DmCreate,
        Self::DmDelete,
        Self::FriendRequestAdd,
        Self::FriendRequestRemove,
        Self::FriendAdd,
        Self::FriendRemove,
        Self::MemberAdd,
        Self::MemberRemove,
        Self::MemberBan,
        Self::MemberUnban,
        Self::MemberAdminAdd,
        Self::MemberAdminRemove,
        Self::TypingStart,
        Self::UserUpdate,
    ];

    /// Get the wire name of the event
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ready => "READY",
            Self::LogOut => "LOG_OUT",
            Self::GuildCreate => "GUILD_CREATE",
            Self::GuildDelete => "GUILD_DELETE",
            Self::GuildUpdate => "GUILD_UPDATE",
            Self::InviteCreate => "INVITE_CREATE",
            Self::InviteDelete => "INVITE_DELETE",
            Self::MessageCreate => "MESSAGE_CREATE",
            Self::MessageDelete => "MESSAGE_DELETE",
            Self::MessageUpdate => "MESSAGE_UPDATE",
            Self::DmCreate => "DM_CREATE",
            Self::DmDelete => "DM_DELETE",
            Self::FriendRequestAdd => "FRIEND_REQUEST_ADD",
            Self::FriendRequestRemove => "FRIEND_REQUEST_REMOVE",
            Self::FriendAdd => "FRIEND_ADD",
            Self::FriendRemove => "FRIEND_REMOVE",
            Self::MemberAdd => "MEMBER_ADD",
            Self::MemberRemove => "MEMBER_REMOVE",
            Self::MemberBan => "MEMBER_BAN",
            Self::MemberUnban => "MEMBER_UNBAN",
            Self::MemberAdminAdd => "MEMBER_ADMIN_ADD",
            Self::MemberAdminRemove => "MEMBER_ADMIN_REMOVE",
            Self::TypingStart => "TYPING_START",
            Self::UserUpdate => "USER_UPDATE",
        }
    }

    /// Get the handler name (lowercase wire name)
    #[must_use]
    pub fn handler_name(self) -> String {
        self.as_str().to_ascii_lowercase()
    }

    /// Parse an event from a wire or handler name
    ///
    /// Matching ignores case and a leading `on_`, so `MESSAGE_CREATE`,
    /// `message_create` and `on_message_create` all resolve to the same event.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        let name = match name.get(..3) {
            Some(prefix) if prefix.eq_ignore_ascii_case("on_") => &name[3..],
            _ => name,
        };
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name))
    }

    /// Check if this event arrives in a dispatch frame
    #[must_use]
    pub const fn is_dispatch(self) -> bool {
        !matches!(self, Self::Ready)
    }

    /// The entity this event's payload hydrates into
    #[must_use]
    pub fn payload_kind(self) -> PayloadKind {
        match self {
            Self::Ready => PayloadKind::None,
            other => PayloadKind::from_event_name(other.as_str()).unwrap_or(PayloadKind::None),
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<EventKind> for String {
    fn from(event: EventKind) -> Self {
        event.as_str().to_string()
    }
}
