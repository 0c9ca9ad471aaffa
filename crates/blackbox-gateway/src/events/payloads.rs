//! Event payload definitions
//!
//! A dispatch payload is hydrated into the entity named by the first segment
//! of the event name (`MESSAGE_CREATE` → `Message`).

use blackbox_core::{hydrate, DomainError, Dm, Guild, Invite, Member, Message, Typing, User};
use serde_json::Value;
use std::fmt;

/// The entity a dispatch payload hydrates into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadKind {
    /// No payload (ready, log out)
    None,
    Guild,
    Invite,
    Message,
    Dm,
    User,
    Member,
    Typing,
}

impl PayloadKind {
    /// Resolve the entity from the first segment of an event name
    ///
    /// Returns `None` for a segment that names no known entity.
    #[must_use]
    pub fn from_event_name(event: &str) -> Option<Self> {
        let segment = event.split('_').next().unwrap_or_default();
        match segment.to_ascii_uppercase().as_str() {
            "GUILD" => Some(Self::Guild),
            "INVITE" => Some(Self::Invite),
            "MESSAGE" => Some(Self::Message),
            "DM" => Some(Self::Dm),
            "FRIEND" | "USER" => Some(Self::User),
            "MEMBER" => Some(Self::Member),
            "TYPING" => Some(Self::Typing),
            "LOG" | "READY" => Some(Self::None),
            _ => None,
        }
    }

    /// Get the entity name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Guild => "Guild",
            Self::Invite => "Invite",
            Self::Message => "Message",
            Self::Dm => "Dm",
            Self::User => "User",
            Self::Member => "Member",
            Self::Typing => "Typing",
        }
    }
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A hydrated event as handed to a handler
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayEvent {
    Ready,
    LogOut,
    Guild(Guild),
    Invite(Invite),
    Message(Message),
    Dm(Dm),
    User(User),
    Member(Member),
    Typing(Typing),
    /// Event whose name names no known entity; the payload is passed through
    Untyped { event: String, payload: Value },
}

impl GatewayEvent {
    /// Hydrate a dispatch payload according to the event name
    pub fn hydrate(event: &str, payload: Value) -> Result<Self, DomainError> {
        let Some(kind) = PayloadKind::from_event_name(event) else {
            return Ok(Self::Untyped {
                event: event.to_string(),
                payload,
            });
        };

        let name = kind.name();
        Ok(match kind {
            PayloadKind::None if event.eq_ignore_ascii_case("READY") => Self::Ready,
            PayloadKind::None => Self::LogOut,
            PayloadKind::Guild => Self::Guild(hydrate(name, payload)?),
            PayloadKind::Invite => Self::Invite(hydrate(name, payload)?),
            PayloadKind::Message => Self::Message(hydrate(name, payload)?),
            PayloadKind::Dm => Self::Dm(hydrate(name, payload)?),
            PayloadKind::User => Self::User(hydrate(name, payload)?),
            PayloadKind::Member => Self::Member(hydrate(name, payload)?),
            PayloadKind::Typing => Self::Typing(hydrate(name, payload)?),
        })
    }

    /// The entity this event carries, if it is one of the known ones
    pub fn payload_kind(&self) -> Option<PayloadKind> {
        match self {
            Self::Ready | Self::LogOut => Some(PayloadKind::None),
            Self::Guild(_) => Some(PayloadKind::Guild),
            Self::Invite(_) => Some(PayloadKind::Invite),
            Self::Message(_) => Some(PayloadKind::Message),
            Self::Dm(_) => Some(PayloadKind::Dm),
            Self::User(_) => Some(PayloadKind::User),
            Self::Member(_) => Some(PayloadKind::Member),
            Self::Typing(_) => Some(PayloadKind::Typing),
            Self::Untyped { .. } => None,
        }
    }
}

/// A payload type a typed handler can receive
pub trait EventPayload: Sized + Send + 'static {
    /// The entity this type represents
    const KIND: PayloadKind;

    /// Extract the payload from a hydrated event
    fn from_event(event: GatewayEvent) -> Option<Self>;
}

/// Payload-less events (`ready`, `log_out`)
impl EventPayload for () {
    const KIND: PayloadKind = PayloadKind::None;

    fn from_event(event: GatewayEvent) -> Option<Self> {
        matches!(event, GatewayEvent::Ready | GatewayEvent::LogOut).then_some(())
    }
}

macro_rules! impl_event_payload {
    ($($ty:ident),* $(,)?) => {
        $(
            impl EventPayload for $ty {
                const KIND: PayloadKind = PayloadKind::$ty;

                fn from_event(event: GatewayEvent) -> Option<Self> {
                    match event {
                        GatewayEvent::$ty(inner) => Some(inner),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_event_payload!(Guild, Invite, Message, Dm, User, Member, Typing);
