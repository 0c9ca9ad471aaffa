//! Handler registry

use super::{HandlerResult, RegistryError};
use crate::context::Context;
use crate::events::{EventKind, EventPayload, GatewayEvent};
use futures::future::BoxFuture;
use futures::FutureExt;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

/// A bound handler
pub type EventHandler =
    Arc<dyn Fn(Context, GatewayEvent) -> BoxFuture<'static, HandlerResult> + Send + Sync>;

/// Map of event → handler
#[derive(Default, Clone)]
pub struct HandlerRegistry {
    handlers: HashMap<EventKind, EventHandler>,
}

impl HandlerRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a handler receiving the hydrated event
    ///
    /// A later bind for the same event replaces the earlier one.
    pub fn bind<F, Fut>(&mut self, event: &str, handler: F) -> Result<EventKind, RegistryError>
    where
        F: Fn(Context, GatewayEvent) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        let kind = Self::resolve(event)?;
        let handler: EventHandler =
            Arc::new(move |ctx: Context, event: GatewayEvent| handler(ctx, event).boxed());
        self.insert(kind, handler);
        Ok(kind)
    }

    /// Bind a handler receiving the event's entity
    ///
    /// Fails if `T` is not the entity the event delivers.
    pub fn on<T, F, Fut>(&mut self, event: &str, handler: F) -> Result<EventKind, RegistryError>
    where
        T: EventPayload,
        F: Fn(Context, T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        let kind = Self::resolve(event)?;
        let expected = kind.payload_kind();
        if expected != T::KIND {
            return Err(RegistryError::InvalidHandler {
                event: kind.as_str(),
                expected,
                found: T::KIND,
            });
        }

        let handler: EventHandler =
            Arc::new(move |ctx: Context, event: GatewayEvent| match T::from_event(event) {
                Some(payload) => handler(ctx, payload).boxed(),
                None => {
                    async move { Err(anyhow::anyhow!("{kind} delivered a mismatched payload")) }
                        .boxed()
                }
            });
        self.insert(kind, handler);
        Ok(kind)
    }

    fn resolve(event: &str) -> Result<EventKind, RegistryError> {
        EventKind::from_name(event).ok_or_else(|| RegistryError::UnknownEvent(event.to_string()))
    }

    fn insert(&mut self, kind: EventKind, handler: EventHandler) {
        if self.handlers.insert(kind, handler).is_some() {
            tracing::debug!(event = %kind, "Replaced handler");
        } else {
            tracing::debug!(event = %kind, "Bound handler");
        }
    }

    /// Get the handler for an event
    pub fn get(&self, kind: EventKind) -> Option<EventHandler> {
        self.handlers.get(&kind).cloned()
    }

    /// Get the handler for an event name
    pub fn lookup(&self, event: &str) -> Option<(EventKind, EventHandler)> {
        let kind = EventKind::from_name(event)?;
        self.get(kind).map(|handler| (kind, handler))
    }

    /// Check if an event has a handler
    pub fn contains(&self, kind: EventKind) -> bool {
        self.handlers.contains_key(&kind)
    }

    /// Number of bound handlers
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check if no handler is bound
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut bound: Vec<_> = self.handlers.keys().copied().collect();
        bound.sort();
        f.debug_struct("HandlerRegistry").field("bound", &bound).finish()
    }
}
