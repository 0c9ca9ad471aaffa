//! Event router

use crate::context::Context;
use crate::error::{GatewayError, GatewayResult};
use crate::events::{EventKind, GatewayEvent};
use crate::handlers::HandlerRegistry;
use crate::protocol::Frame;
use crate::tasks::{TaskId, TaskSupervisor};
use std::sync::Arc;

/// Routes events to their bound handler on the supervisor
#[derive(Debug, Clone)]
pub struct EventRouter {
    registry: Arc<HandlerRegistry>,
    supervisor: TaskSupervisor,
    context: Context,
}

impl EventRouter {
    pub fn new(registry: Arc<HandlerRegistry>, supervisor: TaskSupervisor, context: Context) -> Self {
        Self {
            registry,
            supervisor,
            context,
        }
    }

    /// Route a dispatch frame
    ///
    /// Returns the spawned task, or `None` when nothing is bound to the event.
    pub fn route(&self, frame: &Frame) -> GatewayResult<Option<TaskId>> {
        if !frame.is_dispatch() {
            return Err(GatewayError::UnexpectedFrame {
                op: frame.op.name(),
                state: "routing",
            });
        }

        let Some((kind, handler)) = self.registry.lookup(&frame.event) else {
            tracing::debug!(event = %frame.event, "No handler bound, dropping event");
            return Ok(None);
        };
        if !kind.is_dispatch() {
            tracing::debug!(event = %frame.event, "Ignoring dispatch for a local event");
            return Ok(None);
        }

        let event = GatewayEvent::hydrate(&frame.event, frame.payload.clone()).map_err(|source| {
            GatewayError::Hydration {
                event: frame.event.clone(),
                source,
            }
        })?;

        let ctx = self.context.clone();
        let id = self.supervisor.spawn(kind.handler_name(), handler(ctx, event));
        tracing::debug!(event = %kind, task_id = %id, "Routed event");
        Ok(Some(id))
    }

    /// Schedule the `ready` handler, if one is bound
    pub fn route_ready(&self) -> Option<TaskId> {
        let handler = self.registry.get(EventKind::Ready)?;
        let ctx = self.context.clone();
        Some(
            self.supervisor
                .spawn(EventKind::Ready.handler_name(), handler(ctx, GatewayEvent::Ready)),
        )
    }

    pub fn supervisor(&self) -> &TaskSupervisor {
        &self.supervisor
    }

    pub fn context(&self) -> &Context {
        &self.context
    }
}
