//! Gateway client

use crate::connection::ConnectionManager;
use crate::context::Context;
use crate::dispatch::EventRouter;
use crate::error::GatewayResult;
use crate::events::{EventKind, EventPayload, GatewayEvent};
use crate::handlers::{HandlerRegistry, HandlerResult, RegistryError};
use crate::tasks::{TaskFault, TaskSupervisor};
use blackbox_common::ClientConfig;
use blackbox_rest::RestClient;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Gateway client
///
/// Bind handlers, then consume the client with [`run`](Client::run).
#[derive(Debug)]
pub struct Client {
    config: ClientConfig,
    registry: HandlerRegistry,
    rest: RestClient,
    supervisor: TaskSupervisor,
}

impl Client {
    /// Create a client and its REST session from the configuration
    pub fn new(config: ClientConfig) -> GatewayResult<Self> {
        let rest = RestClient::from_config(&config)?;
        Ok(Self::with_rest(config, rest))
    }

    /// Create a client around an existing REST session
    pub fn with_rest(config: ClientConfig, rest: RestClient) -> Self {
        Self {
            config,
            registry: HandlerRegistry::new(),
            rest,
            supervisor: TaskSupervisor::new(),
        }
    }

    /// Bind a handler receiving the hydrated event
    pub fn bind<F, Fut>(&mut self, event: &str, handler: F) -> Result<EventKind, RegistryError>
    where
        F: Fn(Context, GatewayEvent) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.registry.bind(event, handler)
    }

    /// Bind a handler receiving the event's entity
    pub fn on<T, F, Fut>(&mut self, event: &str, handler: F) -> Result<EventKind, RegistryError>
    where
        T: EventPayload,
        F: Fn(Context, T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.registry.on::<T, F, Fut>(event, handler)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    pub fn rest(&self) -> &RestClient {
        &self.rest
    }

    /// Supervisor the handlers will run on
    pub fn supervisor(&self) -> &TaskSupervisor {
        &self.supervisor
    }

    /// Take the channel on which failed handlers are reported
    ///
    /// Returns `None` after the first call.
    pub fn take_faults(&self) -> Option<mpsc::UnboundedReceiver<TaskFault>> {
        self.supervisor.take_faults()
    }

    /// Connect and serve the gateway until the connection closes
    ///
    /// Returns once every handler task has finished or been cancelled and
    /// the REST session has been released.
    pub async fn run(self) -> GatewayResult<()> {
        let url = self.config.endpoint.gateway_url();
        tracing::info!(
            app = %self.config.app.name,
            handlers = self.registry.len(),
            "Starting gateway client"
        );

        let router = EventRouter::new(
            Arc::new(self.registry),
            self.supervisor,
            Context::new(self.rest.clone()),
        );
        let manager = ConnectionManager::new(
            self.config.token,
            router,
            self.rest,
            self.config.gateway.outbound_buffer,
        );
        manager.run(&url).await
    }
}
