//! # blackbox-common
//!
//! Shared utilities: client configuration and telemetry.

pub mod config;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use config::{
    AppSettings, ClientConfig, ConfigError, EndpointConfig, Environment, GatewayConfig,
    RestConfig,
};
pub use telemetry::{
    try_init_tracing_with_config, TracingConfig, TracingError,
};
