//! Client configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use serde::Deserialize;
use std::env;
use std::time::Duration;

/// Main client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Account token sent on IDENTIFY and in the `authorization` header
    pub token: String,
    pub app: AppSettings,
    pub endpoint: EndpointConfig,
    pub gateway: GatewayConfig,
    pub rest: RestConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// Where the service lives
///
/// `host` includes the API prefix, e.g. `localhost:8080/api`. The gateway
/// socket is served under `/ws/` of the same prefix.
#[derive(Debug, Clone, Deserialize)]
pub struct EndpointConfig {
    #[serde(default = "default_endpoint")]
    pub host: String,
    /// Use `wss://` and `https://` instead of the plain schemes
    #[serde(default)]
    pub secure: bool,
}

impl EndpointConfig {
    /// WebSocket URL of the gateway
    #[must_use]
    pub fn gateway_url(&self) -> String {
        let scheme = if self.secure { "wss" } else { "ws" };
        format!("{scheme}://{}/ws/", self.host.trim_end_matches('/'))
    }

    /// Base URL for REST requests (no trailing slash)
    #[must_use]
    pub fn rest_base_url(&self) -> String {
        let scheme = if self.secure { "https" } else { "http" };
        format!("{scheme}://{}", self.host.trim_end_matches('/'))
    }
}

/// Gateway connection settings
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Capacity of the outbound frame channel
    #[serde(default = "default_outbound_buffer")]
    pub outbound_buffer: usize,
}

/// REST client settings
#[derive(Debug, Clone, Deserialize)]
pub struct RestConfig {
    #[serde(default = "default_rest_timeout_secs")]
    pub timeout_secs: u64,
}

impl RestConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// Default value functions
fn default_app_name() -> String {
    "blackbox-client".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_endpoint() -> String {
    "localhost:8080/api".to_string()
}

fn default_outbound_buffer() -> usize {
    100
}

fn default_rest_timeout_secs() -> u64 {
    10
}

impl ClientConfig {
    /// Create a configuration with defaults for everything but the token and endpoint
    #[must_use]
    pub fn new(token: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            app: AppSettings {
                name: default_app_name(),
                env: default_env(),
            },
            endpoint: EndpointConfig {
                host: endpoint.into(),
                secure: false,
            },
            gateway: GatewayConfig {
                outbound_buffer: default_outbound_buffer(),
            },
            rest: RestConfig {
                timeout_secs: default_rest_timeout_secs(),
            },
        }
    }

    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if `BLACKBOX_TOKEN` is missing or a value cannot be parsed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup("BLACKBOX_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::MissingVar("BLACKBOX_TOKEN"))?;

        let env = match lookup("APP_ENV") {
            Some(value) => Environment::parse(&value)
                .ok_or(ConfigError::InvalidValue("APP_ENV", value))?,
            None => default_env(),
        };

        Ok(Self {
            token,
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env,
            },
            endpoint: EndpointConfig {
                host: lookup("BLACKBOX_ENDPOINT").unwrap_or_else(default_endpoint),
                secure: parse_var(&lookup, "BLACKBOX_SECURE")?.unwrap_or(false),
            },
            gateway: GatewayConfig {
                outbound_buffer: parse_var(&lookup, "BLACKBOX_OUTBOUND_BUFFER")?
                    .unwrap_or_else(default_outbound_buffer),
            },
            rest: RestConfig {
                timeout_secs: parse_var(&lookup, "BLACKBOX_REST_TIMEOUT_SECS")?
                    .unwrap_or_else(default_rest_timeout_secs),
            },
        })
    }
}

fn parse_var<F, T>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue(key, raw)),
        None => Ok(None),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
