//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    /// A JSON payload could not be turned into the requested entity
    #[error("Failed to hydrate {entity}: {source}")]
    Hydration {
        entity: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(i64),
}

impl DomainError {
    /// Get an error code string for logs
    pub fn code(&self) -> &'static str {
        match self {
            Self::Hydration { .. } => "HYDRATION_FAILED",
            Self::InvalidTimestamp(_) => "INVALID_TIMESTAMP",
        }
    }

    /// Name of the entity that failed to hydrate, if any
    pub fn entity(&self) -> Option<&'static str> {
        match self {
            Self::Hydration { entity, .. } => Some(entity),
            Self::InvalidTimestamp(_) => None,
        }
    }
}
