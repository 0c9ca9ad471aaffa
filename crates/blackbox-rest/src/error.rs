//! REST error types

use thiserror::Error;

/// REST client error type
#[derive(Debug, Error)]
pub enum RestError {
    /// The server answered with a non-2xx status
    #[error("Request failed with status {status}")]
    RequestFailed { status: u16, body: String },

    /// Transport, timeout or decode failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The shared session was released at shutdown
    #[error("REST session is closed")]
    SessionClosed,
}

impl RestError {
    /// HTTP status of a failed request
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            Self::SessionClosed => None,
        }
    }

    /// Check if the server rejected the token
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }

    /// Check if the requested resource does not exist
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// REST result type
pub type RestResult<T> = Result<T, RestError>;
