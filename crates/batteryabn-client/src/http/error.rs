/*
[INPUT]:  Error sources (HTTP transport, status codes, serialization, URLs)
[OUTPUT]: Structured error types with classification helpers
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for the batteryabn client
#[derive(Error, Debug)]
pub enum ClientError {
    /// Request never produced a response (connect, DNS, reset, body read)
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Request exceeded the configured timeout
    #[error("Request timed out after {duration}s")]
    Timeout { duration: u64 },

    /// Backend answered 404
    #[error("Resource not found: {path}")]
    NotFound { path: String },

    /// Backend answered with any other non-2xx status
    #[error("Server error (status {status}): {message}")]
    Server { status: u16, message: String },

    /// Response body did not match the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Check if the backend reported the resource as missing
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound { .. })
    }

    /// Check if the failure happened on the way to or from the server
    /// rather than being reported by it
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ClientError::Transport(_) | ClientError::Timeout { .. } | ClientError::Decode(_)
        )
    }

    /// HTTP status associated with the error, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::NotFound { .. } => Some(StatusCode::NOT_FOUND.as_u16()),
            ClientError::Server { status, .. } => Some(*status),
            ClientError::Transport(err) => err.status().map(|status| status.as_u16()),
            _ => None,
        }
    }

    /// Create a server error from status code and message
    pub fn server_error(status: StatusCode, message: impl Into<String>) -> Self {
        ClientError::Server {
            status: status.as_u16(),
            message: message.into(),
        }
    }
}

/// Result type alias for batteryabn client operations
pub type Result<T> = std::result::Result<T, ClientError>;
