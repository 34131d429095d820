/*
[INPUT]:  Client errors and local blob-storage failures raised while serving a view
[OUTPUT]: One error taxonomy (NotFound / Transport / Server) and dismissible notices
[POS]:    View layer - shared error handling for every screen
[UPDATE]: When adding error categories or changing operator-facing wording
*/

use std::fmt;

use batteryabn_client::ClientError;
use thiserror::Error;
use tracing::warn;

/// Failure of a single backend read or trigger issued on behalf of a view
#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("could not store downloaded document: {0}")]
    Blob(#[from] std::io::Error),
}

impl FetchError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::Client(err) if err.is_not_found())
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Client(err) => err.status(),
            FetchError::Blob(_) => None,
        }
    }
}

/// Outcome of one request as seen by a view
pub type Outcome<T> = std::result::Result<T, FetchError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Empty result; list views render it as zero rows
    NotFound,
    /// Network, timeout, malformed body, or local storage
    Transport,
    /// Backend answered with a non-2xx status
    Server,
}

impl ErrorCategory {
    pub fn of(err: &FetchError) -> Self {
        match err {
            FetchError::Client(ClientError::NotFound { .. }) => ErrorCategory::NotFound,
            FetchError::Client(ClientError::Server { .. }) => ErrorCategory::Server,
            FetchError::Client(ClientError::Transport(inner)) if inner.status().is_some() => {
                ErrorCategory::Server
            }
            FetchError::Client(_) | FetchError::Blob(_) => ErrorCategory::Transport,
        }
    }
}

/// User-visible error: a context-specific message plus the category and the
/// original cause kept for the detail line and the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewError {
    category: ErrorCategory,
    message: String,
    status: Option<u16>,
    cause: String,
}

impl ViewError {
    /// Classify `err`, log it with its cause, and attach `message` for display
    pub fn new(message: impl Into<String>, err: &FetchError) -> Self {
        let message = message.into();
        let category = ErrorCategory::of(err);
        let cause = err.to_string();
        warn!(category = ?category, %cause, "{message}");
        Self {
            category,
            message,
            status: err.status(),
            cause,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        self.category
    }

    /// Exact operator-facing message, e.g. `Error enqueuing update task`
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cause(&self) -> &str {
        &self.cause
    }

    /// Category-specific explanation shown under the message
    pub fn detail(&self) -> String {
        match (self.category, self.status) {
            (ErrorCategory::NotFound, _) => "Nothing was found".to_string(),
            (ErrorCategory::Transport, _) => "Could not reach the server".to_string(),
            (ErrorCategory::Server, Some(status)) => format!("Server responded with {status}"),
            (ErrorCategory::Server, None) => "Server reported an error".to_string(),
        }
    }
}

impl fmt::Display for ViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Transient, dismissible message attached to a view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    /// Client-side validation rejected the input; nothing was sent
    Invalid(String),
    Failure(ViewError),
}

impl Notice {
    pub fn text(&self) -> &str {
        match self {
            Notice::Success(text) | Notice::Invalid(text) => text,
            Notice::Failure(err) => err.message(),
        }
    }

    pub fn detail(&self) -> Option<String> {
        match self {
            Notice::Failure(err) => Some(err.detail()),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        !matches!(self, Notice::Success(_))
    }
}
