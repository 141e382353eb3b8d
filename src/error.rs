//! Error types for payload building, submission, and polling.

use thiserror::Error;

/// Broad class of a [`ClientError`], used when reporting a fatal failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Transport,
    Deserialization,
    Cancelled,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Configuration => "configuration",
            ErrorCategory::Transport => "transport",
            ErrorCategory::Deserialization => "deserialization",
            ErrorCategory::Cancelled => "cancelled",
        }
    }
}

/// Errors raised while talking to the MediaHub job API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Resolution is not of the form `<height>x<width>`
    #[error("invalid resolution {input:?}: expected <height>x<width>, e.g. 640x360")]
    InvalidResolution { input: String },

    /// Bandwidth has no usable numeric magnitude
    #[error("invalid bandwidth {input:?}: {reason}")]
    InvalidBandwidth { input: String, reason: String },

    /// Payload could not be serialized
    #[error("could not encode job payload: {0}")]
    Encode(String),

    /// Request never produced a usable response
    #[error("request to {url} failed: {message}; ensure the MediaHub API is running and reachable")]
    Transport { url: String, message: String },

    /// Server answered with a non-success status
    #[error("{url} returned HTTP {status}: {body}; ensure the MediaHub API is running and reachable at that address")]
    HttpStatus { url: String, status: u16, body: String },

    /// Response body did not match the expected document
    #[error("could not parse response from {url}: {message}; ensure the URL points at a reachable MediaHub API")]
    Decode { url: String, message: String },

    /// Poller gave up before the job reported completion
    #[error("job {job_id} still at {last_progress}% after {polls} polls")]
    PollLimitReached {
        job_id: String,
        polls: u32,
        last_progress: i64,
    },
}

impl ClientError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ClientError::InvalidResolution { .. }
            | ClientError::InvalidBandwidth { .. }
            | ClientError::Encode(_) => ErrorCategory::Configuration,
            ClientError::Transport { .. } | ClientError::HttpStatus { .. } => {
                ErrorCategory::Transport
            }
            ClientError::Decode { .. } => ErrorCategory::Deserialization,
            ClientError::PollLimitReached { .. } => ErrorCategory::Cancelled,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
