use std::time::Duration;
use thiserror::Error;

/// Errors surfaced by the tutoring relay.
///
/// Every variant maps to a stable `kind()` tag that is sent to clients in
/// error frames and quiz failure payloads.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Transcript could not be fetched (bad id, no captions, network)
    #[error("Transcript unavailable: {0}")]
    TranscriptUnavailable(String),

    /// A transcript segment arrived without text
    #[error("Transcript segment {index} has no text")]
    InvalidSegment { index: usize },

    /// Completion provider failed or returned malformed data
    #[error("Completion unavailable: {0}")]
    CompletionUnavailable(String),

    /// Completion provider did not answer in time
    #[error("Completion timed out after {0:?}")]
    TimeoutExceeded(Duration),

    /// Inbound frame is not well-formed JSON or lacks required fields
    #[error("Invalid frame: {0}")]
    InvalidFrame(String),

    /// Operation not allowed in the session's current state
    #[error("Illegal state: {0}")]
    IllegalState(String),
}

impl RelayError {
    /// Stable snake_case tag for wire payloads
    pub fn kind(&self) -> &'static str {
        match self {
            RelayError::TranscriptUnavailable(_) => "transcript_unavailable",
            RelayError::InvalidSegment { .. } => "invalid_segment",
            RelayError::CompletionUnavailable(_) => "completion_unavailable",
            RelayError::TimeoutExceeded(_) => "timeout_exceeded",
            RelayError::InvalidFrame(_) => "invalid_frame",
            RelayError::IllegalState(_) => "illegal_state",
        }
    }
}

pub type RelayResult<T> = std::result::Result<T, RelayError>;
