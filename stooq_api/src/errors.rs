//! Error types for the feed client.

/// Errors that can occur when requesting or parsing feed data.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The symbol is unknown or the feed has no current data for it.
    #[error("{0}")]
    NotFound(String),
    /// The daily history has fewer than two sessions.
    #[error("Insufficient history.")]
    InsufficientHistory,
    /// The session before the most recent one has no usable close.
    #[error("Previous close unavailable.")]
    PreviousCloseUnavailable,
    /// An HTTP request failed (network error, timeout, or unreadable body).
    #[error("Feed request failed: {0}")]
    RequestFailed(String),
    /// The feed returned a non-success status with a body snippet.
    #[error("Feed request failed ({status})")]
    HttpStatus { status: u16, body: String },
}

impl Error {
    /// True for transport and status failures, as opposed to data problems.
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::RequestFailed(_) | Self::HttpStatus { .. })
    }
}
