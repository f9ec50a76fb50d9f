//! Error types for the library layer.

use std::fmt;

/// Coarse classification of a [`QuoteError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Symbol unknown or no current data.
    NotFound,
    /// Fewer than two historical closes.
    InsufficientHistory,
    /// Transport failure or non-success status.
    Upstream,
    /// Empty or malformed symbol.
    InvalidInput,
    /// Settings or universe definitions could not be loaded.
    Config,
}

/// Errors produced by the library layer, wrapping feed errors and adding
/// input validation and configuration failures.
#[derive(Debug)]
pub enum QuoteError {
    /// An error from the feed client.
    Feed(stooq_api::Error),
    /// User-provided input failed validation.
    InvalidInput(String),
    /// Configuration could not be loaded.
    Config(String),
}

impl QuoteError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Feed(stooq_api::Error::NotFound(_)) => ErrorKind::NotFound,
            Self::Feed(stooq_api::Error::InsufficientHistory)
            | Self::Feed(stooq_api::Error::PreviousCloseUnavailable) => {
                ErrorKind::InsufficientHistory
            }
            Self::Feed(_) => ErrorKind::Upstream,
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::Config(_) => ErrorKind::Config,
        }
    }
}

impl fmt::Display for QuoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Feed(e) => write!(f, "{}", e),
            Self::InvalidInput(msg) => write!(f, "{}", msg),
            Self::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for QuoteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Feed(e) => Some(e),
            _ => None,
        }
    }
}

impl From<stooq_api::Error> for QuoteError {
    fn from(e: stooq_api::Error) -> Self {
        Self::Feed(e)
    }
}
