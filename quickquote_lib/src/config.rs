//! Environment-driven settings.

use std::path::PathBuf;
use std::time::Duration;

use crate::batch::DEFAULT_CONCURRENCY;

pub const ENV_FEED_URL: &str = "QUICKQUOTE_FEED_URL";
pub const ENV_TIMEOUT_SECS: &str = "QUICKQUOTE_TIMEOUT_SECS";
pub const ENV_CONCURRENCY: &str = "QUICKQUOTE_CONCURRENCY";
pub const ENV_SNAPSHOT_TTL_SECS: &str = "QUICKQUOTE_SNAPSHOT_TTL_SECS";
pub const ENV_UNIVERSES: &str = "QUICKQUOTE_UNIVERSES";

/// Default freshness window for ranked snapshots.
pub const DEFAULT_SNAPSHOT_TTL: Duration = Duration::from_secs(30);

/// Runtime settings for [`crate::QuoteService`].
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub feed_url: String,
    pub request_timeout: Duration,
    /// Concurrent fetches per universe.
    pub concurrency: usize,
    pub snapshot_ttl: Duration,
    /// Universe file replacing the embedded lists.
    pub universes_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            feed_url: stooq_api::DEFAULT_BASE_URL.to_string(),
            request_timeout: stooq_api::DEFAULT_TIMEOUT,
            concurrency: DEFAULT_CONCURRENCY,
            snapshot_ttl: DEFAULT_SNAPSHOT_TTL,
            universes_path: None,
        }
    }
}

impl Settings {
    /// Reads settings from `QUICKQUOTE_*` environment variables.
    ///
    /// Missing or unparsable values keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Settings::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            feed_url: non_empty(ENV_FEED_URL)
                .map(|v| v.trim().to_string())
                .unwrap_or(defaults.feed_url),
            request_timeout: parse_u64(non_empty(ENV_TIMEOUT_SECS))
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            concurrency: parse_u64(non_empty(ENV_CONCURRENCY))
                .filter(|n| *n > 0)
                .map(|n| n as usize)
                .unwrap_or(defaults.concurrency),
            snapshot_ttl: parse_u64(non_empty(ENV_SNAPSHOT_TTL_SECS))
                .map(Duration::from_secs)
                .unwrap_or(defaults.snapshot_ttl),
            universes_path: non_empty(ENV_UNIVERSES).map(PathBuf::from),
        }
    }
}

fn parse_u64(value: Option<String>) -> Option<u64> {
    value.and_then(|v| v.trim().parse::<u64>().ok())
}
