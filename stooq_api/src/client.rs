//! HTTP client for the Stooq CSV endpoints.

use std::time::Duration;

use url::{form_urlencoded, Url};

use crate::{
    parse::{parse_daily, parse_intraday},
    symbol::{daily_token, intraday_token},
    types::{DailyRow, IntradayRow},
    Error,
};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Production feed host.
pub const DEFAULT_BASE_URL: &str = "https://stooq.com";

/// Column selection for the intraday endpoint: symbol, date, time, OHLC, volume.
const INTRADAY_FIELDS: &str = "sd2t2ohlcv";

/// HTTP client for the Stooq quote and daily history endpoints.
///
/// Every request asks intermediaries not to serve a cached copy, so each
/// call reflects the feed's current state.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    /// Base URL for the feed. Defaults to `https://stooq.com`.
    base_url: String,
}

impl Client {
    /// Creates a client pointing at the production feed.
    pub fn new() -> Result<Self, Error> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Result<Self, Error> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Creates a client with a custom base URL and per-request timeout.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed(e.to_string())
            })?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the intraday quote for a canonical symbol.
    pub fn intraday_url(&self, symbol: &str) -> Result<Url, Error> {
        let token: String = form_urlencoded::byte_serialize(intraday_token(symbol).as_bytes()).collect();
        self.parse_url(&format!(
            "{}/q/l/?s={}&f={}&h&e=csv",
            self.base_url, token, INTRADAY_FIELDS
        ))
    }

    /// URL of the daily history for a canonical symbol.
    pub fn daily_url(&self, symbol: &str) -> Result<Url, Error> {
        let token: String = form_urlencoded::byte_serialize(daily_token(symbol).as_bytes()).collect();
        self.parse_url(&format!("{}/q/d/l/?s={}&i=d", self.base_url, token))
    }

    fn parse_url(&self, raw: &str) -> Result<Url, Error> {
        Url::parse(raw).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::RequestFailed(format!("invalid URL: {}", e))
        })
    }

    async fn get_text(&self, url: Url) -> Result<String, Error> {
        let resp = self
            .http
            .get(url)
            .header("cache-control", "no-cache")
            .header("pragma", "no-cache")
            .header("accept", "text/csv, text/plain, */*")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to get resource: {}", e);
                Error::RequestFailed(e.to_string())
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed(e.to_string())
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        Ok(body)
    }

    /// Fetches the current-session row for a canonical symbol.
    pub async fn fetch_intraday(&self, symbol: &str) -> Result<IntradayRow, Error> {
        let url = self.intraday_url(symbol)?;
        let body = self.get_text(url).await?;
        parse_intraday(&body, &intraday_token(symbol))
    }

    /// Fetches the daily history for a canonical symbol, oldest session first.
    pub async fn fetch_daily_history(&self, symbol: &str) -> Result<Vec<DailyRow>, Error> {
        let url = self.daily_url(symbol)?;
        let body = self.get_text(url).await?;
        parse_daily(&body)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}
