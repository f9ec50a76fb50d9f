//! Quote assembly: intraday row plus previous close.

use std::sync::Arc;

use serde::Serialize;
use stooq_api::{Client, IntradayRow};

use crate::cache::PrevCloseCache;
use crate::clock::Clock;
use crate::error::QuoteError;
use crate::symbol::ensure_symbol;

/// What the change figures were computed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeBasis {
    /// The prior session's close from daily history.
    PreviousClose,
    /// Daily history was unavailable; today's open stood in for it.
    Open,
    /// No usable basis; change figures are zero.
    Unavailable,
}

/// One symbol's current market snapshot.
///
/// `change` and `change_percent` are always finite. They are zero when no
/// basis could be established, in which case `basis` is
/// [`ChangeBasis::Unavailable`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    /// Canonical symbol the quote was requested for.
    pub symbol: String,
    pub display_symbol: String,
    /// Symbol as echoed by the feed.
    pub feed_symbol: String,
    pub price: Option<f64>,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub volume: Option<u64>,
    pub change: f64,
    pub change_percent: f64,
    /// Price the change was measured against: the prior close, or the open
    /// when `basis` is [`ChangeBasis::Open`]. `None` when no change was
    /// computed.
    pub previous_close: Option<f64>,
    pub basis: ChangeBasis,
    /// Feed-reported `"<date> <time>"` of the last trade.
    pub market_time: Option<String>,
    /// Epoch seconds at which the quote was assembled.
    pub observed_at: i64,
}

/// Absolute and percent change of `price` against `basis`.
///
/// Returns `None` unless both are present and `basis` is non-zero.
pub fn compute_change(price: Option<f64>, basis: Option<f64>) -> Option<(f64, f64)> {
    match (price, basis) {
        (Some(price), Some(basis)) if price.is_finite() && basis.is_finite() && basis != 0.0 => {
            let change = price - basis;
            let percent = change / basis * 100.0;
            percent.is_finite().then_some((change, percent))
        }
        _ => None,
    }
}

/// Builds quotes from the feed, memoizing previous closes per day.
#[derive(Clone)]
pub struct QuoteBuilder {
    client: Client,
    prev_close: Arc<dyn PrevCloseCache>,
    clock: Arc<dyn Clock>,
}

impl QuoteBuilder {
    pub fn new(client: Client, prev_close: Arc<dyn PrevCloseCache>, clock: Arc<dyn Clock>) -> Self {
        Self {
            client,
            prev_close,
            clock,
        }
    }

    /// Fetches and assembles a quote for a canonical symbol.
    ///
    /// Only an empty symbol or a failed intraday fetch is an error. When the
    /// daily history cannot be used, the change is measured against the open.
    pub async fn build_quote(&self, symbol: &str) -> Result<Quote, QuoteError> {
        let symbol = ensure_symbol(symbol)?;
        let row = self.client.fetch_intraday(symbol).await?;

        let (basis_price, basis) = match self.previous_close(symbol).await {
            Ok(close) => (Some(close), ChangeBasis::PreviousClose),
            Err(e) => {
                tracing::debug!("{}: previous close unavailable ({}), using open", symbol, e);
                (row.open, ChangeBasis::Open)
            }
        };

        Ok(self.assemble(symbol, row, basis_price, basis))
    }

    /// Previous close for `symbol`, from the cache when it holds today's value.
    pub async fn previous_close(&self, symbol: &str) -> Result<f64, stooq_api::Error> {
        let today = self.clock.today();
        if let Some(close) = self.prev_close.get(symbol, today) {
            tracing::debug!("{}: previous close cache hit", symbol);
            return Ok(close);
        }

        let rows = self.client.fetch_daily_history(symbol).await?;
        let close = stooq_api::previous_close(&rows)?;
        self.prev_close.put(symbol, close, today);
        Ok(close)
    }

    fn assemble(
        &self,
        symbol: &str,
        row: IntradayRow,
        basis_price: Option<f64>,
        basis: ChangeBasis,
    ) -> Quote {
        let market_time = row.market_time();
        let (change, change_percent, basis, basis_price) =
            match compute_change(row.close, basis_price) {
                Some((change, percent)) => (change, percent, basis, basis_price),
                None => (0.0, 0.0, ChangeBasis::Unavailable, None),
            };

        Quote {
            symbol: symbol.to_string(),
            display_symbol: symbol.to_string(),
            feed_symbol: row.symbol,
            price: row.close,
            open: row.open,
            high: row.high,
            low: row.low,
            volume: row.volume,
            change,
            change_percent,
            previous_close: basis_price,
            basis,
            market_time,
            observed_at: self.clock.now().timestamp(),
        }
    }
}
