use serde::Serialize;

/// The single current-session row returned by the intraday endpoint.
///
/// OHLC and volume fields are `None` when the feed sent text that does not
/// parse. `close` is only `None` for a present but garbled value; a missing or
/// sentinel close never makes it into a row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntradayRow {
    /// The `Symbol` column, or the request token when the feed left it blank.
    pub symbol: String,
    pub date: Option<String>,
    pub time: Option<String>,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<u64>,
}

impl IntradayRow {
    /// `"<date> <time>"` as reported by the feed, when both are present.
    pub fn market_time(&self) -> Option<String> {
        match (&self.date, &self.time) {
            (Some(date), Some(time)) => Some(format!("{} {}", date, time)),
            _ => None,
        }
    }
}
