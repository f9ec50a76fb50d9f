//! Feed-specific symbol tokens.
//!
//! Stooq addresses US listings as `<ticker>.us`. The intraday endpoint is
//! queried with a lowercase token and the daily endpoint with an uppercase
//! one. A class separator inside the ticker (`BRK.B`) is kept as-is.

/// Market suffix for US listings.
pub const MARKET_SUFFIX: &str = "us";

/// Token for the intraday quote endpoint, e.g. `BRK.B` -> `brk.b.us`.
pub fn intraday_token(symbol: &str) -> String {
    format!("{}.{}", symbol.to_lowercase(), MARKET_SUFFIX)
}

/// Token for the daily history endpoint, e.g. `BRK.B` -> `BRK.B.US`.
pub fn daily_token(symbol: &str) -> String {
    format!("{}.{}", symbol.to_uppercase(), MARKET_SUFFIX.to_uppercase())
}
