//! Client for the Stooq CSV market-data feed.
//!
//! Fetches the current-session quote and the daily history for US listings
//! and parses the loosely structured CSV bodies into typed rows.

mod client;
mod errors;
pub mod parse;
pub mod symbol;
pub mod types;
pub use self::client::{Client, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use self::errors::Error;
pub use self::parse::previous_close;
pub use self::types::{DailyRow, IntradayRow};
