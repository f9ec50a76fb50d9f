mod intraday;
pub use self::intraday::IntradayRow;

mod daily;
pub use self::daily::DailyRow;
