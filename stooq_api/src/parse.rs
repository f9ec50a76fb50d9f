//! CSV parsing for feed responses.
//!
//! Both endpoints answer with a header line naming the columns followed by
//! data lines. Values are mapped to columns by position; a data line shorter
//! than the header leaves the trailing columns empty.

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::types::{DailyRow, IntradayRow};
use crate::Error;

pub(crate) const TICKER_NOT_FOUND: &str = "Ticker not found.";
pub(crate) const NO_DATA: &str = "No data available for this ticker at the moment.";

/// Placeholders the feed uses for "no value".
const SENTINELS: &[&str] = &["N/A", "N/D"];

/// Position of `Close` in a daily response when the header does not name it.
const DAILY_CLOSE_POSITION: usize = 4;

/// Parses a decimal that may use either `.` or `,` as the separator.
///
/// Returns `None` for anything that is not a finite number, including
/// thousands-grouped values such as `1,234.56`.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let normalized = raw.trim().replacen(',', ".", 1);
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses a volume after stripping every non-digit character.
pub fn parse_volume(raw: &str) -> Option<u64> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    digits.parse::<u64>().ok()
}

struct Table {
    headers: Vec<String>,
    records: Vec<StringRecord>,
}

impl Table {
    fn read(body: &str) -> Result<Self, csv::Error> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(body.trim().as_bytes());
        let headers = reader.headers()?.iter().map(str::to_string).collect();
        let mut records = Vec::new();
        for record in reader.records() {
            let record = record?;
            if record.iter().any(|field| !field.is_empty()) {
                records.push(record);
            }
        }
        Ok(Self { headers, records })
    }

    fn position(&self, column: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == column)
    }

    fn value<'a>(&self, record: &'a StringRecord, column: &str) -> &'a str {
        self.position(column)
            .and_then(|idx| record.get(idx))
            .unwrap_or("")
    }
}

fn non_empty(raw: &str) -> Option<String> {
    if raw.is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}

/// Parses an intraday response into its single row.
///
/// `token` is the symbol token the request was made with and stands in for a
/// blank `Symbol` column.
pub fn parse_intraday(body: &str, token: &str) -> Result<IntradayRow, Error> {
    let table = Table::read(body).map_err(|e| {
        tracing::debug!("Unreadable intraday response for {}: {}", token, e);
        Error::NotFound(TICKER_NOT_FOUND.to_string())
    })?;
    let record = table
        .records
        .first()
        .ok_or_else(|| Error::NotFound(TICKER_NOT_FOUND.to_string()))?;

    let close = table.value(record, "Close");
    if close.is_empty() || SENTINELS.contains(&close) {
        return Err(Error::NotFound(NO_DATA.to_string()));
    }

    let symbol = table.value(record, "Symbol");
    Ok(IntradayRow {
        symbol: if symbol.is_empty() {
            token.to_string()
        } else {
            symbol.to_string()
        },
        date: non_empty(table.value(record, "Date")),
        time: non_empty(table.value(record, "Time")),
        open: parse_decimal(table.value(record, "Open")),
        high: parse_decimal(table.value(record, "High")),
        low: parse_decimal(table.value(record, "Low")),
        close: parse_decimal(close),
        volume: parse_volume(table.value(record, "Volume")),
    })
}

/// Parses a daily history response into rows, oldest first.
///
/// Fails with [`Error::InsufficientHistory`] unless at least two sessions
/// are present.
pub fn parse_daily(body: &str) -> Result<Vec<DailyRow>, Error> {
    let table = Table::read(body).map_err(|e| {
        tracing::debug!("Unreadable daily history response: {}", e);
        Error::InsufficientHistory
    })?;
    if table.records.len() < 2 {
        return Err(Error::InsufficientHistory);
    }

    let close_idx = table.position("Close").unwrap_or(DAILY_CLOSE_POSITION);
    let rows = table
        .records
        .iter()
        .map(|record| DailyRow {
            date: table.value(record, "Date").to_string(),
            open: parse_decimal(table.value(record, "Open")),
            high: parse_decimal(table.value(record, "High")),
            low: parse_decimal(table.value(record, "Low")),
            close: record.get(close_idx).and_then(parse_decimal),
            volume: parse_volume(table.value(record, "Volume")),
        })
        .collect();
    Ok(rows)
}

/// Close of the session before the most recent one.
///
/// The newest row may be the session still in progress, so the basis for a
/// change calculation is the second-to-last row.
pub fn previous_close(rows: &[DailyRow]) -> Result<f64, Error> {
    if rows.len() < 2 {
        return Err(Error::InsufficientHistory);
    }
    rows[rows.len() - 2]
        .close
        .ok_or(Error::PreviousCloseUnavailable)
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTRADAY_HEADER: &str = "Symbol,Date,Time,Open,High,Low,Close,Volume";

    #[test]
    fn decimal_accepts_dot_and_comma() {
        assert_eq!(parse_decimal("1234.56"), Some(1234.56));
        assert_eq!(parse_decimal("1234,56"), Some(1234.56));
    }

    #[test]
    fn decimal_rejects_garbage() {
        assert_eq!(parse_decimal("N/A"), None);
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("abc"), None);
        assert_eq!(parse_decimal("NaN"), None);
        assert_eq!(parse_decimal("inf"), None);
    }

    #[test]
    fn decimal_with_grouping_comma_is_unavailable() {
        // Only one comma is treated as the separator, so grouped thousands
        // do not parse rather than being read as a small number.
        assert_eq!(parse_decimal("1,234.56"), None);
        assert_eq!(parse_decimal("1,234,567"), None);
    }

    #[test]
    fn volume_strips_separators() {
        assert_eq!(parse_volume("1,200,000"), Some(1_200_000));
        assert_eq!(parse_volume("1 200 000"), Some(1_200_000));
        assert_eq!(parse_volume("N/A"), None);
        assert_eq!(parse_volume(""), None);
    }

    #[test]
    fn intraday_full_row() {
        let body = format!(
            "{}\r\nAAPL.US,2024-06-14,22:00:08,148.00,151.00,147.50,150.25,\"1,200,000\"\r\n",
            INTRADAY_HEADER
        );
        let row = parse_intraday(&body, "aapl.us").unwrap();
        assert_eq!(row.symbol, "AAPL.US");
        assert_eq!(row.open, Some(148.0));
        assert_eq!(row.high, Some(151.0));
        assert_eq!(row.low, Some(147.5));
        assert_eq!(row.close, Some(150.25));
        assert_eq!(row.volume, Some(1_200_000));
        assert_eq!(row.market_time().as_deref(), Some("2024-06-14 22:00:08"));
    }

    #[test]
    fn intraday_header_only_is_not_found() {
        let err = parse_intraday(INTRADAY_HEADER, "zzzz.us").unwrap_err();
        match err {
            Error::NotFound(msg) => assert_eq!(msg, TICKER_NOT_FOUND),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn intraday_empty_body_is_not_found() {
        assert!(matches!(
            parse_intraday("", "aapl.us"),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn intraday_sentinel_close_is_no_data() {
        let body = format!("{}\nZZZZ.US,N/D,N/D,N/D,N/D,N/D,N/D,N/D", INTRADAY_HEADER);
        match parse_intraday(&body, "zzzz.us").unwrap_err() {
            Error::NotFound(msg) => assert_eq!(msg, NO_DATA),
            other => panic!("unexpected error: {:?}", other),
        }

        let body = format!("{}\nAAPL.US,2024-06-14,22:00:08,1,2,1,N/A,5", INTRADAY_HEADER);
        assert!(matches!(
            parse_intraday(&body, "aapl.us"),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn intraday_missing_close_column_is_no_data() {
        let body = "Symbol,Date,Time,Open\nAAPL.US,2024-06-14,22:00:08,148.00";
        assert!(matches!(
            parse_intraday(body, "aapl.us"),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn intraday_unavailable_high_keeps_row() {
        let body = format!(
            "{}\nAAPL.US,2024-06-14,22:00:08,148.00,N/A,147.50,150.25,1000",
            INTRADAY_HEADER
        );
        let row = parse_intraday(&body, "aapl.us").unwrap();
        assert_eq!(row.high, None);
        assert_eq!(row.close, Some(150.25));
    }

    #[test]
    fn intraday_short_row_leaves_trailing_fields_empty() {
        let body = format!("{}\nAAPL.US,2024-06-14,22:00:08,148.00,151.00,147.50,150.25", INTRADAY_HEADER);
        let row = parse_intraday(&body, "aapl.us").unwrap();
        assert_eq!(row.volume, None);
    }

    #[test]
    fn intraday_blank_symbol_uses_token() {
        let body = format!("{}\n,2024-06-14,,148.00,151.00,147.50,150.25,10", INTRADAY_HEADER);
        let row = parse_intraday(&body, "brk.b.us").unwrap();
        assert_eq!(row.symbol, "brk.b.us");
        assert_eq!(row.time, None);
        assert_eq!(row.market_time(), None);
    }

    #[test]
    fn daily_uses_second_to_last_row() {
        let body = "Date,Open,High,Low,Close,Volume\n\
                    2024-06-12,100,101,99,100.5,1000\n\
                    2024-06-13,100.5,102,100,101.75,1200\n\
                    2024-06-14,101.75,103,101,102.10,900\n";
        let rows = parse_daily(body).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].date, "2024-06-12");
        assert_eq!(previous_close(&rows).unwrap(), 101.75);
    }

    #[test]
    fn daily_skips_blank_lines() {
        let body = "Date,Open,High,Low,Close,Volume\n\
                    2024-06-13,1,1,1,10.0,1\n\
                    \n\
                    2024-06-14,1,1,1,11.0,1\n\n";
        let rows = parse_daily(body).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(previous_close(&rows).unwrap(), 10.0);
    }

    #[test]
    fn daily_single_row_is_insufficient() {
        let body = "Date,Open,High,Low,Close,Volume\n2024-06-14,1,1,1,11.0,1";
        assert!(matches!(parse_daily(body), Err(Error::InsufficientHistory)));
        assert!(matches!(parse_daily("No data"), Err(Error::InsufficientHistory)));
    }

    #[test]
    fn daily_close_falls_back_to_position() {
        let body = "d,o,h,l,c,v\n2024-06-13,1,1,1,10.0,1\n2024-06-14,1,1,1,11.0,1";
        let rows = parse_daily(body).unwrap();
        assert_eq!(previous_close(&rows).unwrap(), 10.0);
    }

    #[test]
    fn previous_close_unavailable() {
        let body = "Date,Open,High,Low,Close,Volume\n2024-06-13,1,1,1,N/A,1\n2024-06-14,1,1,1,11.0,1";
        let rows = parse_daily(body).unwrap();
        assert!(matches!(
            previous_close(&rows),
            Err(Error::PreviousCloseUnavailable)
        ));
    }

    #[test]
    fn previous_close_needs_two_rows() {
        assert!(matches!(previous_close(&[]), Err(Error::InsufficientHistory)));
    }
}
