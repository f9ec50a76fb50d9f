//! Symbol normalization and validation.
//!
//! Canonical symbols are uppercase ASCII letters and digits with an optional
//! `.` class separator, e.g. `BRK.B`.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::QuoteError;

pub const INVALID_TICKER: &str = "Invalid ticker.";

fn disallowed() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^A-Z0-9.]").expect("static pattern"))
}

/// Trims, uppercases, and strips every character outside `[A-Z0-9.]`.
///
/// This is the cleanup a text box applies before asking for a quote.
pub fn normalize_symbol(input: &str) -> String {
    let upper = input.trim().to_uppercase();
    disallowed().replace_all(&upper, "").into_owned()
}

/// True when `symbol` is non-empty and already in canonical form.
pub fn is_canonical(symbol: &str) -> bool {
    !symbol.is_empty() && normalize_symbol(symbol) == symbol
}

/// Rejects an empty symbol.
pub fn ensure_symbol(symbol: &str) -> Result<&str, QuoteError> {
    if symbol.trim().is_empty() {
        return Err(QuoteError::InvalidInput(INVALID_TICKER.to_string()));
    }
    Ok(symbol)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_and_uppercases() {
        assert_eq!(normalize_symbol("  aapl "), "AAPL");
    }

    #[test]
    fn normalize_keeps_class_separator() {
        assert_eq!(normalize_symbol("brk.b"), "BRK.B");
    }

    #[test]
    fn normalize_strips_other_characters() {
        assert_eq!(normalize_symbol("$msft!"), "MSFT");
        assert_eq!(normalize_symbol("brk-b"), "BRKB");
        assert_eq!(normalize_symbol("a a p l"), "AAPL");
        assert_eq!(normalize_symbol("ÄAPL"), "APL");
    }

    #[test]
    fn normalize_can_produce_empty() {
        assert_eq!(normalize_symbol("  "), "");
        assert_eq!(normalize_symbol("$$$"), "");
    }

    #[test]
    fn canonical_check() {
        assert!(is_canonical("AAPL"));
        assert!(is_canonical("BRK.B"));
        assert!(!is_canonical("aapl"));
        assert!(!is_canonical(""));
        assert!(!is_canonical("BRK-B"));
    }

    #[test]
    fn ensure_rejects_empty() {
        let err = ensure_symbol("").unwrap_err();
        assert_eq!(err.to_string(), INVALID_TICKER);
        assert!(ensure_symbol("   ").is_err());
        assert_eq!(ensure_symbol("AAPL").unwrap(), "AAPL");
    }
}
