//! Top gainers and losers by percent change.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::quote::Quote;

/// Number of entries kept on each side of a ranking.
pub const TOP_N: usize = 3;

/// Which end of the ranking to take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Gainers,
    Losers,
}

/// A symbol's contribution to a ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry {
    pub symbol: String,
    pub change_percent: f64,
}

/// Gainers and losers for one universe.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UniverseMovers {
    pub gainers: Vec<RankedEntry>,
    pub losers: Vec<RankedEntry>,
}

/// Full ranking result across both universes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub stocks: UniverseMovers,
    pub income_trusts: UniverseMovers,
    pub computed_at: DateTime<Utc>,
}

/// Quotes with a finite change, sorted ascending by percent.
///
/// The sort is stable, so equal percentages keep their input order.
fn ranked(quotes: &[Quote]) -> Vec<RankedEntry> {
    let mut entries: Vec<RankedEntry> = quotes
        .iter()
        .filter(|q| q.change_percent.is_finite())
        .map(|q| RankedEntry {
            symbol: q.display_symbol.clone(),
            change_percent: q.change_percent,
        })
        .collect();
    entries.sort_by(|a, b| a.change_percent.total_cmp(&b.change_percent));
    entries
}

/// Up to [`TOP_N`] entries from one end of the ranking.
///
/// Losers come from the low end in ascending order; gainers are the same
/// ordering reversed.
pub fn top_movers(quotes: &[Quote], direction: Direction) -> Vec<RankedEntry> {
    let mut entries = ranked(quotes);
    if direction == Direction::Gainers {
        entries.reverse();
    }
    entries.truncate(TOP_N);
    entries
}

/// Gainers and losers for one universe.
pub fn rank_universe(quotes: &[Quote]) -> UniverseMovers {
    UniverseMovers {
        gainers: top_movers(quotes, Direction::Gainers),
        losers: top_movers(quotes, Direction::Losers),
    }
}
