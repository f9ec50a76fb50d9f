//! Concurrent quote fetching for a list of symbols.
//!
//! Uses the Semaphore + JoinSet pattern: every symbol gets a task, and the
//! semaphore caps how many of them talk to the feed at once.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::error::QuoteError;
use crate::quote::{Quote, QuoteBuilder};

/// Default number of concurrent fetches per batch.
pub const DEFAULT_CONCURRENCY: usize = 6;

/// Result of one symbol's fetch task.
#[derive(Debug)]
pub struct SymbolResult {
    pub symbol: String,
    pub result: Result<Quote, QuoteError>,
}

/// Successes and failures of a batch, in completion order.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub quotes: Vec<Quote>,
    pub failures: Vec<(String, QuoteError)>,
}

impl BatchOutcome {
    pub fn into_quotes(self) -> Vec<Quote> {
        self.quotes
    }
}

/// Builds quotes for `symbols`, at most `concurrency` at a time.
///
/// Never fails as a whole: per-symbol errors are logged and collected in
/// [`BatchOutcome::failures`]. A limit of zero is treated as one.
pub async fn fetch_many(
    builder: &QuoteBuilder,
    symbols: &[String],
    concurrency: usize,
) -> BatchOutcome {
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut join_set = JoinSet::new();

    for symbol in symbols {
        let sem = Arc::clone(&semaphore);
        let builder = builder.clone();
        let symbol = symbol.clone();

        join_set.spawn(async move {
            let _permit = sem.acquire().await.expect("semaphore closed");
            let result = builder.build_quote(&symbol).await;
            SymbolResult { symbol, result }
        });
    }

    let mut outcome = BatchOutcome::default();
    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok(SymbolResult {
                result: Ok(quote), ..
            }) => outcome.quotes.push(quote),
            Ok(SymbolResult {
                symbol,
                result: Err(err),
            }) => {
                tracing::warn!("{}: quote failed: {}", symbol, err);
                outcome.failures.push((symbol, err));
            }
            Err(e) => tracing::warn!("Quote task did not complete: {}", e),
        }
    }

    tracing::debug!(
        "Batch finished: {} ok, {} failed",
        outcome.quotes.len(),
        outcome.failures.len()
    );
    outcome
}
