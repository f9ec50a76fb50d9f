//! Facade exposing single quotes and ranked top-movers snapshots.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use stooq_api::Client;

use crate::batch::{fetch_many, DEFAULT_CONCURRENCY};
use crate::cache::{MemoryPrevCloseCache, MemorySnapshotCache, PrevCloseCache, SnapshotCache};
use crate::clock::{Clock, SystemClock};
use crate::config::{Settings, DEFAULT_SNAPSHOT_TTL};
use crate::error::QuoteError;
use crate::quote::{Quote, QuoteBuilder};
use crate::ranking::{rank_universe, Snapshot};
use crate::universe::{load_default_universes, load_universes_file, Universes};

/// Quote engine shared by every caller of the process.
///
/// Owns the previous-close and snapshot caches. A snapshot younger than the
/// configured TTL is returned as-is; otherwise both universes are fetched
/// concurrently, ranked, and the result replaces the cached snapshot.
pub struct QuoteService {
    builder: QuoteBuilder,
    snapshots: Arc<dyn SnapshotCache>,
    clock: Arc<dyn Clock>,
    universes: Universes,
    concurrency: usize,
    snapshot_ttl: Duration,
}

impl QuoteService {
    /// Creates a service with in-memory caches and the system clock.
    pub fn new(client: Client, universes: Universes) -> Self {
        Self::with_parts(
            client,
            universes,
            Arc::new(MemoryPrevCloseCache::new()),
            Arc::new(MemorySnapshotCache::new()),
            Arc::new(SystemClock),
        )
    }

    /// Creates a service from explicit caches and clock. Used for testing.
    pub fn with_parts(
        client: Client,
        universes: Universes,
        prev_close: Arc<dyn PrevCloseCache>,
        snapshots: Arc<dyn SnapshotCache>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            builder: QuoteBuilder::new(client, prev_close, Arc::clone(&clock)),
            snapshots,
            clock,
            universes,
            concurrency: DEFAULT_CONCURRENCY,
            snapshot_ttl: DEFAULT_SNAPSHOT_TTL,
        }
    }

    /// Builds a service from settings, loading the universe file if one is set.
    pub fn from_settings(settings: &Settings) -> Result<Self, QuoteError> {
        let client = Client::with_timeout(&settings.feed_url, settings.request_timeout)?;
        let universes = match &settings.universes_path {
            Some(path) => load_universes_file(path)?,
            None => load_default_universes()?,
        };
        Ok(Self::new(client, universes)
            .with_concurrency(settings.concurrency)
            .with_snapshot_ttl(settings.snapshot_ttl))
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_snapshot_ttl(mut self, ttl: Duration) -> Self {
        self.snapshot_ttl = ttl;
        self
    }

    pub fn universes(&self) -> &Universes {
        &self.universes
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Current quote for an already-normalized symbol.
    pub async fn request_quote(&self, symbol: &str) -> Result<Quote, QuoteError> {
        self.builder.build_quote(symbol).await
    }

    /// Ranked top movers for both universes, cached for the snapshot TTL.
    pub async fn request_snapshot(&self) -> Result<Arc<Snapshot>, QuoteError> {
        let now = self.clock.now();
        if let Some(cached) = self.snapshots.get() {
            if self.is_fresh(cached.computed_at, now) {
                tracing::debug!("Serving cached snapshot from {}", cached.computed_at);
                return Ok(cached);
            }
        }

        let (stocks, income_trusts) = tokio::join!(
            fetch_many(&self.builder, &self.universes.stocks, self.concurrency),
            fetch_many(&self.builder, &self.universes.income_trusts, self.concurrency),
        );

        tracing::info!(
            "Snapshot rebuilt: stocks {}/{}, income trusts {}/{}",
            stocks.quotes.len(),
            self.universes.stocks.len(),
            income_trusts.quotes.len(),
            self.universes.income_trusts.len()
        );

        let snapshot = Arc::new(Snapshot {
            stocks: rank_universe(&stocks.quotes),
            income_trusts: rank_universe(&income_trusts.quotes),
            computed_at: self.clock.now(),
        });
        self.snapshots.put(Arc::clone(&snapshot));
        Ok(snapshot)
    }

    /// A snapshot stamped in the future is treated as stale.
    fn is_fresh(&self, computed_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match (now - computed_at).to_std() {
            Ok(age) => age < self.snapshot_ttl,
            Err(_) => false,
        }
    }
}
