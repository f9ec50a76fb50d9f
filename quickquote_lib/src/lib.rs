//! Quote aggregation engine for Quick Quote.
//!
//! Builds quotes from the Stooq feed with a per-day previous-close cache,
//! fetches symbol batches under a concurrency cap, and ranks universes into
//! top gainers and losers behind a short-lived snapshot cache.

pub mod batch;
pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod quote;
pub mod ranking;
pub mod service;
pub mod symbol;
pub mod universe;

pub use stooq_api;

pub use batch::{fetch_many, BatchOutcome};
pub use cache::{MemoryPrevCloseCache, MemorySnapshotCache, PrevCloseCache, SnapshotCache};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Settings;
pub use error::{ErrorKind, QuoteError};
pub use quote::{ChangeBasis, Quote, QuoteBuilder};
pub use ranking::{top_movers, Direction, RankedEntry, Snapshot, UniverseMovers};
pub use service::QuoteService;
pub use symbol::normalize_symbol;
pub use universe::Universes;
