//! Signalscope fetches per-symbol signal data concurrently and aligns it for charting.
//!
//! Overview
//! - Turns a [`FilterSelection`] into one point search and one volume summary per
//!   symbol and runs them all concurrently against a `signalscope_core` connector.
//! - Normalizes the backend's day/week/month bucket keys onto one UTC time axis and
//!   merges each symbol's points and buckets into a sorted [`SymbolSeries`].
//! - Isolates failures per symbol: one symbol's error never removes another
//!   symbol's series from the [`ResultMap`].
//! - Tracks fetch generations so a slow, superseded fetch never overwrites the
//!   result of a newer one.
//!
//! Key behaviors and trade-offs
//! - Completion is wait-all: the map is published once every call has settled or
//!   hit the per-call timeout. One slow symbol delays the whole map.
//! - Point searches carry a size ceiling. A page that reports more matches than it
//!   returned either fails its symbol (`TruncationPolicy::Fail`, the default) or is
//!   kept with a warning (`TruncationPolicy::Warn`).
//! - A bucket key that breaks the wire format fails its symbol with
//!   `MalformedBucketKey` rather than silently misplacing the bar;
//!   [`ResultMap::contract_violations`] lists these.
//! - Week buckets are placed at January 1 plus whole weeks, not at ISO Mondays.
//!
//! Examples
//! Building an orchestrator and fetching a selection:
//! ```rust,ignore
//! use std::sync::Arc;
//! use signalscope::{FilterState, Granularity, Scope};
//!
//! let scope = Scope::builder()
//!     .connector(Arc::new(signalscope_mock::MockConnector::new()))
//!     .build()?;
//!
//! let mut filters = FilterState::new(start, end)?;
//! filters.set_available_symbols(scope.list_symbols().await?);
//! filters.select_all();
//! filters.set_granularity(Granularity::Week);
//!
//! let map = scope.fetch_all(&filters.snapshot()).await?;
//! for (symbol, series) in map.ready() {
//!     println!("{symbol}: {} points, {} buckets", series.prices.len(), series.volume.len());
//! }
//! for (symbol, err) in map.failed() {
//!     eprintln!("{symbol}: {err}");
//! }
//! ```
//!
//! Observing publications from another task:
//! ```rust,ignore
//! let mut rx = scope.subscribe();
//! while rx.changed().await.is_ok() {
//!     if let Some(map) = rx.borrow_and_update().clone() {
//!         redraw(&map);
//!     }
//! }
//! ```
//!
//! See `signalscope/examples/` for runnable end-to-end demonstrations.
#![warn(missing_docs)]

pub(crate) mod core;
mod filter;
mod router;

pub use core::{Scope, ScopeBuilder};
pub use filter::FilterState;
pub use router::fetch::{FetchPlan, SymbolPlan};

// Re-export core types for convenience
pub use signalscope_core::{
    AssetType, BucketRecord, CanonicalPoint, Capability, DEFAULT_SEARCH_SIZE_LIMIT,
    FilterSelection, Granularity, PointPage, PointQuery, RawPoint, ResultMap, ScopeConfig,
    ScopeError, SignalConnector, SignalKind, SummaryQuery, SymbolEntry, SymbolSeries,
    TruncationPolicy, Tz, day_bounds,
};
