//! Re-export of the shared data model from `signalscope-types`.
// Consolidated re-exports so downstream crates can depend on `signalscope-core` only

pub use signalscope_types::{
    Capability, DEFAULT_SEARCH_SIZE_LIMIT, ScopeConfig, ScopeError, TruncationPolicy,
};

pub use signalscope_types::{
    AssetType, BucketRecord, CanonicalPoint, Decimal, Granularity, RawPoint, SignalKind,
};
pub use signalscope_types::{FilterSelection, SymbolSeries, Tz, day_bounds};
pub use signalscope_types::{PointPage, PointQuery, SummaryQuery};
pub use signalscope_types::{ResultMap, SymbolEntry};
