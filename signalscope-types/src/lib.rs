//! Signalscope data model, error type, and configuration primitives.
#![warn(missing_docs)]

mod capability;
mod config;
mod error;
mod model;
mod query;
mod reports;
mod selection;
mod series;

pub use capability::Capability;
pub use config::{DEFAULT_SEARCH_SIZE_LIMIT, ScopeConfig, TruncationPolicy};
pub use error::ScopeError;
pub use model::{AssetType, BucketRecord, CanonicalPoint, Granularity, RawPoint, SignalKind};
pub use query::{PointPage, PointQuery, SummaryQuery};
pub use reports::{ResultMap, SymbolEntry};
pub use selection::{FilterSelection, day_bounds};
pub use series::SymbolSeries;

pub use chrono_tz::Tz;
pub use rust_decimal::Decimal;
