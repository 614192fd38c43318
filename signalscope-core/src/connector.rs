use async_trait::async_trait;

use crate::{BucketRecord, PointPage, PointQuery, ScopeError, SummaryQuery};

/// Focused role trait for connectors that return raw signal/price points.
#[async_trait]
pub trait PointSearchProvider: Send + Sync {
    /// Fetch points for one symbol over the query's inclusive range.
    ///
    /// Implementations return at most `query.size_limit` points and should report
    /// the backend's total match count so truncation can be detected.
    async fn search_points(&self, query: PointQuery) -> Result<PointPage, ScopeError>;
}

/// Focused role trait for connectors that return bucketed signal counts.
#[async_trait]
pub trait SummaryProvider: Send + Sync {
    /// Fetch buy/sell/hold counts per bucket.
    ///
    /// Bucket keys must follow the wire format of `query.granularity`:
    /// `YYYY-MM-DD`, `YYYY-Www`, or `YYYY-MM`.
    async fn summarize(&self, query: SummaryQuery) -> Result<Vec<BucketRecord>, ScopeError>;
}

/// Focused role trait for connectors that enumerate what can be selected.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Distinct symbols known to the backend.
    async fn list_symbols(&self) -> Result<Vec<String>, ScopeError>;

    /// Distinct model names known to the backend.
    async fn list_models(&self) -> Result<Vec<String>, ScopeError>;
}

/// A backend connector that advertises its capabilities via role accessors.
///
/// Every accessor defaults to `None`; connectors override the ones they support.
/// The orchestrator maps a missing role to `ScopeError::Unsupported`.
pub trait SignalConnector: Send + Sync {
    /// A stable identifier used to tag errors and telemetry (e.g. "signalscope-http").
    fn name(&self) -> &'static str;

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Advertise point search by returning a usable trait object reference when supported.
    fn as_point_search_provider(&self) -> Option<&dyn PointSearchProvider> {
        None
    }

    /// Advertise bucket summaries by returning a usable trait object reference when supported.
    fn as_summary_provider(&self) -> Option<&dyn SummaryProvider> {
        None
    }

    /// If implemented, returns a trait object for symbol/model listings.
    fn as_catalog_provider(&self) -> Option<&dyn CatalogProvider> {
        None
    }
}
