use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use signalscope_core::connector::{
    CatalogProvider, PointSearchProvider, SignalConnector, SummaryProvider,
};
use signalscope_core::{
    BucketRecord, Capability, PointPage, PointQuery, RawPoint, ScopeError, SummaryQuery,
};

mod dynamic;
mod fixtures;

pub use dynamic::{DynamicMockConnector, DynamicMockController, MockBehavior, MockCall};

/// Symbols served by [`MockConnector`] fixtures.
pub const FIXTURE_SYMBOLS: [&str; 4] = fixtures::points::SYMBOLS;

/// Mock connector for CI-safe examples. Provides deterministic data from static fixtures.
///
/// Two reserved symbols exercise failure paths: `FAIL` errors immediately on
/// every per-symbol call and `TIMEOUT` sleeps before answering so a short
/// provider timeout trips.
pub struct MockConnector;

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnector {
    /// Latency injected for the `TIMEOUT` symbol.
    pub const TIMEOUT_DELAY: Duration = Duration::from_millis(200);

    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    async fn maybe_fail_or_timeout(symbol: &str, capability: Capability) -> Result<(), ScopeError> {
        match symbol {
            "FAIL" => Err(ScopeError::connector(
                "signalscope-mock",
                format!("forced failure: {capability}"),
            )),
            "TIMEOUT" => {
                tokio::time::sleep(Self::TIMEOUT_DELAY).await;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn points_for(symbol: &str) -> Result<Vec<RawPoint>, ScopeError> {
        if symbol == "TIMEOUT" {
            return Ok(Vec::new());
        }
        fixtures::points::by_symbol(symbol)
            .ok_or_else(|| ScopeError::not_found(format!("signals for {symbol}")))
    }

    fn matches(p: &RawPoint, model: Option<&str>, from: DateTime<Utc>, to: DateTime<Utc>) -> bool {
        (from..=to).contains(&p.ts) && model.is_none_or(|m| p.model_name.as_deref() == Some(m))
    }
}

impl SignalConnector for MockConnector {
    fn name(&self) -> &'static str {
        "signalscope-mock"
    }
    fn vendor(&self) -> &'static str {
        "Mock"
    }

    fn as_point_search_provider(&self) -> Option<&dyn PointSearchProvider> {
        Some(self as &dyn PointSearchProvider)
    }
    fn as_summary_provider(&self) -> Option<&dyn SummaryProvider> {
        Some(self as &dyn SummaryProvider)
    }
    fn as_catalog_provider(&self) -> Option<&dyn CatalogProvider> {
        Some(self as &dyn CatalogProvider)
    }
}

#[async_trait]
impl PointSearchProvider for MockConnector {
    async fn search_points(&self, query: PointQuery) -> Result<PointPage, ScopeError> {
        Self::maybe_fail_or_timeout(&query.symbol, Capability::SearchPoints).await?;
        let mut points: Vec<RawPoint> = Self::points_for(&query.symbol)?
            .into_iter()
            .filter(|p| Self::matches(p, query.model.as_deref(), query.from, query.to))
            .collect();
        // Newest first, as the backend pages them.
        points.sort_by(|a, b| b.ts.cmp(&a.ts));
        let total = u64::try_from(points.len()).ok();
        points.truncate(usize::try_from(query.size_limit).unwrap_or(usize::MAX));
        Ok(PointPage { points, total })
    }
}

#[async_trait]
impl SummaryProvider for MockConnector {
    async fn summarize(&self, query: SummaryQuery) -> Result<Vec<BucketRecord>, ScopeError> {
        let points = match query.symbol.as_deref() {
            Some(s) => {
                Self::maybe_fail_or_timeout(s, Capability::Summarize).await?;
                Self::points_for(s)?
            }
            None => fixtures::points::SYMBOLS
                .iter()
                .filter_map(|s| fixtures::points::by_symbol(s))
                .flatten()
                .collect(),
        };
        let selected = points
            .iter()
            .filter(|p| Self::matches(p, query.model.as_deref(), query.from, query.to));
        Ok(fixtures::summary::aggregate(selected, query.granularity))
    }
}

#[async_trait]
impl CatalogProvider for MockConnector {
    async fn list_symbols(&self) -> Result<Vec<String>, ScopeError> {
        Ok(fixtures::catalog::symbols())
    }

    async fn list_models(&self) -> Result<Vec<String>, ScopeError> {
        Ok(fixtures::catalog::models())
    }
}
