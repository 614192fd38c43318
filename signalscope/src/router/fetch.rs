use std::collections::BTreeMap;
use std::sync::Arc;

use signalscope_core::{
    BucketRecord, Capability, FilterSelection, PointPage, PointQuery, ResultMap, ScopeError,
    SummaryQuery, SymbolEntry, TruncationPolicy, merge_series,
};

use crate::Scope;
use crate::core::tag_err;

/// The two backend calls issued for one symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolPlan {
    /// Symbol both calls are made for.
    pub symbol: String,
    /// Raw point search.
    pub points: PointQuery,
    /// Bucketed volume summary.
    pub summary: SummaryQuery,
}

/// Every call a `fetch_all` would issue for a selection, in symbol order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchPlan {
    /// Per-symbol descriptors.
    pub symbols: Vec<SymbolPlan>,
}

impl FetchPlan {
    /// Number of symbols in the plan.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// True when the plan has no symbols.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Number of backend calls the plan issues.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.symbols.len() * 2
    }
}

// Outcome of one symbol: its entry plus an optional non-fatal warning.
type Settled = (String, SymbolEntry, Option<ScopeError>);

impl Scope {
    /// Build the per-symbol call descriptors for `selection` without issuing them.
    ///
    /// # Errors
    /// Returns `EmptySelection` when no symbol is selected.
    pub fn plan(&self, selection: &FilterSelection) -> Result<FetchPlan, ScopeError> {
        if selection.is_empty() {
            return Err(ScopeError::EmptySelection);
        }
        let model = selection.model().map(str::to_string);
        let symbols = selection
            .symbols()
            .iter()
            .map(|symbol| SymbolPlan {
                symbol: symbol.clone(),
                points: PointQuery {
                    symbol: symbol.clone(),
                    model: model.clone(),
                    from: selection.from(),
                    to: selection.to(),
                    size_limit: self.cfg.search_size_limit,
                },
                summary: SummaryQuery {
                    symbol: Some(symbol.clone()),
                    model: model.clone(),
                    from: selection.from(),
                    to: selection.to(),
                    granularity: selection.granularity(),
                },
            })
            .collect();
        Ok(FetchPlan { symbols })
    }

    /// Fetch points and volume for every selected symbol and publish the merged result map.
    ///
    /// Behavior:
    /// - All calls of all symbols run concurrently; the map is built only after
    ///   every call has settled (or timed out).
    /// - A failing call marks only its own symbol as failed. The other symbols
    ///   keep their series.
    /// - Each call starts a new fetch generation. When a newer call starts before
    ///   this one settles, this call publishes nothing.
    ///
    /// # Errors
    /// - `EmptySelection` when no symbol is selected; no request is issued.
    /// - `StaleGeneration` when a newer `fetch_all` superseded this one.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "signalscope::router::fetch_all",
            skip(self, selection),
            fields(
                symbols = selection.symbols().len(),
                granularity = %selection.granularity(),
                model = selection.model().unwrap_or("*"),
            ),
        )
    )]
    pub async fn fetch_all(&self, selection: &FilterSelection) -> Result<Arc<ResultMap>, ScopeError> {
        let plan = self.plan(selection)?;
        let generation = self.begin_generation();

        let tasks = plan.symbols.into_iter().map(|p| self.fetch_symbol(p));
        let settled: Vec<Settled> = futures::future::join_all(tasks).await;

        let mut entries = BTreeMap::new();
        let mut warnings = Vec::new();
        for (symbol, entry, warning) in settled {
            warnings.extend(warning);
            entries.insert(symbol, entry);
        }

        let map = ResultMap {
            generation,
            selection: selection.clone(),
            entries,
            warnings,
        };
        let published = self.publish(map);

        #[cfg(feature = "tracing")]
        trace_publication(&published);

        published
    }

    async fn fetch_symbol(&self, plan: SymbolPlan) -> Settled {
        let SymbolPlan {
            symbol,
            points,
            summary,
        } = plan;
        let granularity = summary.granularity;
        let (page, buckets) =
            futures::future::join(self.call_points(points), self.call_summary(summary)).await;

        // A points failure is reported over a summary failure when both fail.
        let (page, buckets) = match (page, buckets) {
            (Ok(page), Ok(buckets)) => (page, buckets),
            (Err(e), _) => return Self::failed(symbol, Capability::SearchPoints, e),
            (_, Err(e)) => return Self::failed(symbol, Capability::Summarize, e),
        };

        let limit = self.cfg.search_size_limit;
        let mut warning = None;
        if page.is_truncated(limit) {
            let truncated = ScopeError::Truncated {
                symbol: symbol.clone(),
                limit,
                total: page.total,
            };
            #[cfg(feature = "tracing")]
            tracing::warn!(symbol = %symbol, limit, total = ?page.total, "point search truncated");
            match self.cfg.truncation {
                TruncationPolicy::Warn => warning = Some(truncated),
                _ => return (symbol, SymbolEntry::Failed(truncated), None),
            }
        }

        match merge_series(page.points, buckets, granularity) {
            Ok(series) => (symbol, SymbolEntry::Ready(series), warning),
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(symbol = %symbol, error = %e, "bucket key violates wire format");
                (symbol, SymbolEntry::Failed(e), None)
            }
        }
    }

    async fn call_points(&self, query: PointQuery) -> Result<PointPage, ScopeError> {
        let name = self.connector.name();
        let provider = self
            .connector
            .as_point_search_provider()
            .ok_or_else(|| ScopeError::unsupported(Capability::SearchPoints))?;
        Self::provider_call_with_timeout(
            name,
            Capability::SearchPoints,
            self.cfg.provider_timeout,
            provider.search_points(query),
        )
        .await
        .map_err(|e| tag_err(name, e))
    }

    async fn call_summary(&self, query: SummaryQuery) -> Result<Vec<BucketRecord>, ScopeError> {
        let name = self.connector.name();
        let provider = self
            .connector
            .as_summary_provider()
            .ok_or_else(|| ScopeError::unsupported(Capability::Summarize))?;
        Self::provider_call_with_timeout(
            name,
            Capability::Summarize,
            self.cfg.provider_timeout,
            provider.summarize(query),
        )
        .await
        .map_err(|e| tag_err(name, e))
    }

    fn failed(symbol: String, capability: Capability, source: ScopeError) -> Settled {
        #[cfg(feature = "tracing")]
        tracing::warn!(symbol = %symbol, %capability, error = %source, "symbol fetch failed");
        let marker = ScopeError::fetch_failure(symbol.clone(), capability, source);
        (symbol, SymbolEntry::Failed(marker), None)
    }
}

#[cfg(feature = "tracing")]
fn trace_publication(published: &Result<Arc<ResultMap>, ScopeError>) {
    match published {
        Ok(map) => tracing::debug!(
            generation = map.generation,
            ready = map.ready().count(),
            failed = map.failed().count(),
            "published result map"
        ),
        Err(e) => tracing::debug!(error = %e, "discarded stale result map"),
    }
}
