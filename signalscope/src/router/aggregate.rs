use signalscope_core::{
    BucketRecord, CanonicalPoint, Capability, FilterSelection, ScopeError, SummaryQuery,
    normalize_buckets,
};

use crate::Scope;
use crate::core::tag_err;

impl Scope {
    /// Volume buckets for all symbols combined over the selection's range.
    ///
    /// The selection's symbols are ignored; its model, range, and granularity
    /// apply. Buckets come back normalized and sorted ascending. This does not
    /// start a fetch generation or touch the published result map.
    ///
    /// # Errors
    /// Returns the tagged connector error when the call fails, or
    /// `MalformedBucketKey` when a returned key breaks the wire format.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "signalscope::router::aggregate_volume",
            skip(self, selection),
            fields(granularity = %selection.granularity()),
        )
    )]
    pub async fn aggregate_volume(
        &self,
        selection: &FilterSelection,
    ) -> Result<Vec<CanonicalPoint<BucketRecord>>, ScopeError> {
        let name = self.connector.name();
        let provider = self
            .connector
            .as_summary_provider()
            .ok_or_else(|| ScopeError::unsupported(Capability::Summarize))?;
        let query = SummaryQuery {
            symbol: None,
            model: selection.model().map(str::to_string),
            from: selection.from(),
            to: selection.to(),
            granularity: selection.granularity(),
        };
        let buckets = Self::provider_call_with_timeout(
            name,
            Capability::Summarize,
            self.cfg.provider_timeout,
            provider.summarize(query),
        )
        .await
        .map_err(|e| tag_err(name, e))?;
        normalize_buckets(buckets, selection.granularity())
    }
}
