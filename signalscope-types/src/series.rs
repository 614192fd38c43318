//! Chart-ready per-symbol series.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{BucketRecord, CanonicalPoint, Granularity, RawPoint};

/// Price/signal points and volume buckets for one symbol, each sorted ascending.
///
/// The two sequences share a time axis but are not joined row-by-row; they
/// generally differ in cardinality and alignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolSeries {
    /// Granularity the volume buckets were produced with.
    pub granularity: Granularity,
    /// Raw points at their native timestamps.
    pub prices: Vec<CanonicalPoint<RawPoint>>,
    /// Volume buckets at their normalized bucket instants.
    pub volume: Vec<CanonicalPoint<BucketRecord>>,
}

impl SymbolSeries {
    /// True when neither points nor buckets were returned for the range.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty() && self.volume.is_empty()
    }

    /// BUY and SELL points in time order; HOLD points are skipped.
    pub fn signal_markers(&self) -> impl Iterator<Item = &CanonicalPoint<RawPoint>> + '_ {
        self.prices.iter().filter(|p| p.item.signal.is_actionable())
    }

    /// Volume bucket whose canonical instant is exactly `at`, if any.
    ///
    /// When several buckets share the instant the first in series order wins.
    #[must_use]
    pub fn volume_at(&self, at: DateTime<Utc>) -> Option<&BucketRecord> {
        let idx = self.volume.partition_point(|b| b.at < at);
        self.volume
            .get(idx)
            .filter(|b| b.at == at)
            .map(|b| &b.item)
    }

    /// Earliest and latest instant across both sequences.
    #[must_use]
    pub fn span(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let firsts = [self.prices.first().map(|p| p.at), self.volume.first().map(|v| v.at)];
        let lasts = [self.prices.last().map(|p| p.at), self.volume.last().map(|v| v.at)];
        let start = firsts.into_iter().flatten().min()?;
        let end = lasts.into_iter().flatten().max()?;
        Some((start, end))
    }
}
