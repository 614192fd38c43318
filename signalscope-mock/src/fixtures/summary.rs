use std::collections::BTreeMap;

use signalscope_core::{BucketRecord, Granularity, RawPoint, SignalKind};

/// Count points per bucket key, ordered by key text as the backend does.
pub fn aggregate<'a>(
    points: impl IntoIterator<Item = &'a RawPoint>,
    granularity: Granularity,
) -> Vec<BucketRecord> {
    let mut buckets: BTreeMap<String, BucketRecord> = BTreeMap::new();
    for p in points {
        let key = granularity.bucket_key(p.ts);
        let b = buckets
            .entry(key.clone())
            .or_insert_with(|| BucketRecord::new(key, 0, 0, 0));
        match p.signal {
            SignalKind::Buy => b.buy += 1,
            SignalKind::Sell => b.sell += 1,
            SignalKind::Hold => b.hold += 1,
        }
    }
    buckets.into_values().collect()
}
