use crate::timeseries::normalize::normalize;
use crate::{BucketRecord, CanonicalPoint, Granularity, RawPoint, ScopeError, SymbolSeries};

/// Build one symbol's chart-ready series from its raw points and volume buckets.
///
/// - Points keep their native timestamps and are sorted ascending.
/// - Buckets are placed with [`normalize`] and sorted ascending.
/// - Both sorts are stable: records sharing an instant keep their input order.
/// - The sequences are not joined; each keeps one entry per input record.
///
/// # Errors
/// Returns `ScopeError::MalformedBucketKey` if any bucket key fails to parse.
/// No partial series is produced in that case.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        level = "trace",
        skip(points, buckets),
        fields(points = points.len(), buckets = buckets.len(), %granularity),
    )
)]
pub fn merge_series(
    points: Vec<RawPoint>,
    buckets: Vec<BucketRecord>,
    granularity: Granularity,
) -> Result<SymbolSeries, ScopeError> {
    let volume = normalize_buckets(buckets, granularity)?;
    Ok(SymbolSeries {
        granularity,
        prices: sort_points(points),
        volume,
    })
}

/// Place every bucket on the time axis and sort them ascending (stable).
///
/// # Errors
/// Returns `ScopeError::MalformedBucketKey` on the first key that fails to parse.
pub fn normalize_buckets(
    buckets: Vec<BucketRecord>,
    granularity: Granularity,
) -> Result<Vec<CanonicalPoint<BucketRecord>>, ScopeError> {
    let mut out = buckets
        .into_iter()
        .map(|b| normalize(granularity, &b.bucket).map(|at| CanonicalPoint::new(at, b)))
        .collect::<Result<Vec<_>, _>>()?;
    out.sort_by_key(|p| p.at);
    Ok(out)
}

/// Pair points with their own timestamps and sort them ascending (stable).
#[must_use]
pub fn sort_points(points: Vec<RawPoint>) -> Vec<CanonicalPoint<RawPoint>> {
    let mut out: Vec<CanonicalPoint<RawPoint>> = points
        .into_iter()
        .map(|p| CanonicalPoint::new(p.ts, p))
        .collect();
    out.sort_by_key(|p| p.at);
    out
}
