// Re-export helpers so tests can `use helpers::*;`
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use signalscope::{
    BucketRecord, FilterSelection, Granularity, PointPage, RawPoint, Scope, ScopeBuilder,
    ScopeError, SignalConnector, SignalKind,
};
pub use signalscope_mock::{DynamicMockConnector, DynamicMockController, MockBehavior, MockCall};

// ---------- Lightweight fixtures and helpers for tests ----------

/// Common symbol constants used across tests.
pub const XAU: &str = "XAUUSD";
pub const WTI: &str = "WTI";
pub const BRENT: &str = "BRENT";

/// Construct a UTC `DateTime` from components for readability in tests.
pub fn dt(y: i32, m: u32, d: u32, hh: u32, mm: u32, ss: u32) -> DateTime<Utc> {
    chrono::NaiveDate::from_ymd_opt(y, m, d)
        .expect("invalid date")
        .and_hms_opt(hh, mm, ss)
        .expect("invalid time components")
        .and_utc()
}

/// A November 2025 selection over `symbols`.
pub fn november(symbols: &[&str], granularity: Granularity) -> FilterSelection {
    FilterSelection::try_new(
        symbols,
        None,
        dt(2025, 11, 1, 0, 0, 0),
        dt(2025, 11, 30, 23, 59, 59),
        granularity,
    )
    .expect("valid test selection")
}

/// Point with only timestamp and signal set.
pub fn point(ts: DateTime<Utc>, signal: SignalKind) -> RawPoint {
    RawPoint::new(ts, None, signal)
}

/// A complete page of `n` hourly HOLD points starting at 2025-11-03.
pub fn page(n: u32) -> PointPage {
    let points = (0..n)
        .map(|i| point(dt(2025, 11, 3, 0, 0, 0) + chrono::Duration::hours(i.into()), SignalKind::Hold))
        .collect();
    PointPage::complete(points)
}

/// Bucket shorthand.
pub fn bucket(key: &str, buy: u64, sell: u64) -> BucketRecord {
    BucketRecord::new(key, buy, sell, 0)
}

/// Generic connector failure as a provider would raise it.
pub fn boom() -> ScopeError {
    ScopeError::connector("dyn", "boom")
}

/// Dynamic mock plus a builder already pointing at it.
pub fn dynamic() -> (ScopeBuilder, DynamicMockController) {
    let (mock, ctrl) = DynamicMockConnector::new_with_controller("dyn");
    (Scope::builder().connector(mock), ctrl)
}

/// Configure `symbol` to answer both calls successfully.
pub async fn healthy(ctrl: &DynamicMockController, symbol: &str, points: PointPage, buckets: Vec<BucketRecord>) {
    ctrl.set_points_behavior(symbol, MockBehavior::Return(points))
        .await;
    ctrl.set_summary_behavior(symbol, MockBehavior::Return(buckets))
        .await;
}

/// Static-fixture scope.
pub fn fixture_scope(timeout: Duration) -> Scope {
    let mock: Arc<dyn SignalConnector> = Arc::new(signalscope_mock::MockConnector::new());
    Scope::builder()
        .connector(mock)
        .provider_timeout(timeout)
        .build()
        .expect("scope")
}
