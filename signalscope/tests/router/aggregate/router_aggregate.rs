use std::time::Duration;

use crate::helpers::*;
use signalscope::{FilterSelection, Granularity, ScopeError};

#[tokio::test]
async fn aggregate_month_view_over_fixtures() {
    let scope = fixture_scope(Duration::from_secs(1));
    let buckets = scope
        .aggregate_volume(&november(&[], Granularity::Month))
        .await
        .unwrap();
    assert_eq!(buckets.len(), 1);
    assert_eq!(buckets[0].at, dt(2025, 11, 1, 0, 0, 0));
    assert_eq!(buckets[0].item.bucket, "2025-11");
    // Aggregation does not start a generation.
    assert_eq!(scope.latest_generation(), 0);
    assert!(scope.current().is_none());
}

#[tokio::test]
async fn aggregate_sends_no_symbol_and_sorts_buckets() {
    let (builder, ctrl) = dynamic();
    let scope = builder.build().unwrap();
    ctrl.set_aggregate_behavior(MockBehavior::Return(vec![
        bucket("2025-11-04", 3, 1),
        bucket("2025-11-02", 1, 0),
        bucket("2025-11-03", 0, 2),
    ]))
    .await;
    let selection = FilterSelection::try_new(
        [XAU],
        Some("xgb-v1"),
        dt(2025, 11, 1, 0, 0, 0),
        dt(2025, 11, 5, 0, 0, 0),
        Granularity::Day,
    )
    .unwrap();

    let buckets = scope.aggregate_volume(&selection).await.unwrap();
    let days: Vec<_> = buckets.iter().map(|b| b.item.bucket.as_str()).collect();
    assert_eq!(days, ["2025-11-02", "2025-11-03", "2025-11-04"]);
    assert_eq!(buckets[2].item.net(), 2);

    match ctrl.calls().await.as_slice() {
        [MockCall::Summarize(q)] => {
            assert_eq!(q.symbol, None);
            assert_eq!(q.model.as_deref(), Some("xgb-v1"));
            assert_eq!(q.granularity, Granularity::Day);
        }
        other => panic!("unexpected calls: {other:?}"),
    }
}

#[tokio::test]
async fn aggregate_rejects_malformed_keys() {
    let (builder, ctrl) = dynamic();
    let scope = builder.build().unwrap();
    ctrl.set_aggregate_behavior(MockBehavior::Return(vec![bucket("2025-W60", 1, 0)]))
        .await;
    let err = scope
        .aggregate_volume(&november(&[], Granularity::Week))
        .await
        .unwrap_err();
    assert!(err.is_contract_violation());
    assert!(matches!(err, ScopeError::MalformedBucketKey { .. }));
}
