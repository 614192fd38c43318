use std::time::Duration;

use crate::helpers::*;
use signalscope::{Granularity, PointPage, ScopeError, SymbolEntry};

#[tokio::test]
async fn failing_symbol_does_not_affect_others() {
    let (builder, ctrl) = dynamic();
    let scope = builder.build().unwrap();
    healthy(&ctrl, XAU, page(3), vec![bucket("2025-11-03", 2, 1)]).await;
    ctrl.set_points_behavior(WTI, MockBehavior::Fail(boom())).await;
    ctrl.set_summary_behavior(WTI, MockBehavior::Return(vec![bucket("2025-11-03", 1, 1)]))
        .await;

    let map = scope.fetch_all(&november(&[XAU, WTI], Granularity::Day)).await.unwrap();

    assert_eq!(map.len(), 2);
    let xau = map.series(XAU).expect("XAUUSD ready");
    assert_eq!(xau.prices.len(), 3);
    assert_eq!(xau.volume.len(), 1);

    match map.failure(WTI) {
        Some(ScopeError::FetchFailure {
            symbol,
            capability,
            source,
        }) => {
            assert_eq!(symbol, WTI);
            assert_eq!(capability, "search-points");
            assert_eq!(**source, boom());
        }
        other => panic!("unexpected entry for WTI: {other:?}"),
    }
    assert!(map.series(WTI).is_none());
}

#[tokio::test(start_paused = true)]
async fn isolation_holds_in_either_resolution_order() {
    // Failure settles first.
    let (builder, ctrl) = dynamic();
    let scope = builder.build().unwrap();
    ctrl.set_points_behavior(XAU, MockBehavior::Delayed(Duration::from_secs(3), page(2)))
        .await;
    ctrl.set_summary_behavior(XAU, MockBehavior::Return(vec![])).await;
    ctrl.set_points_behavior(WTI, MockBehavior::Fail(boom())).await;
    ctrl.set_summary_behavior(WTI, MockBehavior::Return(vec![])).await;
    let fail_first = scope.fetch_all(&november(&[XAU, WTI], Granularity::Day)).await.unwrap();

    // Success settles first.
    let (builder, ctrl) = dynamic();
    let scope = builder.build().unwrap();
    healthy(&ctrl, XAU, page(2), vec![]).await;
    ctrl.set_points_behavior(WTI, MockBehavior::FailAfter(Duration::from_secs(3), boom()))
        .await;
    ctrl.set_summary_behavior(WTI, MockBehavior::Return(vec![])).await;
    let ok_first = scope.fetch_all(&november(&[XAU, WTI], Granularity::Day)).await.unwrap();

    assert_eq!(fail_first.entries, ok_first.entries);
    assert!(matches!(ok_first.get(XAU), Some(SymbolEntry::Ready(_))));
    assert!(matches!(ok_first.get(WTI), Some(SymbolEntry::Failed(_))));
}

#[tokio::test]
async fn summary_failure_discards_the_points_too() {
    let (builder, ctrl) = dynamic();
    let scope = builder.build().unwrap();
    ctrl.set_points_behavior(BRENT, MockBehavior::Return(page(4))).await;
    ctrl.set_summary_behavior(BRENT, MockBehavior::Fail(ScopeError::not_found("summary")))
        .await;

    let map = scope.fetch_all(&november(&[BRENT], Granularity::Week)).await.unwrap();
    let err = map.failure(BRENT).expect("BRENT failed");
    assert!(matches!(
        err,
        ScopeError::FetchFailure { capability, .. } if capability == "summarize"
    ));
    assert!(!err.is_actionable());
    assert_eq!(map.ready().count(), 0);
}

#[tokio::test]
async fn points_failure_wins_when_both_calls_fail() {
    let (builder, ctrl) = dynamic();
    let scope = builder.build().unwrap();
    ctrl.set_points_behavior(XAU, MockBehavior::Fail(boom())).await;
    ctrl.set_summary_behavior(XAU, MockBehavior::Fail(boom())).await;

    let map = scope.fetch_all(&november(&[XAU], Granularity::Day)).await.unwrap();
    assert!(matches!(
        map.failure(XAU),
        Some(ScopeError::FetchFailure { capability, .. }) if capability == "search-points"
    ));
}

#[tokio::test]
async fn untagged_provider_errors_get_the_connector_name() {
    let (builder, ctrl) = dynamic();
    let scope = builder.build().unwrap();
    ctrl.set_points_behavior(XAU, MockBehavior::Fail(ScopeError::Other("socket closed".into())))
        .await;
    ctrl.set_summary_behavior(XAU, MockBehavior::Return(vec![])).await;

    let map = scope.fetch_all(&november(&[XAU], Granularity::Day)).await.unwrap();
    let root = map.failure(XAU).unwrap().root_cause();
    assert_eq!(
        root,
        &ScopeError::connector("dyn", "unknown error: socket closed")
    );
}

#[tokio::test]
async fn empty_data_is_not_a_failure() {
    let (builder, ctrl) = dynamic();
    let scope = builder.build().unwrap();
    healthy(&ctrl, XAU, PointPage::default(), vec![]).await;

    let map = scope.fetch_all(&november(&[XAU], Granularity::Month)).await.unwrap();
    let series = map.series(XAU).expect("empty series is still ready");
    assert!(series.is_empty());
    assert_eq!(series.granularity, Granularity::Month);
    assert_eq!(map.failed().count(), 0);
}
