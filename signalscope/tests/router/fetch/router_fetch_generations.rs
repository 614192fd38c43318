use std::time::Duration;

use crate::helpers::*;
use signalscope::{Granularity, ScopeError};

#[tokio::test]
async fn sequential_fetches_fully_replace_the_map() {
    let (builder, ctrl) = dynamic();
    let scope = builder.build().unwrap();
    healthy(&ctrl, XAU, page(1), vec![]).await;
    healthy(&ctrl, WTI, page(2), vec![]).await;
    assert!(scope.current().is_none());

    let first = scope.fetch_all(&november(&[XAU, WTI], Granularity::Day)).await.unwrap();
    assert_eq!(first.generation, 1);
    let second = scope.fetch_all(&november(&[WTI], Granularity::Day)).await.unwrap();
    assert_eq!(second.generation, 2);

    let current = scope.current().expect("published");
    assert_eq!(current.generation, 2);
    assert_eq!(current.len(), 1);
    assert!(current.get(XAU).is_none());
    assert_eq!(current.selection, november(&[WTI], Granularity::Day));
}

#[tokio::test(start_paused = true)]
async fn slow_superseded_fetch_never_overwrites_newer_result() {
    let (builder, ctrl) = dynamic();
    let scope = builder.build().unwrap();
    ctrl.set_points_behavior(XAU, MockBehavior::Delayed(Duration::from_secs(5), page(1)))
        .await;
    ctrl.set_summary_behavior(XAU, MockBehavior::Return(vec![])).await;
    ctrl.set_points_behavior(WTI, MockBehavior::Delayed(Duration::from_secs(1), page(2)))
        .await;
    ctrl.set_summary_behavior(WTI, MockBehavior::Return(vec![])).await;

    let s1 = november(&[XAU], Granularity::Day);
    let s2 = november(&[WTI], Granularity::Day);
    let (r1, r2) = tokio::join!(scope.fetch_all(&s1), scope.fetch_all(&s2));

    assert_eq!(
        r1.unwrap_err(),
        ScopeError::StaleGeneration {
            generation: 1,
            latest: 2
        }
    );
    let r2 = r2.unwrap();
    assert_eq!(r2.generation, 2);
    let current = scope.current().unwrap();
    assert_eq!(current.selection, s2);
    assert!(current.series(WTI).is_some());
}

#[tokio::test(start_paused = true)]
async fn fast_superseded_fetch_publishes_nothing() {
    let (builder, ctrl) = dynamic();
    let scope = builder.build().unwrap();
    ctrl.set_points_behavior(XAU, MockBehavior::Delayed(Duration::from_secs(1), page(1)))
        .await;
    ctrl.set_summary_behavior(XAU, MockBehavior::Return(vec![])).await;
    ctrl.set_points_behavior(WTI, MockBehavior::Delayed(Duration::from_secs(5), page(2)))
        .await;
    ctrl.set_summary_behavior(WTI, MockBehavior::Return(vec![])).await;

    let mut rx = scope.subscribe();
    let s1 = november(&[XAU], Granularity::Day);
    let s2 = november(&[WTI], Granularity::Day);
    let (r1, r2) = tokio::join!(scope.fetch_all(&s1), scope.fetch_all(&s2));

    let stale = r1.unwrap_err();
    assert!(!stale.is_actionable());
    assert_eq!(r2.unwrap().generation, 2);

    // Only one publication happened, and it was the newer selection.
    assert!(rx.has_changed().unwrap());
    let seen = rx.borrow_and_update().clone().unwrap();
    assert_eq!(seen.selection, s2);
    assert_eq!(scope.latest_generation(), 2);
}

#[tokio::test]
async fn subscribers_observe_each_publication() {
    let (builder, ctrl) = dynamic();
    let scope = builder.build().unwrap();
    healthy(&ctrl, BRENT, page(1), vec![bucket("2025-11", 1, 0)]).await;

    let mut rx = scope.subscribe();
    assert!(rx.borrow().is_none());
    scope.fetch_all(&november(&[BRENT], Granularity::Month)).await.unwrap();
    rx.changed().await.unwrap();
    let map = rx.borrow_and_update().clone().unwrap();
    assert_eq!(map.generation, 1);
    assert_eq!(map.series(BRENT).unwrap().volume.len(), 1);
}
