use std::time::Duration;

use crate::helpers::*;
use signalscope::{Granularity, Scope, ScopeError};

#[tokio::test(start_paused = true)]
async fn hanging_call_times_out_only_its_symbol() {
    let (builder, ctrl) = dynamic();
    let scope = builder.provider_timeout(Duration::from_secs(2)).build().unwrap();
    healthy(&ctrl, XAU, page(1), vec![]).await;
    ctrl.set_points_behavior(WTI, MockBehavior::Return(page(1))).await;
    ctrl.set_summary_behavior(WTI, MockBehavior::Hang).await;

    let start = tokio::time::Instant::now();
    let map = scope.fetch_all(&november(&[XAU, WTI], Granularity::Day)).await.unwrap();
    assert!(start.elapsed() >= Duration::from_secs(2));

    assert!(map.series(XAU).is_some());
    let err = map.failure(WTI).expect("WTI timed out");
    assert_eq!(
        err.root_cause(),
        &ScopeError::provider_timeout("dyn", "summarize")
    );
}

#[tokio::test(start_paused = true)]
async fn reserved_timeout_symbol_trips_a_short_timeout() {
    let scope = fixture_scope(Duration::from_millis(50));
    let map = scope.fetch_all(&november(&["TIMEOUT", XAU], Granularity::Day)).await.unwrap();
    assert!(matches!(
        map.failure("TIMEOUT").map(ScopeError::root_cause),
        Some(ScopeError::ProviderTimeout { .. })
    ));
    assert!(map.series(XAU).is_some());
}

#[test]
fn default_timeout_is_ten_seconds() {
    let (builder, _ctrl) = dynamic();
    let scope = builder.build().unwrap();
    assert_eq!(scope.config().provider_timeout, Duration::from_secs(10));
    assert_eq!(scope.connector_name(), "dyn");
}

#[test]
fn building_without_a_connector_fails() {
    assert!(matches!(Scope::builder().build(), Err(ScopeError::InvalidArg(_))));
}
