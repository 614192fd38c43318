use std::sync::Arc;
use std::time::Duration;

use crate::helpers::*;
use signalscope::{Scope, ScopeError, SignalConnector};

struct NoCatalog;

impl SignalConnector for NoCatalog {
    fn name(&self) -> &'static str {
        "no-catalog"
    }
}

#[tokio::test]
async fn fixture_catalog_is_sorted_and_deduplicated() {
    let scope = fixture_scope(Duration::from_secs(1));
    assert_eq!(
        scope.list_symbols().await.unwrap(),
        ["BRENT", "WTI", "XAGUSD", "XAUUSD"]
    );
    assert_eq!(scope.list_models().await.unwrap(), ["lstm-v2", "xgb-v1"]);
}

#[tokio::test]
async fn catalog_sort_ignores_case() {
    let (builder, ctrl) = dynamic();
    let scope = builder.build().unwrap();
    ctrl.set_models_behavior(MockBehavior::Return(vec![
        "xgb-v1".into(),
        "ARIMA".into(),
        "lstm-v2".into(),
    ]))
    .await;
    assert_eq!(
        scope.list_models().await.unwrap(),
        ["ARIMA", "lstm-v2", "xgb-v1"]
    );
}

#[tokio::test]
async fn catalog_errors_propagate() {
    let (builder, ctrl) = dynamic();
    let scope = builder.build().unwrap();
    ctrl.set_symbols_behavior(MockBehavior::Fail(boom())).await;
    assert_eq!(scope.list_symbols().await.unwrap_err(), boom());
}

#[tokio::test(start_paused = true)]
async fn catalog_calls_are_bounded_by_the_provider_timeout() {
    let (builder, ctrl) = dynamic();
    let scope = builder.provider_timeout(Duration::from_secs(1)).build().unwrap();
    ctrl.set_models_behavior(MockBehavior::Hang).await;
    assert_eq!(
        scope.list_models().await.unwrap_err(),
        ScopeError::provider_timeout("dyn", "list-models")
    );
}

#[tokio::test]
async fn connector_without_catalog_is_unsupported() {
    let scope = Scope::builder().connector(Arc::new(NoCatalog)).build().unwrap();
    assert_eq!(
        scope.list_symbols().await.unwrap_err(),
        ScopeError::unsupported("list-symbols")
    );
}
