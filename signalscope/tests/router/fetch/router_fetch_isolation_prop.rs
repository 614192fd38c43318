use std::time::Duration;

use proptest::prelude::*;

use crate::helpers::*;
use signalscope::{Granularity, SymbolEntry};

const SYMBOLS: [&str; 4] = ["BRENT", "WTI", "XAGUSD", "XAUUSD"];

#[derive(Clone, Debug)]
enum Outcome {
    Ok { delay_ms: u16 },
    PointsFail { delay_ms: u16 },
    SummaryFail,
    Hang,
}

fn arb_outcome() -> impl Strategy<Value = Outcome> {
    prop_oneof![
        (0u16..500).prop_map(|delay_ms| Outcome::Ok { delay_ms }),
        (0u16..500).prop_map(|delay_ms| Outcome::PointsFail { delay_ms }),
        Just(Outcome::SummaryFail),
        Just(Outcome::Hang),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 40, .. ProptestConfig::default() })]
    #[test]
    fn each_symbol_settles_on_its_own_outcome(outcomes in proptest::collection::vec(arb_outcome(), 4)) {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .start_paused(true)
            .build()
            .expect("runtime");
        rt.block_on(async move {
            let (builder, ctrl) = dynamic();
            let scope = builder
                .provider_timeout(Duration::from_secs(1))
                .build()
                .expect("scope");

            for (symbol, outcome) in SYMBOLS.iter().zip(&outcomes) {
                match outcome {
                    Outcome::Ok { delay_ms } => {
                        let delay = Duration::from_millis((*delay_ms).into());
                        ctrl.set_points_behavior(symbol, MockBehavior::Delayed(delay, page(2))).await;
                        ctrl.set_summary_behavior(symbol, MockBehavior::Return(vec![bucket("2025-11-03", 1, 0)])).await;
                    }
                    Outcome::PointsFail { delay_ms } => {
                        let delay = Duration::from_millis((*delay_ms).into());
                        ctrl.set_points_behavior(symbol, MockBehavior::FailAfter(delay, boom())).await;
                        ctrl.set_summary_behavior(symbol, MockBehavior::Return(vec![])).await;
                    }
                    Outcome::SummaryFail => {
                        ctrl.set_points_behavior(symbol, MockBehavior::Return(page(1))).await;
                        ctrl.set_summary_behavior(symbol, MockBehavior::Fail(boom())).await;
                    }
                    Outcome::Hang => {
                        ctrl.set_points_behavior(symbol, MockBehavior::Return(page(1))).await;
                        ctrl.set_summary_behavior(symbol, MockBehavior::Hang).await;
                    }
                }
            }

            let map = scope
                .fetch_all(&november(&SYMBOLS, Granularity::Day))
                .await
                .expect("published");

            assert_eq!(map.len(), SYMBOLS.len());
            for (symbol, outcome) in SYMBOLS.iter().zip(&outcomes) {
                match (outcome, map.get(symbol)) {
                    (Outcome::Ok { .. }, Some(SymbolEntry::Ready(series))) => {
                        assert_eq!(series.prices.len(), 2);
                        assert_eq!(series.volume.len(), 1);
                    }
                    (Outcome::Ok { .. }, other) => panic!("{symbol} should be ready: {other:?}"),
                    (_, Some(SymbolEntry::Failed(_))) => {}
                    (_, other) => panic!("{symbol} should have failed: {other:?}"),
                }
            }
        });
    }
}
