use crate::helpers::*;
use signalscope::{Granularity, PointPage, ScopeError, SignalKind};

#[tokio::test]
async fn malformed_key_fails_only_that_symbol_and_is_reported() {
    let (builder, ctrl) = dynamic();
    let scope = builder.build().unwrap();
    healthy(&ctrl, XAU, page(2), vec![bucket("2025-11", 1, 0)]).await;
    healthy(
        &ctrl,
        WTI,
        page(2),
        vec![bucket("2025-11", 1, 0), bucket("2025-13", 2, 0)],
    )
    .await;

    let map = scope.fetch_all(&november(&[XAU, WTI], Granularity::Month)).await.unwrap();

    assert!(map.series(XAU).is_some());
    assert_eq!(
        map.failure(WTI),
        Some(&ScopeError::malformed_bucket_key("month", "2025-13"))
    );
    let violations: Vec<_> = map.contract_violations().map(|(s, _)| s).collect();
    assert_eq!(violations, [WTI]);
}

#[tokio::test]
async fn series_come_back_sorted_on_one_axis() {
    let (builder, ctrl) = dynamic();
    let scope = builder.build().unwrap();
    let points = vec![
        point(dt(2025, 11, 12, 9, 0, 0), SignalKind::Sell),
        point(dt(2025, 11, 3, 9, 0, 0), SignalKind::Buy),
        point(dt(2025, 11, 3, 9, 0, 0), SignalKind::Hold),
    ];
    healthy(
        &ctrl,
        XAU,
        PointPage::complete(points),
        vec![bucket("2025-W46", 1, 1), bucket("2025-W5", 0, 0), bucket("2025-W45", 2, 0)],
    )
    .await;

    let map = scope.fetch_all(&november(&[XAU], Granularity::Week)).await.unwrap();
    let series = map.series(XAU).unwrap();

    let signals: Vec<_> = series.prices.iter().map(|p| p.item.signal).collect();
    assert_eq!(signals, [SignalKind::Buy, SignalKind::Hold, SignalKind::Sell]);
    assert_eq!(series.signal_markers().count(), 2);

    let keys: Vec<_> = series.volume.iter().map(|b| b.item.bucket.as_str()).collect();
    assert_eq!(keys, ["2025-W5", "2025-W45", "2025-W46"]);
    // 2025-W45 sits at January 1 plus 44 weeks.
    assert_eq!(series.volume[1].at, dt(2025, 11, 5, 0, 0, 0));
    assert_eq!(series.volume_at(dt(2025, 11, 5, 0, 0, 0)).unwrap().buy, 2);
}
