mod common;
use chrono::NaiveDate;
use signalscope::{FilterSelection, Granularity, Scope, Tz};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    common::init_tracing();
    let scope = Scope::builder().connector(common::get_connector()).build()?;

    let symbols = scope.list_symbols().await?;
    println!("symbols: {}", symbols.join(", "));

    let selection = FilterSelection::from_local_dates(
        &symbols,
        None,
        NaiveDate::from_ymd_opt(2025, 11, 1).ok_or("bad date")?,
        NaiveDate::from_ymd_opt(2025, 11, 30).ok_or("bad date")?,
        Tz::UTC,
        Granularity::Week,
    )?;
    let map = scope.fetch_all(&selection).await?;

    for (symbol, series) in map.ready() {
        println!(
            "{symbol}: {} points ({} signals), {} weekly buckets",
            series.prices.len(),
            series.signal_markers().count(),
            series.volume.len()
        );
        for b in &series.volume {
            println!(
                "    {} @ {}  buy={} sell={} hold={}",
                b.item.bucket,
                b.at.format("%Y-%m-%d"),
                b.item.buy,
                b.item.sell,
                b.item.hold
            );
        }
    }

    if map.failed().next().is_some() {
        eprintln!("failures:");
        for (symbol, err) in map.failed() {
            eprintln!("- {symbol}: {err}");
        }
    }
    for w in &map.warnings {
        eprintln!("warning: {w}");
    }

    Ok(())
}
