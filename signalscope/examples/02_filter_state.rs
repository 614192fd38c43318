mod common;
use chrono::NaiveDate;
use signalscope::{FilterState, Granularity, Scope};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    common::init_tracing();
    let scope = Scope::builder().connector(common::get_connector()).build()?;

    let mut filters = FilterState::new(
        NaiveDate::from_ymd_opt(2025, 10, 27).ok_or("bad date")?,
        NaiveDate::from_ymd_opt(2025, 11, 12).ok_or("bad date")?,
    )?;
    filters.set_time_zone(chrono_tz::Europe::Istanbul)?;
    filters.set_available_symbols(scope.list_symbols().await?);
    filters.select_all();
    filters.remove_symbol("BRENT");
    if let Some(model) = scope.list_models().await?.first() {
        filters.set_model(Some(model.as_str()));
    }

    for granularity in Granularity::ALL {
        filters.set_granularity(granularity);
        let map = scope.fetch_all(&filters.snapshot()).await?;
        println!("generation {} ({granularity}):", map.generation);
        for (symbol, series) in map.ready() {
            let totals: u64 = series.volume.iter().map(|b| b.item.total()).sum();
            println!("  {symbol}: {} buckets, {totals} signals", series.volume.len());
        }
    }

    let combined = scope.aggregate_volume(&filters.snapshot()).await?;
    println!("all symbols, monthly: {} buckets", combined.len());

    Ok(())
}
