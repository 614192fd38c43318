use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use signalscope_core::{AssetType, RawPoint, SignalKind};

use SignalKind::{Buy, Hold, Sell};

// (timestamp, price, signal, model, confidence)
type Row = (&'static str, &'static str, SignalKind, &'static str, f64);

const XAUUSD: &[Row] = &[
    ("2025-10-30T09:00:00Z", "4001.20", Buy, "lstm-v2", 0.71),
    ("2025-10-31T09:00:00Z", "4012.85", Hold, "lstm-v2", 0.55),
    ("2025-11-03T09:00:00Z", "3998.10", Sell, "xgb-v1", 0.64),
    ("2025-11-03T15:30:00Z", "4004.40", Buy, "lstm-v2", 0.69),
    ("2025-11-04T09:00:00Z", "3979.00", Sell, "lstm-v2", 0.81),
    ("2025-11-05T09:00:00Z", "3984.25", Hold, "xgb-v1", 0.52),
    ("2025-11-06T09:00:00Z", "4002.60", Buy, "xgb-v1", 0.77),
    ("2025-11-10T09:00:00Z", "4065.30", Buy, "lstm-v2", 0.88),
];

const XAGUSD: &[Row] = &[
    ("2025-10-30T09:00:00Z", "48.72", Hold, "lstm-v2", 0.50),
    ("2025-11-03T09:00:00Z", "48.11", Sell, "lstm-v2", 0.62),
    ("2025-11-04T09:00:00Z", "47.35", Sell, "xgb-v1", 0.73),
    ("2025-11-06T09:00:00Z", "48.04", Buy, "lstm-v2", 0.58),
    ("2025-11-11T09:00:00Z", "50.62", Buy, "xgb-v1", 0.84),
];

const WTI: &[Row] = &[
    ("2025-10-31T14:00:00Z", "60.98", Sell, "xgb-v1", 0.66),
    ("2025-11-03T14:00:00Z", "61.05", Hold, "xgb-v1", 0.51),
    ("2025-11-04T14:00:00Z", "60.56", Sell, "lstm-v2", 0.70),
    ("2025-11-05T14:00:00Z", "59.60", Sell, "xgb-v1", 0.79),
    ("2025-11-07T14:00:00Z", "59.75", Buy, "lstm-v2", 0.57),
    ("2025-11-12T14:00:00Z", "58.49", Hold, "lstm-v2", 0.49),
];

const BRENT: &[Row] = &[
    ("2025-10-31T14:00:00Z", "65.07", Sell, "xgb-v1", 0.63),
    ("2025-11-03T14:00:00Z", "64.89", Hold, "lstm-v2", 0.53),
    ("2025-11-05T14:00:00Z", "63.52", Sell, "lstm-v2", 0.75),
    ("2025-11-07T14:00:00Z", "63.63", Buy, "xgb-v1", 0.60),
];

/// Symbols with fixture data, in the order the mock lists them.
pub const SYMBOLS: [&str; 4] = ["XAUUSD", "XAGUSD", "WTI", "BRENT"];

pub fn by_symbol(s: &str) -> Option<Vec<RawPoint>> {
    let (asset, rows) = match s {
        "XAUUSD" => (AssetType::Gold, XAUUSD),
        "XAGUSD" => (AssetType::Silver, XAGUSD),
        "WTI" => (AssetType::Oil, WTI),
        "BRENT" => (AssetType::Oil, BRENT),
        _ => return None,
    };
    Some(build(s, asset, rows))
}

fn build(symbol: &str, asset: AssetType, rows: &[Row]) -> Vec<RawPoint> {
    rows.iter()
        .enumerate()
        .map(|(i, &(ts, price, signal, model, confidence))| {
            let ts: DateTime<Utc> = ts.parse().unwrap();
            let price: Decimal = price.parse().unwrap();
            let mut p = RawPoint::new(ts, Some(price), signal);
            p.id = Some(format!("{symbol}-{i}"));
            p.symbol = Some(symbol.to_string());
            p.model_name = Some(model.to_string());
            p.asset_type = Some(asset);
            p.confidence = Some(confidence);
            p
        })
        .collect()
}
