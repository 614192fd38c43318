//! Records exchanged with the backend and their normalized forms.

use core::fmt;
use core::str::FromStr;

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ScopeError;

/// Bucket width selector for volume aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// One bucket per UTC calendar day, keyed `YYYY-MM-DD`.
    #[default]
    Day,
    /// One bucket per ISO week, keyed `YYYY-Www`.
    Week,
    /// One bucket per calendar month, keyed `YYYY-MM`.
    Month,
}

impl Granularity {
    /// All granularities in ascending bucket width.
    pub const ALL: [Self; 3] = [Self::Day, Self::Week, Self::Month];

    /// Lowercase label used on the wire (`groupBy`) and in errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        }
    }

    /// Render the bucket key the backend emits for a point at `ts`.
    ///
    /// Weeks use the ISO week-numbering year and an unpadded week number,
    /// matching the backend's `$isoWeekYear`/`$isoWeek` concatenation.
    #[must_use]
    pub fn bucket_key(self, ts: DateTime<Utc>) -> String {
        match self {
            Self::Day => ts.format("%Y-%m-%d").to_string(),
            Self::Month => ts.format("%Y-%m").to_string(),
            Self::Week => {
                let iso = ts.iso_week();
                format!("{}-W{}", iso.year(), iso.week())
            }
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = ScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            other => Err(ScopeError::InvalidArg(format!(
                "unknown granularity '{other}' (expected day, week, or month)"
            ))),
        }
    }
}

/// Signal label attached to a raw point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalKind {
    /// Model suggests buying.
    Buy,
    /// Model suggests selling.
    Sell,
    /// Model suggests holding.
    Hold,
}

impl SignalKind {
    /// True for BUY and SELL, the labels a chart marks explicitly.
    #[must_use]
    pub const fn is_actionable(self) -> bool {
        matches!(self, Self::Buy | Self::Sell)
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
            Self::Hold => "HOLD",
        })
    }
}

/// Asset class of the instrument a point was produced for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AssetType {
    /// Gold (e.g. XAUUSD).
    Gold,
    /// Crude oil (e.g. WTI, BRENT).
    Oil,
    /// Silver (e.g. XAGUSD).
    Silver,
    /// Any asset class this crate does not name.
    #[serde(other)]
    Other,
}

/// One signal/price observation as produced by the backend search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPoint {
    /// Backend record identifier.
    #[serde(default)]
    pub id: Option<String>,
    /// Symbol the point belongs to.
    #[serde(default)]
    pub symbol: Option<String>,
    /// Model that produced the signal.
    #[serde(default)]
    pub model_name: Option<String>,
    /// Asset class, when recorded.
    #[serde(default)]
    pub asset_type: Option<AssetType>,
    /// BUY / SELL / HOLD.
    pub signal: SignalKind,
    /// Observed price; carried through untouched.
    #[serde(default)]
    pub price: Option<Decimal>,
    /// Model confidence in `[0, 1]`.
    #[serde(default)]
    pub confidence: Option<f64>,
    /// Observation time.
    pub ts: DateTime<Utc>,
}

impl RawPoint {
    /// Minimal point with only the fields the engine relies on.
    #[must_use]
    pub const fn new(ts: DateTime<Utc>, price: Option<Decimal>, signal: SignalKind) -> Self {
        Self {
            id: None,
            symbol: None,
            model_name: None,
            asset_type: None,
            signal,
            price,
            confidence: None,
            ts,
        }
    }
}

/// One aggregation bucket of signal counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketRecord {
    /// Bucket key; syntax depends on the requested granularity.
    pub bucket: String,
    /// BUY signals in the bucket.
    pub buy: u64,
    /// SELL signals in the bucket.
    pub sell: u64,
    /// HOLD signals in the bucket.
    #[serde(default)]
    pub hold: u64,
}

impl BucketRecord {
    /// Build a bucket from its key and counts.
    pub fn new(bucket: impl Into<String>, buy: u64, sell: u64, hold: u64) -> Self {
        Self {
            bucket: bucket.into(),
            buy,
            sell,
            hold,
        }
    }

    /// BUY minus SELL.
    #[must_use]
    pub fn net(&self) -> i128 {
        i128::from(self.buy) - i128::from(self.sell)
    }

    /// All signals in the bucket.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.buy
            .saturating_add(self.sell)
            .saturating_add(self.hold)
    }
}

/// A record paired with its resolved instant on the shared time axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalPoint<T> {
    /// Canonical UTC instant.
    pub at: DateTime<Utc>,
    /// The original record, unchanged.
    pub item: T,
}

impl<T> CanonicalPoint<T> {
    /// Pair `item` with `at`.
    pub const fn new(at: DateTime<Utc>, item: T) -> Self {
        Self { at, item }
    }

    /// Canonical instant as epoch milliseconds.
    #[must_use]
    pub fn epoch_millis(&self) -> i64 {
        self.at.timestamp_millis()
    }
}
