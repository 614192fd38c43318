//! Request and response bodies of the `/api/signals` endpoints.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use signalscope_core::{Granularity, PointQuery, RawPoint, SummaryQuery};

/// Instants travel as RFC 3339 UTC strings with millisecond precision.
pub fn instant(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchBody<'a> {
    pub symbol: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_name: Option<&'a str>,
    pub from: String,
    pub to: String,
    pub page: u32,
    pub size: u32,
}

impl<'a> From<&'a PointQuery> for SearchBody<'a> {
    fn from(q: &'a PointQuery) -> Self {
        Self {
            symbol: &q.symbol,
            model_name: q.model.as_deref(),
            from: instant(q.from),
            to: instant(q.to),
            page: 0,
            size: q.size_limit,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_name: Option<&'a str>,
    pub from: String,
    pub to: String,
    pub group_by: Granularity,
}

impl<'a> From<&'a SummaryQuery> for SummaryBody<'a> {
    fn from(q: &'a SummaryQuery) -> Self {
        Self {
            symbol: q.symbol.as_deref(),
            model_name: q.model.as_deref(),
            from: instant(q.from),
            to: instant(q.to),
            group_by: q.granularity,
        }
    }
}

/// The subset of a Spring `Page` the connector reads.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    #[serde(default)]
    pub content: Vec<RawPoint>,
    #[serde(default)]
    pub total_elements: Option<u64>,
}
