//! Request descriptors handed to connectors and the page envelope they return.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Granularity, RawPoint};

/// Raw point search for one symbol over an inclusive time range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointQuery {
    /// Symbol to search.
    pub symbol: String,
    /// Model filter; `None` matches all models.
    pub model: Option<String>,
    /// Inclusive start.
    pub from: DateTime<Utc>,
    /// Inclusive end.
    pub to: DateTime<Utc>,
    /// Maximum number of points the backend should return.
    pub size_limit: u32,
}

/// Bucketed signal counts over an inclusive time range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryQuery {
    /// Symbol filter; `None` aggregates all symbols.
    pub symbol: Option<String>,
    /// Model filter; `None` matches all models.
    pub model: Option<String>,
    /// Inclusive start.
    pub from: DateTime<Utc>,
    /// Inclusive end.
    pub to: DateTime<Utc>,
    /// Bucket width.
    pub granularity: Granularity,
}

/// Points returned by a search, with the backend's total match count when known.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PointPage {
    /// Returned points, in backend order.
    pub points: Vec<RawPoint>,
    /// Total number of matching points on the backend.
    pub total: Option<u64>,
}

impl PointPage {
    /// Page whose total equals its length.
    #[must_use]
    pub fn complete(points: Vec<RawPoint>) -> Self {
        let total = u64::try_from(points.len()).ok();
        Self { points, total }
    }

    /// Whether the page is missing points that exist on the backend.
    ///
    /// With a known total this compares it to the returned count; without one,
    /// a page that filled the whole `limit` is assumed truncated.
    #[must_use]
    pub fn is_truncated(&self, limit: u32) -> bool {
        let returned = u64::try_from(self.points.len()).unwrap_or(u64::MAX);
        self.total
            .map_or(returned >= u64::from(limit), |total| total > returned)
    }
}
