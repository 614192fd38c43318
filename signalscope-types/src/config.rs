//! Configuration types shared by the orchestrator and connectors.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default ceiling on points requested per symbol in one fetch.
pub const DEFAULT_SEARCH_SIZE_LIMIT: u32 = 10_000;

/// What to do when a point fetch hits the size ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum TruncationPolicy {
    /// Mark the symbol as failed with `ScopeError::Truncated`.
    #[default]
    Fail,
    /// Keep the truncated series and record a warning on the result map.
    Warn,
}

/// Global configuration for the `Scope` orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScopeConfig {
    /// Size ceiling sent with each per-symbol point search.
    pub search_size_limit: u32,
    /// Reaction to a point search that reports more data than it returned.
    pub truncation: TruncationPolicy,
    /// Timeout for individual connector calls.
    pub provider_timeout: Duration,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            search_size_limit: DEFAULT_SEARCH_SIZE_LIMIT,
            truncation: TruncationPolicy::default(),
            provider_timeout: Duration::from_secs(10),
        }
    }
}
