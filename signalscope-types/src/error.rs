use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the signalscope workspace.
///
/// This wraps capability mismatches, argument validation errors, connector-tagged
/// failures, bucket-key contract violations, and the per-symbol failure markers
/// recorded by the orchestrator.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScopeError {
    /// The requested capability is not implemented by the target connector.
    #[error("unsupported capability: {capability}")]
    Unsupported {
        /// A capability string describing what was requested (e.g. "search-points").
        capability: String,
    },

    /// Issues with the returned or expected data (missing fields, undecodable payloads).
    #[error("data issue: {0}")]
    Data(String),

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// An individual connector returned an error.
    #[error("{connector} failed: {msg}")]
    Connector {
        /// Connector name that failed.
        connector: String,
        /// Human-readable error message.
        msg: String,
    },

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),

    /// A resource could not be found on the backend.
    #[error("not found: {what}")]
    NotFound {
        /// Description of missing resource, e.g. "points for XAUUSD".
        what: String,
    },

    /// An individual connector call exceeded the configured timeout.
    #[error("provider timed out: {capability} via {connector}")]
    ProviderTimeout {
        /// Connector name that timed out.
        connector: String,
        /// Capability label (e.g. "search-points", "summarize").
        capability: String,
    },

    /// A bucket key does not match the wire format of its granularity.
    #[error("malformed {granularity} bucket key: {key:?}")]
    MalformedBucketKey {
        /// Granularity the key was parsed under ("day", "week", "month").
        granularity: String,
        /// The offending key as received.
        key: String,
    },

    /// A fetch was requested with no symbols selected.
    #[error("empty selection: at least one symbol is required")]
    EmptySelection,

    /// One of a symbol's backend calls failed; isolated to that symbol.
    #[error("fetch failed for {symbol} ({capability}): {source}")]
    FetchFailure {
        /// Symbol whose fetch failed.
        symbol: String,
        /// Capability label of the failing call.
        capability: String,
        /// Underlying transport or backend error.
        source: Box<ScopeError>,
    },

    /// The backend returned fewer points than exist for the requested range.
    #[error("points for {symbol} truncated at {limit} (backend total: {total:?})")]
    Truncated {
        /// Symbol whose point fetch was truncated.
        symbol: String,
        /// Size ceiling sent with the request.
        limit: u32,
        /// Total reported by the backend, when known.
        total: Option<u64>,
    },

    /// A completion belonging to a superseded fetch generation.
    #[error("fetch generation {generation} superseded by {latest}")]
    StaleGeneration {
        /// Generation of the call that completed late.
        generation: u64,
        /// Latest generation issued at completion time.
        latest: u64,
    },
}

impl ScopeError {
    /// Helper: build an `Unsupported` error for a capability string.
    #[must_use]
    pub fn unsupported(cap: impl Into<String>) -> Self {
        Self::Unsupported {
            capability: cap.into(),
        }
    }

    /// Helper: build a `Connector` error with the connector name and message.
    pub fn connector(connector: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Connector {
            connector: connector.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `NotFound` error for a description of the missing resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Helper: build a `ProviderTimeout` error.
    pub fn provider_timeout(connector: impl Into<String>, capability: impl Into<String>) -> Self {
        Self::ProviderTimeout {
            connector: connector.into(),
            capability: capability.into(),
        }
    }

    /// Helper: build a `MalformedBucketKey` error.
    pub fn malformed_bucket_key(granularity: impl Into<String>, key: impl Into<String>) -> Self {
        Self::MalformedBucketKey {
            granularity: granularity.into(),
            key: key.into(),
        }
    }

    /// Helper: wrap `source` as the failure marker of one symbol's call.
    pub fn fetch_failure(
        symbol: impl Into<String>,
        capability: impl Into<String>,
        source: Self,
    ) -> Self {
        Self::FetchFailure {
            symbol: symbol.into(),
            capability: capability.into(),
            source: Box::new(source),
        }
    }

    /// Returns true if this error should be surfaced to users as actionable.
    ///
    /// Stale generations are an expected outcome of rapid re-fetching and are
    /// dropped silently; capability absence and benign not-found conditions are
    /// likewise not actionable. Fetch failures are classified by their source.
    #[must_use]
    pub fn is_actionable(&self) -> bool {
        match self {
            Self::Unsupported { .. } | Self::NotFound { .. } | Self::StaleGeneration { .. } => {
                false
            }
            Self::FetchFailure { source, .. } => source.is_actionable(),
            _ => true,
        }
    }

    /// True when the error signals that the backend broke the bucket-key wire
    /// contract, either directly or as the source of a fetch failure.
    #[must_use]
    pub fn is_contract_violation(&self) -> bool {
        match self {
            Self::MalformedBucketKey { .. } => true,
            Self::FetchFailure { source, .. } => source.is_contract_violation(),
            _ => false,
        }
    }

    /// Peel `FetchFailure` wrappers and return the innermost cause.
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::FetchFailure { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
