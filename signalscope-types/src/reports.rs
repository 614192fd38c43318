//! Report envelopes produced by the orchestrator.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::ScopeError;
use crate::selection::FilterSelection;
use crate::series::SymbolSeries;

/// Outcome for one symbol: a merged series or the failure marker that replaced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "lowercase")]
pub enum SymbolEntry {
    /// Both fetches succeeded and merged cleanly.
    Ready(SymbolSeries),
    /// A fetch or the merge failed; no partial series is kept.
    Failed(ScopeError),
}

impl SymbolEntry {
    /// The merged series, if ready.
    #[must_use]
    pub const fn series(&self) -> Option<&SymbolSeries> {
        match self {
            Self::Ready(s) => Some(s),
            Self::Failed(_) => None,
        }
    }

    /// The failure marker, if failed.
    #[must_use]
    pub const fn failure(&self) -> Option<&ScopeError> {
        match self {
            Self::Ready(_) => None,
            Self::Failed(e) => Some(e),
        }
    }
}

/// Per-symbol results of one fetch generation.
///
/// Built once after every call of the generation has settled and published as a
/// whole; it is never updated in place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultMap {
    /// Fetch generation that produced this map.
    pub generation: u64,
    /// Selection the map was built from.
    pub selection: FilterSelection,
    /// One entry per selected symbol.
    pub entries: BTreeMap<String, SymbolEntry>,
    /// Non-fatal issues encountered while building the map.
    pub warnings: Vec<ScopeError>,
}

impl ResultMap {
    /// Entry for `symbol`.
    #[must_use]
    pub fn get(&self, symbol: &str) -> Option<&SymbolEntry> {
        self.entries.get(symbol)
    }

    /// Merged series for `symbol`, if it succeeded.
    #[must_use]
    pub fn series(&self, symbol: &str) -> Option<&SymbolSeries> {
        self.get(symbol).and_then(SymbolEntry::series)
    }

    /// Failure marker for `symbol`, if it failed.
    #[must_use]
    pub fn failure(&self, symbol: &str) -> Option<&ScopeError> {
        self.get(symbol).and_then(SymbolEntry::failure)
    }

    /// Symbols whose series are ready, with their series.
    pub fn ready(&self) -> impl Iterator<Item = (&str, &SymbolSeries)> + '_ {
        self.entries
            .iter()
            .filter_map(|(s, e)| e.series().map(|series| (s.as_str(), series)))
    }

    /// Symbols that failed, with their markers.
    pub fn failed(&self) -> impl Iterator<Item = (&str, &ScopeError)> + '_ {
        self.entries
            .iter()
            .filter_map(|(s, e)| e.failure().map(|err| (s.as_str(), err)))
    }

    /// Failures caused by the backend breaking the bucket-key wire format.
    ///
    /// These point at a backend change rather than a transient condition and
    /// are worth surfacing beyond the per-symbol error state.
    pub fn contract_violations(&self) -> impl Iterator<Item = (&str, &ScopeError)> + '_ {
        self.failed().filter(|(_, e)| e.is_contract_violation())
    }

    /// Number of symbols in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the map holds no symbols.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
