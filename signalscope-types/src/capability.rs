use core::fmt;
use serde::{Deserialize, Serialize};

/// High-level capability labels for routing, errors, and telemetry.
///
/// These map one-to-one with the backend operations a connector can expose and
/// allow consistent Display formatting in error messages and spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Capability {
    /// Raw signal/price points for one symbol.
    SearchPoints,
    /// Bucketed buy/sell/hold counts.
    Summarize,
    /// Distinct symbols known to the backend.
    ListSymbols,
    /// Distinct model names known to the backend.
    ListModels,
}

impl Capability {
    /// Stable kebab-case label used in errors and tracing fields.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SearchPoints => "search-points",
            Self::Summarize => "summarize",
            Self::ListSymbols => "list-symbols",
            Self::ListModels => "list-models",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Capability> for String {
    fn from(c: Capability) -> Self {
        c.as_str().to_string()
    }
}
