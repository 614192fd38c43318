use signalscope_core::{Capability, ScopeError};

use crate::Scope;
use crate::core::tag_err;

impl Scope {
    /// Symbols known to the backend, de-duplicated and sorted case-insensitively.
    ///
    /// # Errors
    /// Returns `Unsupported` when the connector has no catalog, or the tagged
    /// connector error (including `ProviderTimeout`) when the call fails.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "signalscope::router::list_symbols", skip(self))
    )]
    pub async fn list_symbols(&self) -> Result<Vec<String>, ScopeError> {
        self.catalog(Capability::ListSymbols).await
    }

    /// Model names known to the backend, de-duplicated and sorted case-insensitively.
    ///
    /// # Errors
    /// Same as [`list_symbols`](Self::list_symbols).
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "signalscope::router::list_models", skip(self))
    )]
    pub async fn list_models(&self) -> Result<Vec<String>, ScopeError> {
        self.catalog(Capability::ListModels).await
    }

    async fn catalog(&self, capability: Capability) -> Result<Vec<String>, ScopeError> {
        let name = self.connector.name();
        let provider = self
            .connector
            .as_catalog_provider()
            .ok_or_else(|| ScopeError::unsupported(capability))?;
        let timeout = self.cfg.provider_timeout;
        let raw = match capability {
            Capability::ListModels => {
                Self::provider_call_with_timeout(name, capability, timeout, provider.list_models())
                    .await
            }
            _ => {
                Self::provider_call_with_timeout(name, capability, timeout, provider.list_symbols())
                    .await
            }
        }
        .map_err(|e| tag_err(name, e))?;
        Ok(tidy(raw))
    }
}

// Trim, drop blanks, sort case-insensitively (exact text breaks ties), dedup exact repeats.
fn tidy(raw: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = raw
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    out.sort_by(|a, b| {
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b))
    });
    out.dedup();
    out
}
