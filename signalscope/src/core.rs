use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use signalscope_core::{
    Capability, ResultMap, ScopeConfig, ScopeError, SignalConnector, TruncationPolicy,
};
use tokio::sync::watch;

/// Orchestrator that fans selections out to a connector and publishes result maps.
pub struct Scope {
    pub(crate) connector: Arc<dyn SignalConnector>,
    pub(crate) cfg: ScopeConfig,
    generation: AtomicU64,
    published: watch::Sender<Option<Arc<ResultMap>>>,
}

/// Builder for constructing a `Scope` orchestrator with custom configuration.
pub struct ScopeBuilder {
    connector: Option<Arc<dyn SignalConnector>>,
    cfg: ScopeConfig,
}

impl Default for ScopeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeBuilder {
    /// Create a new builder with default configuration.
    ///
    /// Defaults: 10 000 points per symbol fetch, truncated fetches fail the
    /// symbol, 10s provider timeout. A connector must be set before [`build`](Self::build).
    #[must_use]
    pub fn new() -> Self {
        Self {
            connector: None,
            cfg: ScopeConfig::default(),
        }
    }

    /// Set the backend connector. A later call replaces an earlier one.
    #[must_use]
    pub fn connector(mut self, c: Arc<dyn SignalConnector>) -> Self {
        self.connector = Some(c);
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: ScopeConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Set the size ceiling sent with each per-symbol point search.
    ///
    /// Large ranges on a busy model can exceed it; see [`truncation_policy`](Self::truncation_policy)
    /// for what happens then.
    #[must_use]
    pub const fn search_size_limit(mut self, limit: u32) -> Self {
        self.cfg.search_size_limit = limit;
        self
    }

    /// Select how a point search that hit the size ceiling is treated.
    ///
    /// - `Fail`: the symbol gets a `Truncated` failure marker and no series.
    /// - `Warn`: the truncated series is kept and a warning is added to the result map.
    #[must_use]
    pub const fn truncation_policy(mut self, policy: TruncationPolicy) -> Self {
        self.cfg.truncation = policy;
        self
    }

    /// Set the per-call provider timeout.
    ///
    /// Each of a symbol's two calls is bounded separately; an expired call
    /// fails only its own symbol.
    #[must_use]
    pub const fn provider_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.provider_timeout = timeout;
        self
    }

    /// Build the `Scope` orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no connector was set or the size ceiling is zero.
    pub fn build(self) -> Result<Scope, ScopeError> {
        let Some(connector) = self.connector else {
            return Err(ScopeError::InvalidArg(
                "no connector set; add one via connector(...)".to_string(),
            ));
        };
        if self.cfg.search_size_limit == 0 {
            return Err(ScopeError::InvalidArg(
                "search_size_limit must be at least 1".to_string(),
            ));
        }
        let (published, _) = watch::channel(None);
        Ok(Scope {
            connector,
            cfg: self.cfg,
            generation: AtomicU64::new(0),
            published,
        })
    }
}

pub fn tag_err(connector: &str, e: ScopeError) -> ScopeError {
    match e {
        e @ (ScopeError::NotFound { .. }
        | ScopeError::ProviderTimeout { .. }
        | ScopeError::Connector { .. }
        | ScopeError::Unsupported { .. }
        | ScopeError::Data(_)) => e,
        other => ScopeError::Connector {
            connector: connector.to_string(),
            msg: other.to_string(),
        },
    }
}

impl Scope {
    /// Wrap a provider future with a timeout and standardized timeout error mapping.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "signalscope::core::provider_call_with_timeout",
            skip(fut),
            fields(
                connector = connector_name,
                capability = %capability,
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ),
        )
    )]
    pub(crate) async fn provider_call_with_timeout<T, Fut>(
        connector_name: &'static str,
        capability: Capability,
        timeout: Duration,
        fut: Fut,
    ) -> Result<T, ScopeError>
    where
        Fut: core::future::Future<Output = Result<T, ScopeError>>,
    {
        (tokio::time::timeout(timeout, fut).await)
            .unwrap_or_else(|_| Err(ScopeError::provider_timeout(connector_name, capability)))
    }

    /// Start building a new `Scope` instance.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use signalscope::{Scope, TruncationPolicy};
    ///
    /// let scope = Scope::builder()
    ///     .connector(Arc::new(signalscope_mock::MockConnector::new()))
    ///     .search_size_limit(5_000)
    ///     .truncation_policy(TruncationPolicy::Warn)
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> ScopeBuilder {
        ScopeBuilder::new()
    }

    /// Effective configuration.
    #[must_use]
    pub const fn config(&self) -> &ScopeConfig {
        &self.cfg
    }

    /// Name of the configured connector.
    #[must_use]
    pub fn connector_name(&self) -> &'static str {
        self.connector.name()
    }

    /// Most recently published result map, if any fetch has completed.
    #[must_use]
    pub fn current(&self) -> Option<Arc<ResultMap>> {
        self.published.borrow().clone()
    }

    /// Receiver that observes every published result map.
    ///
    /// The value is `None` until the first fetch completes. Each publication
    /// replaces the previous map as a whole.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<ResultMap>>> {
        self.published.subscribe()
    }

    /// Latest fetch generation handed out (0 before the first fetch).
    #[must_use]
    pub fn latest_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub(crate) fn begin_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Publish `map` unless a newer generation has started since it was issued.
    ///
    /// The check runs under the channel lock, so a newer map that is already
    /// published can never be replaced by an older one.
    pub(crate) fn publish(&self, map: ResultMap) -> Result<Arc<ResultMap>, ScopeError> {
        let generation = map.generation;
        let map = Arc::new(map);
        let mut latest = generation;
        let published = self.published.send_if_modified(|slot| {
            latest = self.generation.load(Ordering::SeqCst);
            let newer_published = slot.as_ref().is_some_and(|m| m.generation > generation);
            if latest != generation || newer_published {
                return false;
            }
            *slot = Some(Arc::clone(&map));
            true
        });
        if published {
            Ok(map)
        } else {
            Err(ScopeError::StaleGeneration { generation, latest })
        }
    }
}
