use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use signalscope_core::connector::{
    CatalogProvider, PointSearchProvider, SignalConnector, SummaryProvider,
};
use signalscope_core::{BucketRecord, Capability, PointPage, PointQuery, ScopeError, SummaryQuery};

/// Instruction for how a method should behave for a given input.
#[derive(Debug, Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Fail immediately with the provided error.
    Fail(ScopeError),
    /// Hang indefinitely (simulate a timeout).
    Hang,
    /// Return the provided value after sleeping on the tokio clock.
    Delayed(Duration, T),
    /// Fail with the provided error after sleeping on the tokio clock.
    FailAfter(Duration, ScopeError),
}

impl<T> MockBehavior<T> {
    async fn play(self) -> Result<T, ScopeError> {
        match self {
            Self::Return(v) => Ok(v),
            Self::Fail(e) => Err(e),
            Self::Hang => {
                std::future::pending::<()>().await;
                unreachable!()
            }
            Self::Delayed(d, v) => {
                tokio::time::sleep(d).await;
                Ok(v)
            }
            Self::FailAfter(d, e) => {
                tokio::time::sleep(d).await;
                Err(e)
            }
        }
    }
}

/// One connector call as observed by the dynamic mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    /// `search_points` with its query.
    SearchPoints(PointQuery),
    /// `summarize` with its query.
    Summarize(SummaryQuery),
    /// `list_symbols`.
    ListSymbols,
    /// `list_models`.
    ListModels,
}

impl MockCall {
    /// Symbol the call was made for, if it was a per-symbol call.
    #[must_use]
    pub fn symbol(&self) -> Option<&str> {
        match self {
            Self::SearchPoints(q) => Some(&q.symbol),
            Self::Summarize(q) => q.symbol.as_deref(),
            Self::ListSymbols | Self::ListModels => None,
        }
    }
}

#[derive(Default)]
struct InternalState {
    point_rules: HashMap<String, MockBehavior<PointPage>>,
    // `None` keys the all-symbols aggregate.
    summary_rules: HashMap<Option<String>, MockBehavior<Vec<BucketRecord>>>,
    symbols_rule: Option<MockBehavior<Vec<String>>>,
    models_rule: Option<MockBehavior<Vec<String>>>,
    calls: Vec<MockCall>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior for `search_points` calls for a specific symbol.
    pub async fn set_points_behavior(&self, symbol: &str, behavior: MockBehavior<PointPage>) {
        let mut guard = self.state.lock().await;
        guard.point_rules.insert(symbol.to_string(), behavior);
    }

    /// Set the behavior for `summarize` calls for a specific symbol.
    pub async fn set_summary_behavior(
        &self,
        symbol: &str,
        behavior: MockBehavior<Vec<BucketRecord>>,
    ) {
        let mut guard = self.state.lock().await;
        guard
            .summary_rules
            .insert(Some(symbol.to_string()), behavior);
    }

    /// Set the behavior for `summarize` calls made without a symbol.
    pub async fn set_aggregate_behavior(&self, behavior: MockBehavior<Vec<BucketRecord>>) {
        let mut guard = self.state.lock().await;
        guard.summary_rules.insert(None, behavior);
    }

    /// Set the behavior for `list_symbols`.
    pub async fn set_symbols_behavior(&self, behavior: MockBehavior<Vec<String>>) {
        self.state.lock().await.symbols_rule = Some(behavior);
    }

    /// Set the behavior for `list_models`.
    pub async fn set_models_behavior(&self, behavior: MockBehavior<Vec<String>>) {
        self.state.lock().await.models_rule = Some(behavior);
    }

    /// Return a copy of every call received so far, in arrival order.
    pub async fn calls(&self) -> Vec<MockCall> {
        self.state.lock().await.calls.clone()
    }

    /// Number of calls received so far.
    pub async fn call_count(&self) -> usize {
        self.state.lock().await.calls.len()
    }

    /// Clear all configured behaviors and the call log.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        guard.point_rules.clear();
        guard.summary_rules.clear();
        guard.symbols_rule = None;
        guard.models_rule = None;
        guard.calls.clear();
    }
}

/// A connector that defers all behavior to an external controller.
///
/// Calls without a configured behavior fail with `ScopeError::Unsupported`.
pub struct DynamicMockConnector {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockConnector {
    /// Create a new dynamic mock connector and its controller.
    #[must_use]
    pub fn new_with_controller(
        name: &'static str,
    ) -> (Arc<dyn SignalConnector>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self { name, state });
        (me as Arc<dyn SignalConnector>, controller)
    }

    // Log the call and snapshot its behavior without holding the lock across the await.
    async fn record<T>(
        &self,
        call: MockCall,
        pick: impl FnOnce(&InternalState) -> Option<MockBehavior<T>>,
    ) -> Option<MockBehavior<T>> {
        let mut guard = self.state.lock().await;
        guard.calls.push(call);
        pick(&*guard)
    }
}

impl SignalConnector for DynamicMockConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "DynamicMock"
    }

    fn as_point_search_provider(&self) -> Option<&dyn PointSearchProvider> {
        Some(self as &dyn PointSearchProvider)
    }

    fn as_summary_provider(&self) -> Option<&dyn SummaryProvider> {
        Some(self as &dyn SummaryProvider)
    }

    fn as_catalog_provider(&self) -> Option<&dyn CatalogProvider> {
        Some(self as &dyn CatalogProvider)
    }
}

#[async_trait]
impl PointSearchProvider for DynamicMockConnector {
    async fn search_points(&self, query: PointQuery) -> Result<PointPage, ScopeError> {
        let symbol = query.symbol.clone();
        let behavior = self
            .record(MockCall::SearchPoints(query), |s| {
                s.point_rules.get(&symbol).cloned()
            })
            .await;
        match behavior {
            Some(b) => b.play().await,
            None => Err(ScopeError::unsupported(Capability::SearchPoints)),
        }
    }
}

#[async_trait]
impl SummaryProvider for DynamicMockConnector {
    async fn summarize(&self, query: SummaryQuery) -> Result<Vec<BucketRecord>, ScopeError> {
        let symbol = query.symbol.clone();
        let behavior = self
            .record(MockCall::Summarize(query), |s| {
                s.summary_rules.get(&symbol).cloned()
            })
            .await;
        match behavior {
            Some(b) => b.play().await,
            None => Err(ScopeError::unsupported(Capability::Summarize)),
        }
    }
}

#[async_trait]
impl CatalogProvider for DynamicMockConnector {
    async fn list_symbols(&self) -> Result<Vec<String>, ScopeError> {
        let behavior = self
            .record(MockCall::ListSymbols, |s| s.symbols_rule.clone())
            .await;
        match behavior {
            Some(b) => b.play().await,
            None => Err(ScopeError::unsupported(Capability::ListSymbols)),
        }
    }

    async fn list_models(&self) -> Result<Vec<String>, ScopeError> {
        let behavior = self
            .record(MockCall::ListModels, |s| s.models_rule.clone())
            .await;
        match behavior {
            Some(b) => b.play().await,
            None => Err(ScopeError::unsupported(Capability::ListModels)),
        }
    }
}
