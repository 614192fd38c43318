//! signalscope-http
//!
//! Connector for the signal backend's JSON REST API under `/api/signals`.
//!
//! - `POST search` → raw points for one symbol (first page, sized by the query's limit)
//! - `POST summary` → BUY/SELL/HOLD counts per bucket
//! - `GET symbols` / `GET models` → catalog listings
//!
//! Status mapping: 404 becomes `NotFound`, any other non-2xx status becomes a
//! `Connector` error carrying the status and a body excerpt, an undecodable body
//! becomes `Data`, and transport failures become `Connector`.
#![warn(missing_docs)]

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use signalscope_core::connector::{
    CatalogProvider, PointSearchProvider, SignalConnector, SummaryProvider,
};
use signalscope_core::{
    BucketRecord, Capability, PointPage, PointQuery, ScopeError, SummaryQuery,
};
use url::Url;

mod wire;

const NAME: &str = "signalscope-http";
const EXCERPT_CHARS: usize = 200;

/// Connector speaking HTTP/JSON to a signal backend.
#[derive(Debug, Clone)]
pub struct HttpConnector {
    client: reqwest::Client,
    base: Url,
}

impl HttpConnector {
    /// Connector for the backend at `base_url` (e.g. `http://localhost:8000`).
    ///
    /// # Errors
    /// Returns `InvalidArg` if `base_url` is not an absolute http(s) URL.
    pub fn new(base_url: &str) -> Result<Self, ScopeError> {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Like [`new`](Self::new), reusing a caller-configured `reqwest::Client`.
    ///
    /// Timeouts, proxies, and TLS settings come from the client. Per-call
    /// deadlines are still applied by the orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` if `base_url` is not an absolute http(s) URL.
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Result<Self, ScopeError> {
        let mut base = Url::parse(base_url)
            .map_err(|e| ScopeError::InvalidArg(format!("invalid base url '{base_url}': {e}")))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(ScopeError::InvalidArg(format!(
                "base url must be http or https: {base_url}"
            )));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self { client, base })
    }

    /// Base URL the endpoints are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base
    }

    /// Probe `GET /api/signals/health`.
    ///
    /// # Errors
    /// Returns the mapped HTTP or transport error when the backend is not healthy.
    pub async fn health(&self) -> Result<(), ScopeError> {
        let url = self.endpoint("health")?;
        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(transport)?;
        let status = resp.status();
        let body = resp.text().await.map_err(transport)?;
        check_status(status, &url, &body, "health")?;
        if body.trim() == "OK" {
            Ok(())
        } else {
            Err(ScopeError::Data(format!("unexpected health response: {}", excerpt(&body))))
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, ScopeError> {
        self.base
            .join(&format!("api/signals/{path}"))
            .map_err(|e| ScopeError::InvalidArg(format!("cannot build url for {path}: {e}")))
    }

    async fn call<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        what: &str,
    ) -> Result<T, ScopeError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let mut req = self.client.request(method, url.clone());
        if let Some(body) = body {
            req = req.json(body);
        }
        let resp = req.send().await.map_err(transport)?;
        let status = resp.status();
        let bytes = resp.bytes().await.map_err(transport)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(%url, status = status.as_u16(), bytes = bytes.len(), "backend response");

        check_status(status, &url, &String::from_utf8_lossy(&bytes), what)?;
        serde_json::from_slice(&bytes)
            .map_err(|e| ScopeError::Data(format!("undecodable {what} response from {url}: {e}")))
    }
}

fn transport(e: reqwest::Error) -> ScopeError {
    ScopeError::connector(NAME, e.to_string())
}

fn check_status(status: StatusCode, url: &Url, body: &str, what: &str) -> Result<(), ScopeError> {
    if status.is_success() {
        return Ok(());
    }
    if status == StatusCode::NOT_FOUND {
        return Err(ScopeError::not_found(format!("{what} at {url}")));
    }
    Err(ScopeError::connector(
        NAME,
        format!("HTTP {status} from {url}: {}", excerpt(body)),
    ))
}

fn excerpt(body: &str) -> String {
    let trimmed = body.trim();
    match trimmed.char_indices().nth(EXCERPT_CHARS) {
        Some((cut, _)) => format!("{}…", &trimmed[..cut]),
        None => trimmed.to_string(),
    }
}

impl SignalConnector for HttpConnector {
    fn name(&self) -> &'static str {
        NAME
    }

    fn vendor(&self) -> &'static str {
        "Signal backend (REST)"
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
impl PointSearchProvider for HttpConnector {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "signalscope_http::search_points",
            skip(self, query),
            fields(symbol = %query.symbol, size = query.size_limit),
        )
    )]
    async fn search_points(&self, query: PointQuery) -> Result<PointPage, ScopeError> {
        let body = wire::SearchBody::from(&query);
        let page: wire::Page = self
            .call(Method::POST, "search", Some(&body), Capability::SearchPoints.as_str())
            .await?;
        Ok(PointPage {
            points: page.content,
            total: page.total_elements,
        })
    }
}

#[async_trait]
impl SummaryProvider for HttpConnector {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "signalscope_http::summarize",
            skip(self, query),
            fields(symbol = query.symbol.as_deref().unwrap_or("*"), group_by = %query.granularity),
        )
    )]
    async fn summarize(&self, query: SummaryQuery) -> Result<Vec<BucketRecord>, ScopeError> {
        let body = wire::SummaryBody::from(&query);
        self.call(Method::POST, "summary", Some(&body), Capability::Summarize.as_str())
            .await
    }
}

#[async_trait]
impl CatalogProvider for HttpConnector {
    async fn list_symbols(&self) -> Result<Vec<String>, ScopeError> {
        self.call::<(), _>(Method::GET, "symbols", None, Capability::ListSymbols.as_str())
            .await
    }

    async fn list_models(&self) -> Result<Vec<String>, ScopeError> {
        self.call::<(), _>(Method::GET, "models", None, Capability::ListModels.as_str())
            .await
    }
}
