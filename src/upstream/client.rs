/// HTTP client for the external product server
///
/// Every call carries an explicit timeout. Transport failures are converted
/// into values (`ServerStatus` / empty `ProductCatalog`) at this boundary so
/// callers never see a panic or an unhandled error from network flakiness.

use crate::upstream::types::{ProductCatalog, ServerStatus, SitesResponse};
use chrono::Utc;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

/// Default timeout for `/health`, `/products` and `/sites` probes
pub const STATUS_TIMEOUT: Duration = Duration::from_secs(10);

/// Default timeout for the product sample fetch during generation
pub const PRODUCT_FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Failure of a single upstream call
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} responded with status {status}")]
    Status { url: String, status: u16 },

    #[error("{url} returned a malformed body: {source}")]
    Malformed {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Client bound to one product server base URL
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: String,
    status_timeout: Duration,
    fetch_timeout: Duration,
}

impl UpstreamClient {
    /// Create a client for `base_url` (a trailing slash is ignored)
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            status_timeout: STATUS_TIMEOUT,
            fetch_timeout: PRODUCT_FETCH_TIMEOUT,
        }
    }

    /// Override the status-probe and product-fetch timeouts
    pub fn with_timeouts(mut self, status_timeout: Duration, fetch_timeout: Duration) -> Self {
        self.status_timeout = status_timeout;
        self.fetch_timeout = fetch_timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Probe `/health`, `/products` and `/sites` and reduce them to a status record
    ///
    /// Never fails: a transport error or malformed body on any probe yields
    /// `healthy = false` with the cause in `error`.
    pub async fn check_status(&self) -> ServerStatus {
        tracing::info!("🔍 Checking server status at {}", self.base_url);

        match self.probe().await {
            Ok(status) => {
                if status.healthy {
                    tracing::info!(
                        "✅ Server is healthy: {} products, sites {:?}",
                        status.products_count,
                        status.available_sites
                    );
                } else {
                    tracing::warn!("⚠️ Server reported unhealthy: {}", self.base_url);
                }
                status
            }
            Err(e) => {
                tracing::error!("❌ Server status check failed: {}", e);
                ServerStatus::unreachable(&self.base_url, e.to_string())
            }
        }
    }

    async fn probe(&self) -> Result<ServerStatus, UpstreamError> {
        let health = self.get("/health", self.status_timeout).await?;
        let healthy = health.status() == StatusCode::OK;
        let health_error = (!healthy).then(|| format!("health check returned status {}", health.status().as_u16()));

        let products = self.get("/products", self.status_timeout).await?;
        let products_count = if products.status() == StatusCode::OK {
            let catalog: ProductCatalog = self.parse(products, "/products").await?;
            warn_on_count_mismatch(&catalog);
            catalog.total()
        } else {
            tracing::warn!("⚠️ /products returned status {}", products.status().as_u16());
            0
        };

        let sites = self.get("/sites", self.status_timeout).await?;
        let available_sites = if sites.status() == StatusCode::OK {
            self.parse::<SitesResponse>(sites, "/sites").await?.into_names()
        } else {
            tracing::warn!("⚠️ /sites returned status {}", sites.status().as_u16());
            Vec::new()
        };

        Ok(ServerStatus {
            healthy,
            products_count,
            available_sites,
            url: self.base_url.clone(),
            last_checked: Utc::now(),
            error: health_error,
        })
    }

    /// Fetch `/products`, failing on transport errors, non-200 status or a malformed body
    pub async fn fetch_catalog(&self) -> Result<ProductCatalog, UpstreamError> {
        let response = self.get("/products", self.fetch_timeout).await?;
        if response.status() != StatusCode::OK {
            return Err(UpstreamError::Status {
                url: self.url("/products"),
                status: response.status().as_u16(),
            });
        }
        let catalog: ProductCatalog = self.parse(response, "/products").await?;
        warn_on_count_mismatch(&catalog);
        Ok(catalog)
    }

    /// Fetch `/products`, substituting an empty catalog on any failure
    pub async fn fetch_product_sample(&self) -> ProductCatalog {
        match self.fetch_catalog().await {
            Ok(catalog) => {
                tracing::info!("📦 Fetched {} products from server", catalog.total());
                catalog
            }
            Err(e) => {
                tracing::warn!("⚠️ Failed to fetch product data, continuing with an empty sample: {}", e);
                ProductCatalog::empty()
            }
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get(&self, path: &str, timeout: Duration) -> Result<reqwest::Response, UpstreamError> {
        let url = self.url(path);
        tracing::debug!("🌍 GET {} (timeout {:?})", url, timeout);

        self.http
            .get(&url)
            .header("Accept", "application/json")
            .timeout(timeout)
            .send()
            .await
            .map_err(|source| UpstreamError::Transport { url, source })
    }

    /// Read the body as text, then parse JSON, so malformed bodies and
    /// transport errors while reading are told apart
    async fn parse<T: DeserializeOwned>(&self, response: reqwest::Response, path: &str) -> Result<T, UpstreamError> {
        let url = self.url(path);
        let text = response
            .text()
            .await
            .map_err(|source| UpstreamError::Transport { url: url.clone(), source })?;
        serde_json::from_str(&text).map_err(|source| UpstreamError::Malformed { url, source })
    }
}

fn warn_on_count_mismatch(catalog: &ProductCatalog) {
    if let Some((count, actual)) = catalog.count_mismatch() {
        tracing::warn!("⚠️ Count mismatch: count={}, actual={}", count, actual);
    }
}
