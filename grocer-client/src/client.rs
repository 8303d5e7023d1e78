//! Analytics service client.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{NaiveDate, Utc};
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, instrument};
use url::Url;

use grocer_cache::{CacheStats, QueryCache};
use grocer_core::constants::USER_AGENT;
use grocer_core::error::{GrocerError, Result};
use grocer_core::traits::AnalyticsSource;
use grocer_core::types::{
    CategoryForecast, ForecastPoint, ModelPerformance, Product, ProductForecast,
    SalesRangeReport, StatsSummary, StockRecommendation, TopProduct,
};
use grocer_core::{Clock, SystemClock};

use crate::config::ClientConfig;
use crate::endpoint::{CachePolicy, Endpoint};
use crate::envelope;

/// Client for the analytics service.
///
/// Owns its query cache: two clients never share cached responses, and
/// dropping the client drops the cache.
pub struct AnalyticsClient {
    http_client: reqwest::Client,
    base_url: Url,
    cache: Option<QueryCache<Value>>,
}

impl AnalyticsClient {
    /// Creates a client with the given config on the system clock.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates a client whose cache reads time from `clock`.
    pub fn with_clock(config: ClientConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        config.validate()?;
        let base_url = config.parsed_base_url()?;

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| GrocerError::ConfigError(format!("failed to build HTTP client: {}", e)))?;

        let cache = config
            .enable_cache
            .then(|| QueryCache::with_clock(clock));

        debug!(base_url = %base_url, cache = config.enable_cache, "Created analytics client");

        Ok(Self {
            http_client,
            base_url,
            cache,
        })
    }

    /// Base URL of the service.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL of an endpoint, query string included.
    pub fn url_for(&self, endpoint: &Endpoint) -> Result<Url> {
        let raw = format!(
            "{}{}",
            self.base_url.as_str().trim_end_matches('/'),
            endpoint.path()
        );
        let mut url = Url::parse(&raw)
            .map_err(|e| GrocerError::ConfigError(format!("invalid request URL '{}': {}", raw, e)))?;

        let query = endpoint.query();
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// Fetches the raw, status-checked JSON body of an endpoint.
    ///
    /// Cache-eligible endpoints are served from the query cache while fresh;
    /// repeated hits return the same `Arc`. Bypass endpoints always hit the
    /// network.
    pub async fn fetch_json(&self, endpoint: &Endpoint) -> Result<Arc<Value>> {
        match (&self.cache, endpoint.cache_policy()) {
            (Some(cache), CachePolicy::Cached) => {
                cache
                    .get(&endpoint.cache_key(), || self.request_json(endpoint))
                    .await
            }
            _ => self.request_json(endpoint).await.map(Arc::new),
        }
    }

    async fn query<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<T> {
        let body = self.fetch_json(&endpoint).await?;
        envelope::decode(&body, endpoint.payload_location())
    }

    async fn request_json(&self, endpoint: &Endpoint) -> Result<Value> {
        let response = self.send(endpoint).await?;
        let body: Value = response.json().await.map_err(transport_error)?;
        envelope::check_status(&body)?;
        Ok(body)
    }

    async fn send(&self, endpoint: &Endpoint) -> Result<reqwest::Response> {
        let url = self.url_for(endpoint)?;
        debug!(endpoint = endpoint.name(), %url, "GET");

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GrocerError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // CACHED QUERIES
    // ═══════════════════════════════════════════════════════════════════════

    /// Store-wide statistics.
    #[instrument(skip(self))]
    pub async fn stats(&self) -> Result<StatsSummary> {
        self.query(Endpoint::Stats).await
    }

    /// Best sellers, at most `limit` entries.
    #[instrument(skip(self))]
    pub async fn top_products(&self, limit: u32) -> Result<Vec<TopProduct>> {
        self.query(Endpoint::TopProducts { limit }).await
    }

    /// Product listing, at most `limit` entries.
    #[instrument(skip(self))]
    pub async fn products(&self, limit: u32) -> Result<Vec<Product>> {
        self.query(Endpoint::Products { limit }).await
    }

    // ═══════════════════════════════════════════════════════════════════════
    // UNCACHED QUERIES
    // ═══════════════════════════════════════════════════════════════════════

    /// Seven-day forecast of total sales.
    #[instrument(skip(self))]
    pub async fn forecast(&self) -> Result<Vec<ForecastPoint>> {
        self.query(Endpoint::Forecast).await
    }

    /// Seven-day forecast for one product.
    #[instrument(skip(self))]
    pub async fn product_forecast(&self, product_id: u64) -> Result<ProductForecast> {
        self.query(Endpoint::ProductForecast { product_id }).await
    }

    /// Seven-day forecast for one category.
    #[instrument(skip(self))]
    pub async fn category_forecast(&self, category_id: u64) -> Result<CategoryForecast> {
        self.query(Endpoint::CategoryForecast { category_id }).await
    }

    /// Stock recommendation for one product.
    #[instrument(skip(self))]
    pub async fn stock_recommendation(&self, product_id: u64) -> Result<StockRecommendation> {
        self.query(Endpoint::StockRecommendation { product_id }).await
    }

    /// Sales between `start` and `end`, both inclusive.
    ///
    /// Rejects `start > end` without a request.
    #[instrument(skip(self))]
    pub async fn sales_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<SalesRangeReport> {
        if start > end {
            return Err(GrocerError::ValidationError(format!(
                "start date {} is after end date {}",
                start, end
            )));
        }
        self.query(Endpoint::SalesByDateRange { start, end }).await
    }

    /// Forecasting model information.
    #[instrument(skip(self))]
    pub async fn model_performance(&self) -> Result<ModelPerformance> {
        self.query(Endpoint::ModelPerformance).await
    }

    // ═══════════════════════════════════════════════════════════════════════
    // PLOTS
    // ═══════════════════════════════════════════════════════════════════════

    /// URL of the forecast plot with a fresh cache-busting timestamp.
    pub fn forecast_plot_url(&self) -> Result<Url> {
        self.url_for(&Endpoint::ForecastPlot { t: now_millis() })
    }

    /// URL of the comparison plot with a fresh cache-busting timestamp.
    pub fn compare_plot_url(&self) -> Result<Url> {
        self.url_for(&Endpoint::ComparePlot { t: now_millis() })
    }

    /// Downloads the forecast plot (PNG).
    #[instrument(skip(self))]
    pub async fn forecast_plot(&self) -> Result<Bytes> {
        self.fetch_image(&Endpoint::ForecastPlot { t: now_millis() }).await
    }

    /// Downloads the comparison plot (PNG).
    #[instrument(skip(self))]
    pub async fn compare_plot(&self) -> Result<Bytes> {
        self.fetch_image(&Endpoint::ComparePlot { t: now_millis() }).await
    }

    async fn fetch_image(&self, endpoint: &Endpoint) -> Result<Bytes> {
        let response = self.send(endpoint).await?;
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        if content_type.starts_with("image/") {
            let bytes = response.bytes().await.map_err(transport_error)?;
            debug!(endpoint = endpoint.name(), size = bytes.len(), "Downloaded plot");
            return Ok(bytes);
        }

        // Plot failures come back as JSON with HTTP 200
        if content_type.starts_with("application/json") {
            let body: Value = response.json().await.map_err(transport_error)?;
            envelope::check_status(&body)?;
        }

        Err(GrocerError::UnexpectedContentType {
            expected: "image/*".into(),
            actual: content_type,
        })
    }

    // ═══════════════════════════════════════════════════════════════════════
    // CACHE
    // ═══════════════════════════════════════════════════════════════════════

    /// Drops every cached response so the next read goes to the network.
    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.invalidate_all();
            info!("Cleared query cache");
        }
    }

    /// Statistics of the query cache, `None` when caching is disabled.
    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(QueryCache::stats)
    }
}

#[async_trait]
impl AnalyticsSource for AnalyticsClient {
    async fn stats(&self) -> Result<StatsSummary> {
        AnalyticsClient::stats(self).await
    }

    async fn top_products(&self, limit: u32) -> Result<Vec<TopProduct>> {
        AnalyticsClient::top_products(self, limit).await
    }

    async fn products(&self, limit: u32) -> Result<Vec<Product>> {
        AnalyticsClient::products(self, limit).await
    }

    async fn forecast(&self) -> Result<Vec<ForecastPoint>> {
        AnalyticsClient::forecast(self).await
    }

    async fn product_forecast(&self, product_id: u64) -> Result<ProductForecast> {
        AnalyticsClient::product_forecast(self, product_id).await
    }

    async fn category_forecast(&self, category_id: u64) -> Result<CategoryForecast> {
        AnalyticsClient::category_forecast(self, category_id).await
    }

    async fn stock_recommendation(&self, product_id: u64) -> Result<StockRecommendation> {
        AnalyticsClient::stock_recommendation(self, product_id).await
    }

    async fn sales_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<SalesRangeReport> {
        AnalyticsClient::sales_by_date_range(self, start, end).await
    }

    async fn model_performance(&self) -> Result<ModelPerformance> {
        AnalyticsClient::model_performance(self).await
    }
}

fn transport_error(e: reqwest::Error) -> GrocerError {
    if e.is_timeout() {
        GrocerError::ConnectionTimeout(e.to_string())
    } else if e.is_decode() {
        GrocerError::MalformedBody(format!("response body is not valid JSON: {}", e))
    } else {
        GrocerError::HttpError(e.to_string())
    }
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
