//! Common traits for grocer.
//!
//! These traits define the interfaces that different implementations can satisfy,
//! enabling modularity and testing.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::Result;
use crate::types::{
    CategoryForecast, ForecastPoint, ModelPerformance, Product, ProductForecast,
    SalesRangeReport, StatsSummary, StockRecommendation, TopProduct,
};

// ═══════════════════════════════════════════════════════════════════════════════
// ANALYTICS SOURCE TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Read-only access to the analytics service.
///
/// Implementations might use:
/// - The HTTP client (with its query cache) in production
/// - Canned responses in tests
///
/// Every method returns the already-unwrapped payload.
#[async_trait]
pub trait AnalyticsSource: Send + Sync {
    /// Store-wide sales statistics.
    async fn stats(&self) -> Result<StatsSummary>;

    /// Best sellers, at most `limit` entries.
    async fn top_products(&self, limit: u32) -> Result<Vec<TopProduct>>;

    /// Product listing, at most `limit` entries.
    async fn products(&self, limit: u32) -> Result<Vec<Product>>;

    /// Seven-day forecast of total sales.
    async fn forecast(&self) -> Result<Vec<ForecastPoint>>;

    /// Seven-day forecast for one product.
    async fn product_forecast(&self, product_id: u64) -> Result<ProductForecast>;

    /// Seven-day forecast for one category.
    async fn category_forecast(&self, category_id: u64) -> Result<CategoryForecast>;

    /// Stock recommendation for one product.
    async fn stock_recommendation(&self, product_id: u64) -> Result<StockRecommendation>;

    /// Sales between `start` and `end`, both inclusive.
    async fn sales_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<SalesRangeReport>;

    /// Information about the service's forecasting models.
    async fn model_performance(&self) -> Result<ModelPerformance>;
}
