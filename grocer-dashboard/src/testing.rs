//! Canned analytics source for tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;

use grocer_core::{
    AnalyticsSource, CategoryForecast, ForecastPoint, GrocerError, ModelPerformance, Product,
    ProductForecast, Result, SalesRangeReport, StatsSummary, StockRecommendation, TopProduct,
};

#[derive(Default)]
pub(crate) struct MockSource {
    pub stats_calls: AtomicUsize,
    pub top_calls: AtomicUsize,
    pub fail_top: AtomicBool,
    /// `stats` never answers
    pub hang_stats: bool,
    /// How long `forecast` takes to answer
    pub forecast_delay: Option<Duration>,
    pub fail_forecast: bool,
}

impl MockSource {
    pub fn stats_calls(&self) -> usize {
        self.stats_calls.load(Ordering::SeqCst)
    }
}

fn unused<T>() -> Result<T> {
    Err(GrocerError::ValidationError("not used in these tests".into()))
}

#[async_trait]
impl AnalyticsSource for MockSource {
    async fn stats(&self) -> Result<StatsSummary> {
        let n = self.stats_calls.fetch_add(1, Ordering::SeqCst) as u64 + 1;
        if self.hang_stats {
            futures::future::pending::<()>().await;
        }
        Ok(StatsSummary {
            total_orders: n,
            ..Default::default()
        })
    }

    async fn top_products(&self, limit: u32) -> Result<Vec<TopProduct>> {
        self.top_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_top.load(Ordering::SeqCst) {
            return Err(GrocerError::HttpError("connection reset".into()));
        }
        Ok((1..=u64::from(limit))
            .map(|id| TopProduct {
                product_id: id,
                product_name: format!("Product {}", id),
                total_sold: 100 - id,
                price: 1.0,
            })
            .collect())
    }

    async fn products(&self, _limit: u32) -> Result<Vec<Product>> {
        unused()
    }

    async fn forecast(&self) -> Result<Vec<ForecastPoint>> {
        if let Some(delay) = self.forecast_delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_forecast {
            return Err(GrocerError::Backend("Model eğitilemedi".into()));
        }
        let today = NaiveDate::from_ymd_opt(2018, 5, 9).unwrap_or_default();
        Ok(ForecastPoint::flat_series(today, 7, 64))
    }

    async fn product_forecast(&self, _product_id: u64) -> Result<ProductForecast> {
        unused()
    }

    async fn category_forecast(&self, _category_id: u64) -> Result<CategoryForecast> {
        unused()
    }

    async fn stock_recommendation(&self, _product_id: u64) -> Result<StockRecommendation> {
        unused()
    }

    async fn sales_by_date_range(
        &self,
        _start: NaiveDate,
        _end: NaiveDate,
    ) -> Result<SalesRangeReport> {
        unused()
    }

    async fn model_performance(&self) -> Result<ModelPerformance> {
        unused()
    }
}
