//! Endpoints of the analytics service and their cache classification.

use chrono::NaiveDate;

use grocer_cache::CacheKey;

/// Whether responses of an endpoint may be served from the query cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CachePolicy {
    /// Low-cardinality, slow-changing: memoized for the freshness window
    Cached,
    /// Always a fresh network call
    Bypass,
}

/// Where the payload sits in a response.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PayloadLocation {
    /// Under the envelope's `data` field
    Data,
    /// The response object itself, next to `status`
    TopLevel,
    /// Raw image bytes
    Image,
}

/// One read-only query against the analytics service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Endpoint {
    /// Store-wide statistics
    Stats,
    /// Best sellers
    TopProducts {
        /// Maximum number of products
        limit: u32,
    },
    /// Product listing
    Products {
        /// Maximum number of products
        limit: u32,
    },
    /// Seven-day forecast of total sales
    Forecast,
    /// Seven-day forecast for one product
    ProductForecast {
        /// Product to forecast
        product_id: u64,
    },
    /// Seven-day forecast for one category
    CategoryForecast {
        /// Category to forecast
        category_id: u64,
    },
    /// Stock recommendation for one product
    StockRecommendation {
        /// Product to plan stock for
        product_id: u64,
    },
    /// Sales between two dates, inclusive
    SalesByDateRange {
        /// First day
        start: NaiveDate,
        /// Last day
        end: NaiveDate,
    },
    /// Forecasting model information
    ModelPerformance,
    /// Forecast plot image
    ForecastPlot {
        /// Epoch millis, defeats intermediary caches
        t: i64,
    },
    /// Actual-vs-forecast comparison plot image
    ComparePlot {
        /// Epoch millis, defeats intermediary caches
        t: i64,
    },
}

impl Endpoint {
    /// Request path relative to the service base URL.
    pub fn path(&self) -> String {
        match self {
            Endpoint::Stats => "/stats".into(),
            Endpoint::TopProducts { .. } => "/top-products".into(),
            Endpoint::Products { .. } => "/products".into(),
            Endpoint::Forecast => "/forecast".into(),
            Endpoint::ProductForecast { product_id } => format!("/forecast/{}", product_id),
            Endpoint::CategoryForecast { category_id } => {
                format!("/forecast/category/{}", category_id)
            }
            Endpoint::StockRecommendation { product_id } => {
                format!("/stock-recommendation/{}", product_id)
            }
            Endpoint::SalesByDateRange { start, end } => format!("/sales/{}/{}", start, end),
            Endpoint::ModelPerformance => "/model-performance".into(),
            Endpoint::ForecastPlot { .. } => "/forecast-plot".into(),
            Endpoint::ComparePlot { .. } => "/compare-plot".into(),
        }
    }

    /// Query-string parameters.
    pub fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            Endpoint::TopProducts { limit } | Endpoint::Products { limit } => {
                vec![("limit", limit.to_string())]
            }
            Endpoint::ForecastPlot { t } | Endpoint::ComparePlot { t } => {
                vec![("t", t.to_string())]
            }
            _ => Vec::new(),
        }
    }

    /// Fixed cache classification of this endpoint.
    pub fn cache_policy(&self) -> CachePolicy {
        match self {
            Endpoint::Stats | Endpoint::TopProducts { .. } | Endpoint::Products { .. } => {
                CachePolicy::Cached
            }
            _ => CachePolicy::Bypass,
        }
    }

    /// Where to find the payload in the response.
    pub fn payload_location(&self) -> PayloadLocation {
        match self {
            Endpoint::StockRecommendation { .. } | Endpoint::SalesByDateRange { .. } => {
                PayloadLocation::TopLevel
            }
            Endpoint::ForecastPlot { .. } | Endpoint::ComparePlot { .. } => PayloadLocation::Image,
            _ => PayloadLocation::Data,
        }
    }

    /// Cache key built from the path and query parameters.
    pub fn cache_key(&self) -> CacheKey {
        CacheKey::with_params(self.path(), self.query())
    }

    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::Stats => "stats",
            Endpoint::TopProducts { .. } => "top_products",
            Endpoint::Products { .. } => "products",
            Endpoint::Forecast => "forecast",
            Endpoint::ProductForecast { .. } => "product_forecast",
            Endpoint::CategoryForecast { .. } => "category_forecast",
            Endpoint::StockRecommendation { .. } => "stock_recommendation",
            Endpoint::SalesByDateRange { .. } => "sales_by_date_range",
            Endpoint::ModelPerformance => "model_performance",
            Endpoint::ForecastPlot { .. } => "forecast_plot",
            Endpoint::ComparePlot { .. } => "compare_plot",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test_case(Endpoint::Stats, CachePolicy::Cached ; "stats")]
    #[test_case(Endpoint::TopProducts { limit: 10 }, CachePolicy::Cached ; "top products")]
    #[test_case(Endpoint::Products { limit: 50 }, CachePolicy::Cached ; "products")]
    #[test_case(Endpoint::Forecast, CachePolicy::Bypass ; "forecast")]
    #[test_case(Endpoint::ProductForecast { product_id: 1 }, CachePolicy::Bypass ; "product forecast")]
    #[test_case(Endpoint::CategoryForecast { category_id: 1 }, CachePolicy::Bypass ; "category forecast")]
    #[test_case(Endpoint::StockRecommendation { product_id: 1 }, CachePolicy::Bypass ; "stock")]
    #[test_case(Endpoint::SalesByDateRange { start: date("2018-01-01"), end: date("2018-01-31") }, CachePolicy::Bypass ; "sales range")]
    #[test_case(Endpoint::ModelPerformance, CachePolicy::Bypass ; "model performance")]
    #[test_case(Endpoint::ForecastPlot { t: 1 }, CachePolicy::Bypass ; "forecast plot")]
    #[test_case(Endpoint::ComparePlot { t: 1 }, CachePolicy::Bypass ; "compare plot")]
    fn test_cache_policy(endpoint: Endpoint, expected: CachePolicy) {
        assert_eq!(endpoint.cache_policy(), expected);
    }

    #[test]
    fn test_paths() {
        assert_eq!(Endpoint::CategoryForecast { category_id: 4 }.path(), "/forecast/category/4");
        assert_eq!(Endpoint::StockRecommendation { product_id: 9 }.path(), "/stock-recommendation/9");
        assert_eq!(
            Endpoint::SalesByDateRange { start: date("2018-01-01"), end: date("2018-02-01") }.path(),
            "/sales/2018-01-01/2018-02-01"
        );
    }

    #[test]
    fn test_payload_location() {
        assert_eq!(Endpoint::Stats.payload_location(), PayloadLocation::Data);
        assert_eq!(
            Endpoint::StockRecommendation { product_id: 1 }.payload_location(),
            PayloadLocation::TopLevel
        );
        assert_eq!(Endpoint::ComparePlot { t: 0 }.payload_location(), PayloadLocation::Image);
    }

    #[test]
    fn test_cache_key_includes_limit() {
        assert_eq!(Endpoint::TopProducts { limit: 10 }.cache_key().to_string(), "/top-products?limit=10");
        assert_ne!(
            Endpoint::Products { limit: 10 }.cache_key(),
            Endpoint::Products { limit: 50 }.cache_key()
        );
    }
}
