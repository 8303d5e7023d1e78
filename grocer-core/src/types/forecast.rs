//! Sales forecasts.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// One day of a forecast series.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// Forecast day
    pub date: NaiveDate,
    /// Predicted units sold
    #[serde(default)]
    pub predicted_sales: u64,
}

impl ForecastPoint {
    /// Builds a flat series of `days` points starting the day after `today`.
    pub fn flat_series(today: NaiveDate, days: u32, predicted_sales: u64) -> Vec<Self> {
        (1..=i64::from(days))
            .map(|offset| ForecastPoint {
                date: today + Duration::days(offset),
                predicted_sales,
            })
            .collect()
    }
}

/// Total predicted units over a series, saturating at `u64::MAX`.
pub fn total_predicted(points: &[ForecastPoint]) -> u64 {
    points
        .iter()
        .fold(0u64, |total, p| total.saturating_add(p.predicted_sales))
}

/// Payload of `/forecast/{product_id}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductForecast {
    /// Product identifier
    pub product_id: u64,
    /// Display name
    pub product_name: String,
    /// Model that produced the series ("Fast ML", "Fallback", ...)
    pub model: Option<String>,
    /// Forecast series
    pub data: Vec<ForecastPoint>,
}

/// Payload of `/forecast/category/{category_id}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryForecast {
    /// Category identifier
    pub category_id: u64,
    /// Model that produced the series
    pub model: Option<String>,
    /// Forecast series
    pub data: Vec<ForecastPoint>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_series_starts_tomorrow() {
        let today = NaiveDate::from_ymd_opt(2024, 12, 30).unwrap();
        let series = ForecastPoint::flat_series(today, 7, 50);

        assert_eq!(series.len(), 7);
        assert_eq!(series[0].date, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
        assert_eq!(series[6].date, NaiveDate::from_ymd_opt(2025, 1, 6).unwrap());
        assert!(series.iter().all(|p| p.predicted_sales == 50));
        assert_eq!(total_predicted(&series), 350);
    }

    #[test]
    fn test_total_predicted_saturates() {
        let today = NaiveDate::from_ymd_opt(2024, 12, 30).unwrap();
        let series = ForecastPoint::flat_series(today, 3, u64::MAX / 2);
        assert_eq!(total_predicted(&series), u64::MAX);
    }

    #[test]
    fn test_product_forecast_payload() {
        let json = r#"{
            "product_id": 42,
            "product_name": "Apples",
            "model": "Fast ML",
            "data": [{"date": "2018-05-10", "predicted_sales": 12}]
        }"#;
        let forecast: ProductForecast = serde_json::from_str(json).unwrap();
        assert_eq!(forecast.product_id, 42);
        assert_eq!(forecast.model.as_deref(), Some("Fast ML"));
        assert_eq!(forecast.data[0].predicted_sales, 12);
    }

    #[test]
    fn test_category_forecast_without_data() {
        let forecast: CategoryForecast =
            serde_json::from_str(r#"{"category_id": 4}"#).unwrap();
        assert!(forecast.data.is_empty());
    }
}
