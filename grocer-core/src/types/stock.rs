//! Stock recommendations.

use serde::{Deserialize, Serialize};

/// Payload of `/stock-recommendation/{product_id}`.
///
/// Unlike most endpoints, the service returns these sections at the top
/// level of the response instead of under `data`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StockRecommendation {
    /// Product the recommendation is for
    pub product_info: StockProductInfo,
    /// Recommended quantities
    pub stock_recommendation: StockPlan,
    /// Historical figures behind the recommendation
    pub analytics: StockAnalytics,
}

/// Product section of a stock recommendation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StockProductInfo {
    /// Product identifier
    pub product_id: u64,
    /// Display name
    pub product_name: String,
    /// Unit price
    pub price: f64,
}

/// Recommended stock levels.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StockPlan {
    /// Predicted demand plus safety stock
    pub recommended_stock_quantity: u64,
    /// Predicted demand over the next seven days
    pub predicted_7day_demand: u64,
    /// Buffer on top of predicted demand
    pub safety_stock: u64,
    /// Recommended quantity times unit price
    pub estimated_cost: f64,
    /// Model behind the demand figure ("ML", "Moving Average", ...)
    pub prediction_method: Option<String>,
}

/// Sales history behind a recommendation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StockAnalytics {
    /// Units per day over the whole history
    pub average_daily_sales: f64,
    /// Units per day over the last 30 days
    pub recent_30day_avg: f64,
    /// Days the recommended stock lasts at the average daily rate
    pub stock_turnover_days: f64,
    /// Units sold over the whole history
    pub total_historical_sales: u64,
    /// Number of days of history used
    pub data_points_used: u64,
}

impl StockRecommendation {
    /// Returns true if recent sales run above the long-term average.
    pub fn is_trending_up(&self) -> bool {
        self.analytics.recent_30day_avg > self.analytics.average_daily_sales
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_payload_top_level() {
        let json = r#"{
            "status": "success",
            "product_info": {"product_id": 5, "product_name": "Eggs", "price": 3.2},
            "stock_recommendation": {
                "recommended_stock_quantity": 140,
                "predicted_7day_demand": 110,
                "safety_stock": 30,
                "estimated_cost": 448.0,
                "prediction_method": "Fast ML Random Forest"
            },
            "analytics": {
                "average_daily_sales": 10.0,
                "recent_30day_avg": 12.5,
                "stock_turnover_days": 14.0,
                "total_historical_sales": 1200,
                "data_points_used": 120
            }
        }"#;
        let rec: StockRecommendation = serde_json::from_str(json).unwrap();
        assert_eq!(rec.product_info.product_name, "Eggs");
        assert_eq!(rec.stock_recommendation.safety_stock, 30);
        assert_eq!(rec.analytics.data_points_used, 120);
        assert!(rec.is_trending_up());
    }

    #[test]
    fn test_stock_partial_payload() {
        let rec: StockRecommendation =
            serde_json::from_str(r#"{"product_info": {"product_id": 5}}"#).unwrap();
        assert_eq!(rec.product_info.product_id, 5);
        assert_eq!(rec.stock_recommendation.recommended_stock_quantity, 0);
        assert!(!rec.is_trending_up());
    }
}
