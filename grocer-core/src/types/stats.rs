//! Store-wide statistics.

use serde::{Deserialize, Serialize};

/// Summary returned by `/stats`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsSummary {
    /// Units sold over the whole dataset
    pub total_sales_quantity: u64,
    /// Number of order lines
    pub total_orders: u64,
    /// Mean units sold per day
    pub average_daily_sales: f64,
    /// Day with the most units sold (`YYYY-MM-DD`)
    pub busiest_day: String,
    /// Units sold on the busiest day
    pub busiest_day_sales: u64,
    /// ML models currently held in the service's memory
    pub ml_models_cached: Option<u64>,
}
