//! Sales reports over a date range.

use serde::{Deserialize, Serialize};

/// Payload of `/sales/{start}/{end}`, returned at the top level.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalesRangeReport {
    /// Range echoed back by the service
    pub date_range: DateRange,
    /// Units sold in the range
    pub total_sales: u64,
    /// Order lines in the range
    pub total_orders: u64,
    /// Units sold per day, only days with sales
    pub daily_sales: Vec<DailySales>,
    /// Best sellers in the range (at most five)
    pub top_products_in_range: Vec<RangeTopProduct>,
}

impl SalesRangeReport {
    /// Units per day over the days that had sales.
    pub fn average_daily_sales(&self) -> f64 {
        if self.daily_sales.is_empty() {
            0.0
        } else {
            self.total_sales as f64 / self.daily_sales.len() as f64
        }
    }

    /// Day with the most units sold in the range.
    pub fn peak_day(&self) -> Option<&DailySales> {
        self.daily_sales.iter().max_by_key(|d| d.quantity)
    }
}

/// Inclusive date range of a report.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateRange {
    /// First day (YYYY-MM-DD)
    pub start: String,
    /// Last day (YYYY-MM-DD)
    pub end: String,
}

/// One day of a sales range report.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailySales {
    /// Day (YYYY-MM-DD)
    #[serde(rename = "SalesDate")]
    pub date: String,
    /// Units sold that day
    #[serde(rename = "Quantity")]
    pub quantity: u64,
}

/// Best seller inside a sales range.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeTopProduct {
    /// Product identifier
    pub product_id: u64,
    /// Display name
    pub product_name: String,
    /// Units sold in the range
    pub total_sold: u64,
}
