//! Domain types for grocer.
//!
//! Payloads returned by the analytics service:
//!
//! - [`StatsSummary`]: Store-wide sales statistics
//! - [`TopProduct`] / [`Product`]: Product rankings and listings
//! - [`ForecastPoint`], [`ProductForecast`], [`CategoryForecast`]: Sales forecasts
//! - [`StockRecommendation`]: Per-product stock advice
//! - [`SalesRangeReport`]: Sales between two dates
//! - [`ModelPerformance`]: Information about the service's forecasting models
//!
//! Scalar fields the service omits are filled with defaults instead of
//! failing deserialization.

mod forecast;
mod performance;
mod product;
mod sales;
mod stats;
mod stock;

pub use forecast::*;
pub use performance::*;
pub use product::*;
pub use sales::*;
pub use stats::*;
pub use stock::*;
