//! # Grocer Dashboard
//!
//! Application state on top of an [`AnalyticsSource`](grocer_core::AnalyticsSource):
//!
//! - [`DashboardStore`]: last stats and best sellers, refreshed at most once
//!   per freshness window
//! - [`load_forecast`]: bounded wait on the sales forecast with a flat-line
//!   fallback
//! - [`system_metrics`]: metric cards for the model performance view

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod forecast;
mod performance;
mod store;

#[cfg(test)]
pub(crate) mod testing;

pub use forecast::{load_forecast, load_forecast_on, ForecastOutcome};
pub use performance::{system_metrics, MetricStatus, SystemMetric};
pub use store::{DashboardState, DashboardStore, RefreshOutcome};
