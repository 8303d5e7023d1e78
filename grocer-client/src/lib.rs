//! # Grocer Client
//!
//! HTTP access layer for the Smart Grocery analytics service.
//!
//! Slow-changing queries (stats, top products, product listing) go through a
//! [`QueryCache`](grocer_cache::QueryCache) owned by the client; forecasts,
//! stock recommendations, date-range reports and plots always hit the
//! network. The classification is fixed per [`Endpoint`].

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod client;
mod config;
mod endpoint;
mod envelope;

pub use client::AnalyticsClient;
pub use config::ClientConfig;
pub use endpoint::{CachePolicy, Endpoint, PayloadLocation};
pub use grocer_cache::CacheStats;
