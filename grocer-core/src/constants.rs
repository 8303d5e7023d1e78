//! Constants shared across the grocer crates.

use std::time::Duration;

// ═══════════════════════════════════════════════════════════════════════════════
// SERVICE
// ═══════════════════════════════════════════════════════════════════════════════

/// Base URL of the analytics service.
///
/// Fixed at build time through the `GROCER_API_URL` environment variable,
/// falling back to a local development server.
pub const DEFAULT_API_BASE_URL: &str = match option_env!("GROCER_API_URL") {
    Some(url) => url,
    None => "http://localhost:8000",
};

/// Client-side request timeout in seconds.
/// Forecast computations on the service can take tens of seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("grocer/", env!("CARGO_PKG_VERSION"));

// ═══════════════════════════════════════════════════════════════════════════════
// CACHING
// ═══════════════════════════════════════════════════════════════════════════════

/// Freshness window applied to every cache-eligible query and to the
/// dashboard's own "is data fresh" check.
pub const FRESHNESS_WINDOW: Duration = Duration::from_secs(5 * 60);

// ═══════════════════════════════════════════════════════════════════════════════
// QUERY DEFAULTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Default `limit` for the top products query.
pub const DEFAULT_TOP_PRODUCTS_LIMIT: u32 = 10;

/// Default `limit` for the product listing.
pub const DEFAULT_PRODUCTS_LIMIT: u32 = 50;

// ═══════════════════════════════════════════════════════════════════════════════
// FORECAST FALLBACK
// ═══════════════════════════════════════════════════════════════════════════════

/// How long the dashboard waits for the general forecast before falling back.
pub const FORECAST_WAIT: Duration = Duration::from_secs(45);

/// Number of days in the synthetic fallback series.
pub const FALLBACK_FORECAST_DAYS: u32 = 7;

/// Flat value used for every day of the fallback series.
pub const FALLBACK_PREDICTED_SALES: u64 = 50;
