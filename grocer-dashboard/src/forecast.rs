//! Sales forecast with a bounded wait.

use std::time::Duration;

use chrono::{Local, NaiveDate};
use tracing::warn;

use grocer_core::{
    with_timeout, AnalyticsSource, ForecastPoint, GrocerError, FALLBACK_FORECAST_DAYS,
    FALLBACK_PREDICTED_SALES,
};

/// Forecast series ready for display.
#[derive(Clone, Debug, PartialEq)]
pub struct ForecastOutcome {
    /// Daily points, real or substituted
    pub points: Vec<ForecastPoint>,
    /// Set when `points` is the flat-line substitute
    pub warning: Option<String>,
}

impl ForecastOutcome {
    /// True if the service's forecast could not be used.
    pub fn is_fallback(&self) -> bool {
        self.warning.is_some()
    }
}

/// Loads the seven-day forecast, waiting at most `wait`.
///
/// Never fails: on timeout or error the result is a flat series starting
/// tomorrow with a warning explaining why.
pub async fn load_forecast(source: &dyn AnalyticsSource, wait: Duration) -> ForecastOutcome {
    load_forecast_on(source, wait, Local::now().date_naive()).await
}

/// [`load_forecast`] with an explicit current date.
pub async fn load_forecast_on(
    source: &dyn AnalyticsSource,
    wait: Duration,
    today: NaiveDate,
) -> ForecastOutcome {
    let warning = match with_timeout(wait, source.forecast()).await {
        Ok(Ok(points)) => {
            return ForecastOutcome {
                points,
                warning: None,
            }
        }
        Err(GrocerError::OperationTimeout(_)) | Ok(Err(GrocerError::ConnectionTimeout(_))) => {
            format!(
                "Forecast did not finish within {} s, showing an estimate instead",
                wait.as_secs()
            )
        }
        Ok(Err(e)) | Err(e) => format!("Forecast could not be loaded ({}), showing an estimate instead", e),
    };

    warn!(%warning, "Using fallback forecast");
    ForecastOutcome {
        points: ForecastPoint::flat_series(today, FALLBACK_FORECAST_DAYS, FALLBACK_PREDICTED_SALES),
        warning: Some(warning),
    }
}
