//! Dashboard state with its own freshness gate.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use grocer_core::{
    AnalyticsSource, Clock, FreshnessWindow, Result, StatsSummary, SystemClock, TopProduct,
    DEFAULT_TOP_PRODUCTS_LIMIT,
};

/// What the dashboard currently shows.
#[derive(Clone, Debug, Default)]
pub struct DashboardState {
    /// Store-wide statistics, once loaded
    pub stats: Option<StatsSummary>,
    /// Top ten best sellers
    pub top_products: Vec<TopProduct>,
    /// A refresh is in flight
    pub loading: bool,
    /// Clock reading of the last successful refresh
    pub last_updated: Option<Instant>,
    /// Wall-clock time of the last successful refresh, for display
    pub updated_at: Option<DateTime<Utc>>,
}

/// Result of a refresh request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Data was fresh or another refresh was running; nothing fetched
    Skipped,
    /// New data was fetched and stored
    Refreshed,
}

/// Holds the dashboard's stats and best sellers.
///
/// Sits above the client's query cache: inside the window a refresh does
/// not even reach the client.
pub struct DashboardStore {
    state: Mutex<DashboardState>,
    window: FreshnessWindow,
    clock: Arc<dyn Clock>,
}

impl DashboardStore {
    /// Creates an empty store on the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Creates an empty store that reads time from `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(DashboardState::default()),
            window: FreshnessWindow::default(),
            clock,
        }
    }

    /// True if the last successful refresh is inside the freshness window.
    pub fn is_fresh(&self) -> bool {
        self.fresh(&self.state.lock())
    }

    fn fresh(&self, state: &DashboardState) -> bool {
        state
            .last_updated
            .map_or(false, |at| self.window.is_fresh(at, self.clock.now()))
    }

    /// Time left before the data goes stale, zero if it already has.
    pub fn remaining(&self) -> Duration {
        self.state
            .lock()
            .last_updated
            .map_or(Duration::ZERO, |at| self.window.remaining(at, self.clock.now()))
    }

    /// Refreshes unless a refresh is running or the data is still fresh.
    pub async fn refresh(&self, source: &dyn AnalyticsSource) -> Result<RefreshOutcome> {
        let guard = {
            let mut state = self.state.lock();
            if state.loading || self.fresh(&state) {
                debug!(loading = state.loading, "Dashboard refresh skipped");
                return Ok(RefreshOutcome::Skipped);
            }
            state.loading = true;
            LoadingGuard { state: &self.state }
        };
        self.load(source, guard).await
    }

    /// Refreshes regardless of freshness. Still skipped while another refresh runs.
    pub async fn force_refresh(&self, source: &dyn AnalyticsSource) -> Result<RefreshOutcome> {
        let guard = {
            let mut state = self.state.lock();
            if state.loading {
                return Ok(RefreshOutcome::Skipped);
            }
            state.loading = true;
            LoadingGuard { state: &self.state }
        };
        self.load(source, guard).await
    }

    async fn load(
        &self,
        source: &dyn AnalyticsSource,
        guard: LoadingGuard<'_>,
    ) -> Result<RefreshOutcome> {
        let result = futures::try_join!(
            source.stats(),
            source.top_products(DEFAULT_TOP_PRODUCTS_LIMIT)
        );

        drop(guard);
        let mut state = self.state.lock();

        match result {
            Ok((stats, top_products)) => {
                state.stats = Some(stats);
                state.top_products = top_products;
                state.last_updated = Some(self.clock.now());
                state.updated_at = Some(Utc::now());
                info!(products = state.top_products.len(), "Dashboard refreshed");
                Ok(RefreshOutcome::Refreshed)
            }
            Err(e) => {
                // Keep whatever was shown before
                warn!(error = %e, "Dashboard refresh failed");
                Err(e)
            }
        }
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> DashboardState {
        self.state.lock().clone()
    }
}

/// Clears the loading flag when a refresh ends, even if its future is dropped.
struct LoadingGuard<'a> {
    state: &'a Mutex<DashboardState>,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.state.lock().loading = false;
    }
}

impl Default for DashboardStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::Ordering;

    use grocer_core::{with_timeout, GrocerError, ManualClock};

    use crate::testing::MockSource;

    fn make_store() -> (DashboardStore, ManualClock) {
        let clock = ManualClock::new();
        (DashboardStore::with_clock(Arc::new(clock.clone())), clock)
    }

    #[tokio::test]
    async fn test_first_refresh_loads() {
        let (store, _clock) = make_store();
        let source = MockSource::default();

        assert!(!store.is_fresh());
        assert_eq!(store.refresh(&source).await.unwrap(), RefreshOutcome::Refreshed);

        let state = store.snapshot();
        assert_eq!(state.stats.unwrap().total_orders, 1);
        assert_eq!(state.top_products.len(), 10);
        assert!(!state.loading);
        assert!(state.updated_at.is_some());
        assert!(store.is_fresh());
    }

    #[tokio::test]
    async fn test_refresh_skipped_while_fresh() {
        let (store, clock) = make_store();
        let source = MockSource::default();

        store.refresh(&source).await.unwrap();
        clock.advance(Duration::from_secs(120));

        assert_eq!(store.refresh(&source).await.unwrap(), RefreshOutcome::Skipped);
        assert_eq!(source.stats_calls(), 1);
        assert_eq!(store.remaining(), Duration::from_secs(180));
    }

    #[tokio::test]
    async fn test_refresh_after_window() {
        let (store, clock) = make_store();
        let source = MockSource::default();

        store.refresh(&source).await.unwrap();
        clock.advance(Duration::from_secs(300));

        assert!(!store.is_fresh());
        assert_eq!(store.refresh(&source).await.unwrap(), RefreshOutcome::Refreshed);
        assert_eq!(store.snapshot().stats.unwrap().total_orders, 2);
    }

    #[tokio::test]
    async fn test_force_refresh_ignores_freshness() {
        let (store, _clock) = make_store();
        let source = MockSource::default();

        store.refresh(&source).await.unwrap();
        assert_eq!(store.force_refresh(&source).await.unwrap(), RefreshOutcome::Refreshed);
        assert_eq!(source.stats_calls(), 2);
    }

    #[tokio::test]
    async fn test_skipped_while_loading() {
        let (store, _clock) = make_store();
        let source = MockSource::default();
        store.state.lock().loading = true;

        assert_eq!(store.refresh(&source).await.unwrap(), RefreshOutcome::Skipped);
        assert_eq!(store.force_refresh(&source).await.unwrap(), RefreshOutcome::Skipped);
        assert_eq!(source.stats_calls(), 0);
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_data() {
        let (store, clock) = make_store();
        let source = MockSource::default();

        store.refresh(&source).await.unwrap();
        let before = store.snapshot();

        clock.advance(Duration::from_secs(301));
        source.fail_top.store(true, Ordering::SeqCst);

        let err = store.refresh(&source).await.unwrap_err();
        assert!(err.is_recoverable());

        let after = store.snapshot();
        assert!(!after.loading);
        assert_eq!(after.stats, before.stats);
        assert_eq!(after.last_updated, before.last_updated);
        assert!(!store.is_fresh());

        // Retries on the next call
        source.fail_top.store(false, Ordering::SeqCst);
        assert_eq!(store.refresh(&source).await.unwrap(), RefreshOutcome::Refreshed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_refresh_clears_loading() {
        let (store, _clock) = make_store();
        let hanging = MockSource {
            hang_stats: true,
            ..Default::default()
        };

        let result = with_timeout(Duration::from_secs(1), store.refresh(&hanging)).await;
        assert!(matches!(result, Err(GrocerError::OperationTimeout(_))));
        assert!(!store.snapshot().loading);

        let source = MockSource::default();
        assert_eq!(store.refresh(&source).await.unwrap(), RefreshOutcome::Refreshed);
        assert_eq!(store.force_refresh(&source).await.unwrap(), RefreshOutcome::Refreshed);
        assert_eq!(source.stats_calls(), 2);
    }
}
