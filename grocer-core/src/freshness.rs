//! Freshness window shared by the query cache and the dashboard store.

use std::time::{Duration, Instant};

use crate::constants::FRESHNESS_WINDOW;

/// Maximum age at which a stored value is still served without reloading.
///
/// A value stored at `t` is fresh at `now` iff `now - t < window`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FreshnessWindow {
    duration: Duration,
}

impl FreshnessWindow {
    /// Creates a window of the given length.
    pub const fn new(duration: Duration) -> Self {
        Self { duration }
    }

    /// Length of the window.
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// Returns true if a value stored at `stored_at` is still fresh at `now`.
    pub fn is_fresh(&self, stored_at: Instant, now: Instant) -> bool {
        now.saturating_duration_since(stored_at) < self.duration
    }

    /// Time left before a value stored at `stored_at` goes stale.
    pub fn remaining(&self, stored_at: Instant, now: Instant) -> Duration {
        self.duration
            .saturating_sub(now.saturating_duration_since(stored_at))
    }
}

impl Default for FreshnessWindow {
    fn default() -> Self {
        Self::new(FRESHNESS_WINDOW)
    }
}
