//! In-memory read-through cache.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use parking_lot::RwLock;
use tracing::debug;

use grocer_core::{Clock, FreshnessWindow, SystemClock};

use crate::key::CacheKey;

/// Stored response with the time it was stored.
struct CacheEntry<V> {
    payload: Arc<V>,
    stored_at: Instant,
}

/// Read-through cache keyed by [`CacheKey`].
///
/// Entries are created on a miss and replaced on refresh, never mutated.
/// There is no eviction: a stale entry stays in memory until it is
/// overwritten or [`QueryCache::invalidate_all`] is called.
///
/// Concurrent misses on the same key are not coalesced; each caller runs
/// its own loader.
pub struct QueryCache<V> {
    entries: RwLock<HashMap<CacheKey, CacheEntry<V>>>,
    window: FreshnessWindow,
    clock: Arc<dyn Clock>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<V> QueryCache<V> {
    /// Creates a cache on the system clock with the default window.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Creates a cache that reads time from `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            window: FreshnessWindow::default(),
            clock,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Returns the fresh value for `key`, or runs `loader` and stores its result.
    ///
    /// A hit performs no I/O and returns the same allocation as the call that
    /// stored it. On a miss the loader runs exactly once. A loader error is
    /// returned unchanged and leaves the cache as it was.
    pub async fn get<F, Fut, E>(&self, key: &CacheKey, loader: F) -> Result<Arc<V>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(payload) = self.peek(key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!(%key, "Cache hit");
            return Ok(payload);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!(%key, "Cache miss, loading");

        let payload = Arc::new(loader().await?);
        self.store(key.clone(), Arc::clone(&payload));
        Ok(payload)
    }

    /// Returns the fresh value for `key` without loading or counting.
    pub fn peek(&self, key: &CacheKey) -> Option<Arc<V>> {
        let now = self.clock.now();
        self.entries
            .read()
            .get(key)
            .filter(|e| self.window.is_fresh(e.stored_at, now))
            .map(|e| Arc::clone(&e.payload))
    }

    /// When the entry for `key` was stored, fresh or not.
    pub fn stored_at(&self, key: &CacheKey) -> Option<Instant> {
        self.entries.read().get(key).map(|e| e.stored_at)
    }

    fn store(&self, key: CacheKey, payload: Arc<V>) {
        let stored_at = self.clock.now();
        self.entries
            .write()
            .insert(key, CacheEntry { payload, stored_at });
    }

    /// Clears every entry. The next `get` for any key runs its loader.
    pub fn invalidate_all(&self) {
        let mut entries = self.entries.write();
        debug!(entries = entries.len(), "Invalidating query cache");
        entries.clear();
    }

    /// Freshness window applied to every entry.
    pub fn window(&self) -> FreshnessWindow {
        self.window
    }

    /// Returns the number of stored entries, stale ones included.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Returns cache statistics.
    pub fn stats(&self) -> CacheStats {
        let now = self.clock.now();
        let entries = self.entries.read();
        let fresh = entries
            .values()
            .filter(|e| self.window.is_fresh(e.stored_at, now))
            .count();

        CacheStats {
            total_entries: entries.len(),
            fresh_entries: fresh,
            stale_entries: entries.len() - fresh,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

impl<V> Default for QueryCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Stored entries (including stale)
    pub total_entries: usize,
    /// Entries still inside the freshness window
    pub fresh_entries: usize,
    /// Entries past the window, kept until overwritten
    pub stale_entries: usize,
    /// `get` calls served from memory
    pub hits: u64,
    /// `get` calls that ran the loader
    pub misses: u64,
}
