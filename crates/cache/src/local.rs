//! Single-entry, time-bounded cache for the output of an argument-less load.
//!
//! The slot lock is held while a load runs, so callers arriving during a
//! miss wait for that computation instead of observing a half-built entry.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::clock::{Clock, SystemClock};

struct CacheEntry<T> {
    value: Arc<T>,
    inserted_at: std::time::Instant,
}

pub struct LoadCache<T> {
    slot: Mutex<Option<CacheEntry<T>>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<T> LoadCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            slot: Mutex::new(None),
            ttl,
            clock,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the cached value if it is younger than the TTL, otherwise run
    /// `load` and store its result. Errors are returned and never cached.
    pub fn get_or_load<E, F>(&self, load: F) -> Result<Arc<T>, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        let mut slot = self.slot.lock();

        if let Some(entry) = slot.as_ref() {
            if self.is_fresh(entry) {
                metrics::counter!("cache.hit").increment(1);
                return Ok(Arc::clone(&entry.value));
            }
        }

        metrics::counter!("cache.miss").increment(1);
        *slot = None;

        let value = Arc::new(load()?);
        *slot = Some(CacheEntry {
            value: Arc::clone(&value),
            inserted_at: self.clock.now(),
        });
        debug!(ttl_secs = self.ttl.as_secs(), "Cache entry stored");

        Ok(value)
    }

    /// Fresh cached value without triggering a load.
    pub fn get(&self) -> Option<Arc<T>> {
        let slot = self.slot.lock();
        slot.as_ref()
            .filter(|entry| self.is_fresh(entry))
            .map(|entry| Arc::clone(&entry.value))
    }

    pub fn invalidate(&self) {
        *self.slot.lock() = None;
    }

    fn is_fresh(&self, entry: &CacheEntry<T>) -> bool {
        self.clock
            .now()
            .saturating_duration_since(entry.inserted_at)
            < self.ttl
    }
}
