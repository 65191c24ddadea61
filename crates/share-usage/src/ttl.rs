//! A single cached value with time-based expiry

use std::time::{Duration, Instant};

use parking_lot::RwLock;
use serde::Serialize;

use crate::clock::Clock;

/// A cached value and the instant it was computed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheEntry<T> {
    pub value: T,
    #[serde(skip)]
    pub computed_at: Instant,
}

impl<T> CacheEntry<T> {
    /// Valid while `now - computed_at < ttl`.
    pub fn is_fresh(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.computed_at) < ttl
    }
}

/// Lazily computed value, recomputed on demand once expired.
///
/// Readers check freshness under a shared lock. A reader that finds the
/// value missing or stale takes the exclusive lock and checks again before
/// recomputing, so a burst of callers hitting an expired value causes a
/// single recomputation. Failed computations are not cached.
#[derive(Debug)]
pub struct TtlCell<T> {
    ttl: Duration,
    slot: RwLock<Option<CacheEntry<T>>>,
}

impl<T: Clone> TtlCell<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: RwLock::new(None),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The cached entry, fresh or not, without computing anything.
    pub fn peek(&self) -> Option<CacheEntry<T>> {
        self.slot.read().clone()
    }

    pub fn get_or_refresh<E, F>(&self, clock: &dyn Clock, compute: F) -> Result<CacheEntry<T>, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        if let Some(entry) = self.fresh(&self.slot.read(), clock.now()) {
            return Ok(entry);
        }

        let mut slot = self.slot.write();
        if let Some(entry) = self.fresh(&slot, clock.now()) {
            return Ok(entry);
        }

        let value = compute()?;
        let entry = CacheEntry {
            value,
            computed_at: clock.now(),
        };
        *slot = Some(entry.clone());
        Ok(entry)
    }

    fn fresh(&self, slot: &Option<CacheEntry<T>>, now: Instant) -> Option<CacheEntry<T>> {
        slot.as_ref().filter(|e| e.is_fresh(now, self.ttl)).cloned()
    }
}
