//! TTL Cache Module
//!
//! The thread-safe cache handle: a locked `CacheStore` plus the sweep that
//! reclaims stale entries in the background.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::cache::{CacheStats, CacheStore};
use crate::tasks::{spawn_sweep, SweepHandle};

/// Smallest interval a cache accepts; a zero period cannot drive a timer.
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

// == TTL Cache ==
/// A time-bounded cache of raw payloads keyed by string.
///
/// A single `interval` is both the staleness threshold and the sweep period.
/// Sweeps run on a fixed schedule rather than per entry, so an entry is
/// guaranteed visible for `interval` after it was written and, on an on-time
/// sweep schedule, guaranteed gone within `2 * interval`. Anything in between
/// depends on where the write fell relative to the schedule. A stalled sweep
/// skips the ticks it missed instead of shifting later ones.
///
/// `get` and `put` are synchronous and share one mutex with the sweep; there
/// is no reader/writer split and no per-key locking.
///
/// The sweep is owned by the handle. Inside a Tokio runtime it is a task on
/// that runtime; elsewhere it gets a dedicated thread. Either way it stops on
/// [`TtlCache::stop`], [`TtlCache::shutdown`], or when the handle is dropped.
#[derive(Debug)]
pub struct TtlCache {
    store: Arc<Mutex<CacheStore>>,
    interval: Duration,
    sweeper: Mutex<Option<SweepHandle>>,
}

impl TtlCache {
    // == Constructor ==
    /// Creates an empty cache and starts its sweep.
    ///
    /// Works with or without an ambient Tokio runtime and never fails. A zero
    /// `interval` is raised to [`MIN_INTERVAL`].
    pub fn new(interval: Duration) -> Self {
        let interval = if interval < MIN_INTERVAL {
            warn!(?interval, min = ?MIN_INTERVAL, "Cache interval too small, clamping");
            MIN_INTERVAL
        } else {
            interval
        };

        let store = Arc::new(Mutex::new(CacheStore::new()));
        let sweeper = spawn_sweep(store.clone(), interval);

        Self {
            store,
            interval,
            sweeper: Mutex::new(sweeper),
        }
    }

    // == Put ==
    /// Inserts or overwrites the entry for `key`, stamped with the current time.
    pub fn put(&self, key: impl Into<String>, value: impl Into<Bytes>) {
        self.store.lock().insert(key.into(), value.into());
    }

    // == Get ==
    /// Returns the value for `key` if it is currently stored.
    ///
    /// Does not check staleness and does not extend the entry's lifetime.
    pub fn get(&self, key: &str) -> Option<Bytes> {
        self.store.lock().get(key)
    }

    /// Returns the interval governing both expiry and the sweep period.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn len(&self) -> usize {
        self.store.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.lock().is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.store.lock().stats()
    }

    /// Returns true while the sweep is alive.
    pub fn is_running(&self) -> bool {
        self.sweeper
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    // == Stop ==
    /// Stops the sweep without waiting for it.
    ///
    /// Returns true if a sweep was still attached. Entries already stored
    /// stay readable but no longer expire.
    pub fn stop(&self) -> bool {
        match self.sweeper.lock().take() {
            Some(handle) => {
                handle.abort();
                debug!("Cache sweep stopped");
                true
            }
            None => false,
        }
    }

    // == Shutdown ==
    /// Stops the sweep and waits until it has terminated.
    pub async fn shutdown(&self) {
        let handle = self.sweeper.lock().take();
        if let Some(handle) = handle {
            handle.join().await;
            debug!("Cache sweep shut down");
        }
    }
}

impl Drop for TtlCache {
    fn drop(&mut self) {
        if let Some(handle) = self.sweeper.get_mut().take() {
            handle.abort();
        }
    }
}
