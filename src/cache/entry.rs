//! Cache Entry Module
//!
//! Defines a single memoized payload together with its creation time.

use std::time::Duration;

use bytes::Bytes;
use tokio::time::Instant;

// == Cache Entry ==
/// A stored payload and the moment it was written.
///
/// The value is opaque to the cache. `created_at` is set on insertion and
/// reset on overwrite; reads never touch it.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The raw payload
    pub value: Bytes,
    /// Creation timestamp (monotonic)
    pub created_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry stamped with the current time.
    pub fn new(value: Bytes) -> Self {
        Self::created_at(value, Instant::now())
    }

    /// Creates an entry with an explicit creation time.
    pub fn created_at(value: Bytes, created_at: Instant) -> Self {
        Self { value, created_at }
    }

    // == Age ==
    /// Returns how long ago the entry was written, measured from `now`.
    ///
    /// Saturates to zero if `now` precedes the creation time.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }

    // == Is Stale ==
    /// Checks whether the entry is older than `max_age` at `now`.
    ///
    /// Boundary condition: an entry whose age equals `max_age` exactly is
    /// still fresh. Only a strictly greater age makes it stale.
    pub fn is_stale(&self, max_age: Duration, now: Instant) -> bool {
        self.age(now) > max_age
    }
}
