//! Background Tasks Module
//!
//! Contains background tasks that run periodically for the life of a cache.
//!
//! # Tasks
//! - TTL Sweep: removes stale cache entries once per cache interval, as a
//!   runtime task or on its own thread

mod sweep;

pub use sweep::{spawn_sweep, spawn_sweep_task, SweepHandle};
