//! TTL Sweep Task
//!
//! Background task that periodically removes stale cache entries. The sweep
//! runs as a task on the ambient Tokio runtime when there is one, and on a
//! dedicated thread with its own single-threaded runtime otherwise.

use std::io;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::{Builder, Handle};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use crate::cache::CacheStore;

// == Sweep Handle ==
/// Owner of a running sweep, whichever way it was started.
#[derive(Debug)]
pub enum SweepHandle {
    /// Task on the caller's runtime
    Task(JoinHandle<()>),
    /// Dedicated thread; dropping `stop` also ends it
    Thread {
        stop: oneshot::Sender<()>,
        thread: thread::JoinHandle<()>,
    },
}

impl SweepHandle {
    pub fn is_finished(&self) -> bool {
        match self {
            SweepHandle::Task(handle) => handle.is_finished(),
            SweepHandle::Thread { thread, .. } => thread.is_finished(),
        }
    }

    /// Signals the sweep to stop without waiting for it.
    pub fn abort(self) {
        match self {
            SweepHandle::Task(handle) => handle.abort(),
            SweepHandle::Thread { stop, .. } => {
                let _ = stop.send(());
            }
        }
    }

    /// Signals the sweep to stop and waits until it has terminated.
    pub async fn join(self) {
        match self {
            SweepHandle::Task(handle) => {
                handle.abort();
                if let Err(err) = handle.await {
                    if !err.is_cancelled() {
                        warn!(error = %err, "Cache sweep task ended abnormally");
                    }
                }
            }
            SweepHandle::Thread { stop, thread } => {
                let _ = stop.send(());
                // The thread exits as soon as it observes the stop signal.
                if thread.join().is_err() {
                    warn!("Cache sweep thread panicked");
                }
            }
        }
    }
}

/// Starts sweeping `store` once per `interval`, on the ambient runtime if
/// there is one and on a dedicated thread otherwise.
///
/// Returns `None` only if no thread or runtime could be created; the cache
/// then keeps working without expiry.
pub fn spawn_sweep(store: Arc<Mutex<CacheStore>>, interval: Duration) -> Option<SweepHandle> {
    match Handle::try_current() {
        Ok(_) => Some(SweepHandle::Task(spawn_sweep_task(store, interval))),
        Err(_) => match spawn_sweep_thread(store, interval) {
            Ok(handle) => Some(handle),
            Err(err) => {
                error!(error = %err, "Failed to start cache sweep thread, entries will not expire");
                None
            }
        },
    }
}

/// Spawns a background task that sweeps `store` once per `interval`.
///
/// The first pass runs one full interval after the call. Each pass takes the
/// store lock for its whole duration and removes every entry older than
/// `interval`. The lock is released before waiting for the next tick.
///
/// `interval` must be non-zero and the caller must be inside a Tokio
/// runtime. The task loops until aborted through the returned handle.
///
/// # Example
/// ```ignore
/// let store = Arc::new(Mutex::new(CacheStore::new()));
/// let sweep_handle = spawn_sweep_task(store.clone(), Duration::from_secs(300));
/// // Later, during shutdown:
/// sweep_handle.abort();
/// ```
pub fn spawn_sweep_task(store: Arc<Mutex<CacheStore>>, interval: Duration) -> JoinHandle<()> {
    let start = Instant::now() + interval;
    tokio::spawn(sweep_loop(store, interval, start))
}

/// Runs the sweep on a new thread driving its own current-thread runtime.
fn spawn_sweep_thread(store: Arc<Mutex<CacheStore>>, interval: Duration) -> io::Result<SweepHandle> {
    let start = Instant::now() + interval;
    let runtime = Builder::new_current_thread().enable_time().build()?;
    let (stop, stopped) = oneshot::channel::<()>();

    let thread = thread::Builder::new()
        .name("cache-sweep".to_string())
        .spawn(move || {
            runtime.block_on(async move {
                tokio::select! {
                    _ = sweep_loop(store, interval, start) => {}
                    // Fires on an explicit stop or when the sender is dropped.
                    _ = stopped => debug!("Cache sweep thread stopping"),
                }
            });
        })?;

    Ok(SweepHandle::Thread { stop, thread })
}

async fn sweep_loop(store: Arc<Mutex<CacheStore>>, interval: Duration, start: Instant) {
    // Skip keeps ticks on multiples of `interval` from `start` after a stall.
    let mut ticker = time::interval_at(start, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    info!(?interval, "Starting cache sweep");

    loop {
        ticker.tick().await;

        let (removed, remaining) = {
            let mut guard = store.lock();
            let removed = guard.remove_stale(interval, Instant::now());
            (removed, guard.len())
        };

        if removed > 0 {
            debug!(removed, remaining, "Cache sweep removed stale entries");
        } else {
            debug!(remaining, "Cache sweep found no stale entries");
        }
    }
}
