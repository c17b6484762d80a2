//! Timer-driven simulated metrics store.
//!
//! A store owns one state value and a tokio task that replaces it with
//! `update(&previous, rng)` once per interval. The task is cancelled by
//! [`SimulatedStore::stop`] or when the store is dropped.
//!
//! Failure policy: an update rule that returns `Err` or panics stops the
//! store for good. The failure is recorded in [`StoreStatus::Failed`],
//! logged, and forwarded as a [`StoreFault`] to the host's fault channel.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::{mpsc, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::{SimError, SimRng};

/// Shortest scheduling period a store accepts; zero is coerced up to this.
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Lifecycle of a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreStatus {
    Running,
    Stopped,
    Failed(SimError),
}

/// A failed update, delivered to the host's error boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreFault {
    pub store: String,
    /// Number of updates applied before the failure.
    pub ticks: u64,
    pub error: SimError,
}

impl std::fmt::Display for StoreFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "store '{}' stopped after {} ticks: {}", self.store, self.ticks, self.error)
    }
}

/// Construction options for [`SimulatedStore::spawn`].
#[derive(Debug, Clone)]
pub struct StoreOptions {
    pub name: String,
    pub interval: Duration,
    /// Where update failures are reported. `None` means status-only.
    pub faults: Option<mpsc::UnboundedSender<StoreFault>>,
}

impl StoreOptions {
    pub fn new(name: impl Into<String>, interval: Duration) -> Self {
        Self {
            name: name.into(),
            interval,
            faults: None,
        }
    }

    pub fn with_faults(mut self, faults: mpsc::UnboundedSender<StoreFault>) -> Self {
        self.faults = Some(faults);
        self
    }
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self::new("store", Duration::from_secs(1))
    }
}

struct Shared {
    stopped: AtomicBool,
    ticks: AtomicU64,
    status: Mutex<StoreStatus>,
}

impl Shared {
    fn set_status(&self, status: StoreStatus) {
        if let Ok(mut guard) = self.status.lock() {
            *guard = status;
        }
    }
}

/// Handle to a running simulated store.
///
/// Must be created from within a tokio runtime.
pub struct SimulatedStore<S> {
    name: String,
    interval: Duration,
    state: Arc<RwLock<S>>,
    shared: Arc<Shared>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl<S> SimulatedStore<S>
where
    S: Send + Sync + 'static,
{
    /// Create a store with an entropy-seeded random source and no fault channel.
    pub fn create<F>(initial: S, update: F, interval: Duration) -> Self
    where
        F: FnMut(&S, &mut SimRng) -> Result<S, SimError> + Send + 'static,
    {
        Self::spawn(
            initial,
            update,
            SimRng::from_entropy(),
            StoreOptions::new("store", interval),
        )
    }

    pub fn spawn<F>(initial: S, update: F, rng: SimRng, options: StoreOptions) -> Self
    where
        F: FnMut(&S, &mut SimRng) -> Result<S, SimError> + Send + 'static,
    {
        let interval = if options.interval < MIN_INTERVAL {
            tracing::warn!(
                store = %options.name,
                interval_ms = options.interval.as_millis() as u64,
                "Store interval below minimum, coercing"
            );
            MIN_INTERVAL
        } else {
            options.interval
        };

        let state = Arc::new(RwLock::new(initial));
        let shared = Arc::new(Shared {
            stopped: AtomicBool::new(false),
            ticks: AtomicU64::new(0),
            status: Mutex::new(StoreStatus::Running),
        });

        let task = tokio::spawn(run_ticks(
            options.name.clone(),
            interval,
            state.clone(),
            shared.clone(),
            update,
            rng,
            options.faults,
        ));

        tracing::debug!(
            store = %options.name,
            interval_ms = interval.as_millis() as u64,
            "Store started"
        );

        Self {
            name: options.name,
            interval,
            state,
            shared,
            task: Mutex::new(Some(task)),
        }
    }

    /// Snapshot of the current state.
    pub async fn current(&self) -> S
    where
        S: Clone,
    {
        self.state.read().await.clone()
    }

    /// Non-blocking snapshot; `None` while a tick holds the write lock.
    pub fn try_current(&self) -> Option<S>
    where
        S: Clone,
    {
        self.state.try_read().ok().map(|s| (*s).clone())
    }
}

impl<S> SimulatedStore<S> {
    /// Cancel the timer. Safe to call any number of times.
    pub fn stop(&self) {
        let first = !self.shared.stopped.swap(true, Ordering::SeqCst);
        if let Ok(mut task) = self.task.lock() {
            if let Some(handle) = task.take() {
                handle.abort();
            }
        }
        if !first {
            return;
        }
        if let Ok(mut status) = self.shared.status.lock() {
            if *status == StoreStatus::Running {
                *status = StoreStatus::Stopped;
            }
        }
        tracing::debug!(
            store = %self.name,
            ticks = self.ticks(),
            "Store stopped"
        );
    }

    pub fn status(&self) -> StoreStatus {
        self.shared
            .status
            .lock()
            .map(|s| s.clone())
            .unwrap_or(StoreStatus::Stopped)
    }

    pub fn is_running(&self) -> bool {
        self.status() == StoreStatus::Running
    }

    /// Number of updates applied so far.
    pub fn ticks(&self) -> u64 {
        self.shared.ticks.load(Ordering::SeqCst)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl<S> Drop for SimulatedStore<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

impl<S> std::fmt::Debug for SimulatedStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulatedStore")
            .field("name", &self.name)
            .field("interval", &self.interval)
            .field("ticks", &self.ticks())
            .field("status", &self.status())
            .finish()
    }
}

async fn run_ticks<S, F>(
    name: String,
    interval: Duration,
    state: Arc<RwLock<S>>,
    shared: Arc<Shared>,
    mut update: F,
    mut rng: SimRng,
    faults: Option<mpsc::UnboundedSender<StoreFault>>,
) where
    F: FnMut(&S, &mut SimRng) -> Result<S, SimError>,
{
    // First tick lands one full period after creation.
    let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;
        if shared.stopped.load(Ordering::SeqCst) {
            return;
        }

        let mut guard = state.write().await;
        if shared.stopped.load(Ordering::SeqCst) {
            return;
        }

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| update(&*guard, &mut rng)));
        let error = match outcome {
            Ok(Ok(next)) => {
                *guard = next;
                let ticks = shared.ticks.fetch_add(1, Ordering::SeqCst) + 1;
                tracing::trace!(store = %name, ticks, "Store ticked");
                continue;
            }
            Ok(Err(e)) => e,
            Err(payload) => SimError::UpdatePanicked(panic_message(payload.as_ref())),
        };
        drop(guard);

        let ticks = shared.ticks.load(Ordering::SeqCst);
        shared.stopped.store(true, Ordering::SeqCst);
        shared.set_status(StoreStatus::Failed(error.clone()));
        tracing::error!(store = %name, ticks, error = %error, "Store update failed, stopping");

        if let Some(tx) = faults {
            let fault = StoreFault {
                store: name.clone(),
                ticks,
                error,
            };
            if tx.send(fault).is_err() {
                tracing::warn!(store = %name, "Fault channel closed");
            }
        }
        return;
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
