//! Single-flight polling of the backing player
//!
//! One task per player: sleep for the period, fetch a sample, reconcile it,
//! and only then wait for the next period. Ticks never overlap, and a failed
//! fetch simply skips that tick.

use audic_core::{BackingPlayer, Polling};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::player::Shared;

#[derive(Default)]
struct PollerState {
    task: Option<JoinHandle<()>>,
    shut_down: bool,
}

/// Owner of the polling task
pub(crate) struct Poller {
    period: Duration,
    state: Mutex<PollerState>,
}

impl Poller {
    pub(crate) fn new(period: Duration) -> Self {
        Self {
            period,
            state: Mutex::new(PollerState::default()),
        }
    }

    /// Start sampling; no-op while a cycle is already running or after shutdown
    pub(crate) fn start(&self, backend: Arc<dyn BackingPlayer>, shared: Arc<Shared>) {
        let mut state = lock(&self.state);

        if state.shut_down {
            return;
        }

        if state.task.as_ref().is_some_and(|task| !task.is_finished()) {
            return;
        }

        debug!("Starting poll cycle every {:?}", self.period);
        state.task = Some(tokio::spawn(poll_loop(self.period, backend, shared)));
    }

    /// Replace the current cycle with a fresh one
    ///
    /// Used after end-of-media, when the old task may still be winding down.
    pub(crate) fn restart(&self, backend: Arc<dyn BackingPlayer>, shared: Arc<Shared>) {
        self.stop();
        self.start(backend, shared);
    }

    /// Stop sampling; safe when not running
    pub(crate) fn stop(&self) {
        if let Some(task) = lock(&self.state).task.take() {
            task.abort();
        }
    }

    /// Stop sampling for good; later `start` calls are ignored
    pub(crate) fn shutdown(&self) {
        let mut state = lock(&self.state);
        state.shut_down = true;
        if let Some(task) = state.task.take() {
            task.abort();
        }
    }

    pub(crate) fn is_running(&self) -> bool {
        lock(&self.state)
            .task
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.shutdown();
    }
}

async fn poll_loop(period: Duration, backend: Arc<dyn BackingPlayer>, shared: Arc<Shared>) {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let sample = match backend.info().await {
            Ok(sample) => sample,
            Err(e) => {
                debug!("Skipping poll tick: {}", e);
                continue;
            }
        };

        if shared.reconcile(sample) == Polling::Stop {
            info!("End of media reached, polling stopped");
            break;
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}
