//! Readiness barrier
//!
//! A one-shot barrier between the asynchronous startup of a backing player and
//! the commands issued against it. Commands await [`ReadinessGate::wait`] and
//! proceed once startup resolved; construction never blocks.

use audic_core::{AudicError, Result};
use tokio::sync::watch;

#[derive(Debug)]
enum Readiness<T> {
    Starting,
    Ready(T),
    Failed(AudicError),
    Closed,
}

/// One-shot readiness barrier carrying the started value
#[derive(Debug)]
pub struct ReadinessGate<T> {
    tx: watch::Sender<Readiness<T>>,
}

impl<T: Clone> ReadinessGate<T> {
    /// Create a gate in the starting state
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Readiness::Starting);
        Self { tx }
    }

    /// Resolve the gate with the started value
    ///
    /// Hands the value back if the gate was already closed or failed, so the
    /// caller can release it.
    pub fn open(&self, value: T) -> std::result::Result<(), T> {
        let mut value = Some(value);
        self.tx.send_if_modified(|state| {
            if !matches!(state, Readiness::Starting) {
                return false;
            }
            match value.take() {
                Some(v) => {
                    *state = Readiness::Ready(v);
                    true
                }
                None => false,
            }
        });

        match value {
            None => Ok(()),
            Some(v) => Err(v),
        }
    }

    /// Resolve the gate with a startup failure
    pub fn fail(&self, error: AudicError) {
        self.tx.send_if_modified(|state| {
            if matches!(state, Readiness::Starting) {
                *state = Readiness::Failed(error);
                true
            } else {
                false
            }
        });
    }

    /// Close the gate for good, returning the started value if there was one
    pub fn close(&self) -> Option<T> {
        match self.tx.send_replace(Readiness::Closed) {
            Readiness::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// Wait until startup resolved
    pub async fn wait(&self) -> Result<T> {
        let mut rx = self.tx.subscribe();
        let state = rx
            .wait_for(|state| !matches!(state, Readiness::Starting))
            .await
            .map_err(|_| AudicError::Destroyed)?;

        match &*state {
            Readiness::Ready(value) => Ok(value.clone()),
            Readiness::Failed(error) => Err(error.clone()),
            Readiness::Closed | Readiness::Starting => Err(AudicError::Destroyed),
        }
    }

    /// Started value, if startup already succeeded
    pub fn get(&self) -> Option<T> {
        match &*self.tx.borrow() {
            Readiness::Ready(value) => Some(value.clone()),
            _ => None,
        }
    }

    pub fn is_starting(&self) -> bool {
        matches!(*self.tx.borrow(), Readiness::Starting)
    }

    pub fn is_failed(&self) -> bool {
        matches!(*self.tx.borrow(), Readiness::Failed(_))
    }

    pub fn is_closed(&self) -> bool {
        matches!(*self.tx.borrow(), Readiness::Closed)
    }
}

impl<T: Clone> Default for ReadinessGate<T> {
    fn default() -> Self {
        Self::new()
    }
}
