//! Cooperative one-shot cancellation.
//!
//! A [`CancelToken`] is a monotonic "stop requested" flag: once set it stays
//! set for the rest of the owning job's life and is never reused across
//! jobs. Waits are a timer raced against the flag, so a cancel during a
//! backoff or poll interval takes effect immediately instead of at the next
//! flag check.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

/// Cloneable one-shot stop flag shared between a job and its owner.
#[derive(Debug, Clone)]
pub struct CancelToken {
    tx: Arc<watch::Sender<bool>>,
}

impl CancelToken {
    /// Create a new token in the not-cancelled state.
    pub fn new() -> Self {
        Self {
            tx: Arc::new(watch::Sender::new(false)),
        }
    }

    /// Request cancellation. Idempotent; the flag never resets.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    /// Returns `true` once cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    /// Resolves when cancellation is requested (immediately if it already
    /// was).
    pub async fn cancelled(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives as long as `self`, so wait_for cannot fail here.
        let _ = rx.wait_for(|&stop| stop).await;
    }

    /// Sleep for `dur` unless cancelled first.
    ///
    /// Returns `true` if the full duration elapsed, `false` if the wait was
    /// cut short by cancellation.
    pub async fn wait(&self, dur: Duration) -> bool {
        tokio::select! {
            _ = tokio::time::sleep(dur) => true,
            _ = self.cancelled() => false,
        }
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}
