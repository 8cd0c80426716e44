//! Trailing-edge event coalescing
//!
//! A burst of viewport-settled events should produce one evaluation, not
//! one per event. `Debouncer` keeps at most one pending timer; scheduling
//! again within the delay window aborts the pending timer and reschedules,
//! so only the last invocation of a burst runs. Cancellation stops at the
//! timer: an action whose delay has elapsed is already detached and keeps
//! running.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Default quiet period applied to viewport-settled triggers.
pub const VIEWPORT_SETTLE_DELAY: Duration = Duration::from_millis(400);

/// Delay-and-collapse wrapper around spawned futures.
pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Schedule `action` to run after the delay, replacing any pending run.
    /// Intermediate calls are dropped, not queued.
    ///
    /// Only the timer is cancellable: once the delay elapses the action is
    /// detached onto its own task and runs to completion even if a newer
    /// event reschedules or cancels in the meantime.
    pub fn schedule<F>(&mut self, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel_pending();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tokio::spawn(action);
        }));
    }

    /// Abort the pending timer, if any. An action whose delay has already
    /// elapsed is not affected.
    pub fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
