//! # Debounced Rescan
//!
//! Single-slot timer for work that should run once the document has been
//! quiet for a while.
//!
//! - `schedule` cancels whatever is pending and starts the window again
//! - `cancel` drops the pending callback without running it
//! - dropping the `Debouncer` cancels too, so nothing fires after teardown

use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

#[derive(Debug)]
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

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `callback` after the quiescence window unless rescheduled first.
    ///
    /// Outside a tokio runtime there is no timer to wait on, so the callback
    /// runs immediately.
    pub fn schedule<F>(&mut self, callback: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();

        let Ok(handle) = Handle::try_current() else {
            tracing::warn!("No async runtime available, running debounced callback now");
            callback();
            return;
        };

        let delay = self.delay;
        self.pending = Some(handle.spawn(async move {
            tokio::time::sleep(delay).await;
            callback();
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }

    /// Whether a callback is waiting to fire
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|pending| !pending.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
