//! Debounced value controller
//!
//! Turns a rapidly changing input (search keystrokes) into a settled value
//! that only updates after the input has been unchanged for the delay.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{trace, warn};

/// Convert a configured delay in milliseconds, clamping negatives to zero
pub fn delay_from_millis(ms: i64) -> Duration {
    if ms < 0 {
        warn!(ms, "negative debounce delay, using 0");
        return Duration::ZERO;
    }
    Duration::from_millis(ms as u64)
}

/// Holds the last settled value and the pending update timer
pub struct Debouncer<T> {
    settled: Arc<watch::Sender<T>>,
    latest: T,
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl<T> Debouncer<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    pub fn new(initial: T, delay: Duration) -> Self {
        let (settled, _) = watch::channel(initial.clone());
        Self {
            settled: Arc::new(settled),
            latest: initial,
            delay,
            pending: None,
        }
    }

    /// Per-render call: feed the raw value and delay, get the settled value.
    /// Reschedules only when either input changed since the last call.
    pub fn update(&mut self, value: T, delay: Duration) -> T {
        if value != self.latest || delay != self.delay {
            self.latest = value;
            self.delay = delay;
            self.schedule();
        }
        self.value()
    }

    /// Feed a new raw value
    pub fn set(&mut self, value: T) {
        if value != self.latest {
            self.latest = value;
            self.schedule();
        }
    }

    /// Change the delay; restarts the pending timer
    pub fn set_delay(&mut self, delay: Duration) {
        if delay != self.delay {
            self.delay = delay;
            self.schedule();
        }
    }

    /// Current settled value
    pub fn value(&self) -> T {
        self.settled.borrow().clone()
    }

    /// Latest raw value fed in
    pub fn latest(&self) -> &T {
        &self.latest
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// True while an update is scheduled but has not fired
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Receiver notified each time the settled value changes
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.settled.subscribe()
    }

    fn schedule(&mut self) {
        self.cancel();

        let settled = Arc::clone(&self.settled);
        let value = self.latest.clone();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            // Zero delay publishes on the task's first poll
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            let changed = settled.send_if_modified(|current| {
                if *current == value {
                    return false;
                }
                *current = value;
                true
            });
            trace!(changed, "debounced value settled");
        }));
    }

    fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Debouncer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debouncer")
            .field("settled", &*self.settled.borrow())
            .field("latest", &self.latest)
            .field("delay", &self.delay)
            .finish()
    }
}
