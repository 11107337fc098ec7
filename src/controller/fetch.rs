//! Fetch lifecycle controller
//!
//! Wraps a zero-argument async producer and exposes `{data, loading, error}`
//! for one screen. Every fetch attempt captures a generation number when it
//! starts; its result is applied only if that generation is still current
//! when it settles. Starting a new fetch, `reset()` and dropping the
//! controller all advance the generation, so late completions from
//! superseded attempts are silently discarded instead of overwriting newer
//! state. In-flight producers are never aborted.

use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::future::{BoxFuture, FutureExt};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

// =============================================================================
// State
// =============================================================================

/// Failure reported by a producer, shareable across state snapshots
#[derive(Debug, Clone)]
pub struct FetchError(Arc<anyhow::Error>);

impl FetchError {
    /// Underlying producer error
    pub fn inner(&self) -> &anyhow::Error {
        &self.0
    }

    /// Downcast to a concrete error type (e.g. `CatalogError`)
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: fmt::Display + fmt::Debug + Send + Sync + 'static,
    {
        self.0.downcast_ref::<E>()
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#}", self.0)
    }
}

impl std::error::Error for FetchError {}

impl From<anyhow::Error> for FetchError {
    fn from(err: anyhow::Error) -> Self {
        Self(Arc::new(err))
    }
}

/// Observable state of one controller
#[derive(Debug, Clone)]
pub struct FetchState<T> {
    /// Last successfully fetched value, kept across refreshes
    pub data: Option<T>,
    /// True while the current attempt is in flight
    pub loading: bool,
    /// Failure of the most recent attempt, cleared when a new one starts
    pub error: Option<FetchError>,
    generation: u64,
}

impl<T> FetchState<T> {
    fn initial(loading: bool) -> Self {
        Self {
            data: None,
            loading,
            error: None,
            generation: 0,
        }
    }

    /// Generation of the attempt this state belongs to
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Nothing to show yet: loading with no previous data.
    /// Once data exists, refreshes keep showing it instead.
    pub fn is_initial_load(&self) -> bool {
        self.loading && self.data.is_none()
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self::initial(false)
    }
}

// =============================================================================
// Pending Completion
// =============================================================================

/// Completion signal for one fetch attempt.
///
/// Resolves once the attempt settles, whether its result was applied or
/// discarded as stale. Dropping it does not cancel the attempt.
#[derive(Debug)]
pub struct Pending {
    handle: JoinHandle<()>,
}

impl Future for Pending {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        Pin::new(&mut self.handle).poll(cx).map(|res| {
            if let Err(e) = res {
                warn!("fetch task ended abnormally: {}", e);
            }
        })
    }
}

// =============================================================================
// Controller
// =============================================================================

type Producer<T> = Arc<dyn Fn() -> BoxFuture<'static, anyhow::Result<T>> + Send + Sync>;

fn boxed<T, F, Fut>(producer: F) -> Producer<T>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<T>> + Send + 'static,
{
    Arc::new(move || producer().boxed())
}

struct Shared<T> {
    state: watch::Sender<FetchState<T>>,
    alive: AtomicBool,
}

impl<T> Shared<T> {
    /// Apply a settled attempt if it is still the current one
    fn settle(&self, generation: u64, outcome: anyhow::Result<T>) {
        let applied = self.state.send_if_modified(|s| {
            if !self.alive.load(Ordering::Acquire) || s.generation != generation {
                return false;
            }
            match outcome {
                Ok(data) => {
                    s.data = Some(data);
                    s.error = None;
                }
                Err(e) => {
                    debug!(generation, "fetch failed: {:#}", e);
                    s.error = Some(FetchError::from(e));
                }
            }
            s.loading = false;
            true
        });

        if applied {
            trace!(generation, "fetch settled");
        } else {
            debug!(generation, "discarding stale fetch result");
        }
    }
}

/// Request lifecycle controller for one screen.
///
/// `D` is the dependency value compared between renders; use a tuple to
/// depend on several values, or `()` for none.
pub struct FetchController<T, D = ()> {
    shared: Arc<Shared<T>>,
    producer: Producer<T>,
    auto_run: bool,
    deps: D,
}

impl<T> FetchController<T, ()>
where
    T: Clone + Send + Sync + 'static,
{
    /// Auto-running controller without dependencies
    pub fn auto<F, Fut>(producer: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<T>> + Send + 'static,
    {
        Self::new(producer, true, ())
    }
}

impl<T, D> FetchController<T, D>
where
    T: Clone + Send + Sync + 'static,
    D: PartialEq,
{
    /// Create a controller. With `auto_run` the first fetch starts
    /// immediately, so this must be called inside a tokio runtime.
    pub fn new<F, Fut>(producer: F, auto_run: bool, deps: D) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<T>> + Send + 'static,
    {
        let (state, _) = watch::channel(FetchState::initial(auto_run));
        let controller = Self {
            shared: Arc::new(Shared {
                state,
                alive: AtomicBool::new(true),
            }),
            producer: boxed(producer),
            auto_run,
            deps,
        };
        if auto_run {
            controller.start();
        }
        controller
    }

    /// Per-render update: install the current producer and compare deps.
    /// Returns true if a fetch was started.
    pub fn update<F, Fut>(&mut self, producer: F, deps: D) -> bool
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<T>> + Send + 'static,
    {
        self.producer = boxed(producer);
        self.set_deps(deps)
    }

    /// Replace the producer without fetching
    pub fn set_producer<F, Fut>(&mut self, producer: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<T>> + Send + 'static,
    {
        self.producer = boxed(producer);
    }

    /// Store new deps; starts a fetch when they differ and auto-run is on
    pub fn set_deps(&mut self, deps: D) -> bool {
        if deps == self.deps {
            return false;
        }
        self.deps = deps;
        if self.auto_run {
            self.start();
            true
        } else {
            false
        }
    }

    /// Current dependency value
    pub fn deps(&self) -> &D {
        &self.deps
    }

    /// Start exactly one new fetch, regardless of auto-run and deps
    pub fn refetch(&self) -> Pending {
        self.start()
    }

    /// Clear data and error, stop loading, and orphan any in-flight attempt
    pub fn reset(&self) {
        self.shared.state.send_modify(|s| {
            s.generation += 1;
            s.data = None;
            s.error = None;
            s.loading = false;
        });
        debug!("fetch state reset");
    }

    /// Snapshot of the current state
    pub fn state(&self) -> FetchState<T> {
        self.shared.state.borrow().clone()
    }

    pub fn data(&self) -> Option<T> {
        self.shared.state.borrow().data.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.shared.state.borrow().loading
    }

    pub fn error(&self) -> Option<FetchError> {
        self.shared.state.borrow().error.clone()
    }

    /// Receiver notified on every applied state change
    pub fn subscribe(&self) -> watch::Receiver<FetchState<T>> {
        self.shared.state.subscribe()
    }

    fn start(&self) -> Pending {
        let mut generation = 0;
        self.shared.state.send_modify(|s| {
            s.generation += 1;
            s.loading = true;
            s.error = None;
            generation = s.generation;
        });
        debug!(generation, "fetch started");

        let attempt = (self.producer)();
        let shared = Arc::clone(&self.shared);
        let handle = tokio::spawn(async move {
            let outcome = match AssertUnwindSafe(attempt).catch_unwind().await {
                Ok(outcome) => outcome,
                Err(_) => Err(anyhow::anyhow!("fetch producer panicked")),
            };
            shared.settle(generation, outcome);
        });

        Pending { handle }
    }
}

impl<T, D> Drop for FetchController<T, D> {
    fn drop(&mut self) {
        self.shared.alive.store(false, Ordering::Release);
        // Orphan in-flight attempts without notifying observers
        self.shared.state.send_if_modified(|s| {
            s.generation += 1;
            false
        });
    }
}

impl<T: fmt::Debug, D: fmt::Debug> fmt::Debug for FetchController<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchController")
            .field("state", &*self.shared.state.borrow())
            .field("auto_run", &self.auto_run)
            .field("deps", &self.deps)
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
