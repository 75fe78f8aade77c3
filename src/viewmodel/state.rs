//! Load state machine and in-flight guards shared by every screen
//!
//! A screen's data moves through `Idle -> Loading -> {Ready | Failed}` and
//! returns to `Loading` on refresh. Mutations run outside that machine, each
//! behind its own [`ActionGuard`].

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::{ClientResult, FittrackError};

/// Phase of a screen's load state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Ready,
    Failed,
}

/// Loaded data plus the phase it is in.
///
/// `data` survives a failed refresh, so a screen that loaded once keeps
/// showing its last good data next to the error.
#[derive(Debug, Clone)]
pub struct Loadable<T> {
    phase: Phase,
    data: Option<T>,
    error: Option<Arc<FittrackError>>,
}

impl<T> Default for Loadable<T> {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            data: None,
            error: None,
        }
    }
}

impl<T> Loadable<T> {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Last successfully loaded data, if any
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Error of the latest load, while in [`Phase::Failed`]
    pub fn error(&self) -> Option<&Arc<FittrackError>> {
        self.error.as_ref()
    }

    /// Enters `Loading`. Returns `false` when a load is already running.
    pub fn begin(&mut self) -> bool {
        if self.phase == Phase::Loading {
            return false;
        }
        self.phase = Phase::Loading;
        true
    }

    pub fn succeed(&mut self, data: T) {
        self.phase = Phase::Ready;
        self.data = Some(data);
        self.error = None;
    }

    /// Replaces the data without ending a running load.
    ///
    /// Outside `Loading` the state becomes `Ready`.
    pub fn put(&mut self, data: T) {
        self.data = Some(data);
        if self.phase != Phase::Loading {
            self.phase = Phase::Ready;
            self.error = None;
        }
    }

    /// Enters `Failed`, keeping previously loaded data.
    pub fn fail(&mut self, error: Arc<FittrackError>) {
        self.phase = Phase::Failed;
        self.error = Some(error);
    }

    /// Mutable access for local patches after a successful mutation.
    pub fn data_mut(&mut self) -> Option<&mut T> {
        self.data.as_mut()
    }
}

/// Result of asking a screen to load
#[derive(Debug, Clone)]
pub enum LoadOutcome {
    /// The fetch succeeded and the screen is `Ready`
    Ready,
    /// The fetch failed and the screen is `Failed`
    Failed(Arc<FittrackError>),
    /// A load was already in flight; no request was issued
    AlreadyLoading,
    /// The screen was unmounted before the response arrived
    Discarded,
}

impl LoadOutcome {
    pub fn is_ready(&self) -> bool {
        matches!(self, LoadOutcome::Ready)
    }
}

/// Result of a user-initiated mutation
#[derive(Debug, Clone, PartialEq)]
pub enum Submission<T> {
    /// The request completed and local state was updated
    Completed(T),
    /// The same action was already in flight; no request was issued
    Suppressed,
    /// The screen was unmounted before the response arrived
    Discarded,
}

impl<T> Submission<T> {
    pub fn completed(self) -> Option<T> {
        match self {
            Submission::Completed(v) => Some(v),
            _ => None,
        }
    }
}

/// Whether a screen is still the active consumer of its results.
#[derive(Debug)]
pub struct Mount(AtomicBool);

impl Default for Mount {
    fn default() -> Self {
        Self(AtomicBool::new(true))
    }
}

impl Mount {
    pub fn is_active(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Marks the screen gone; late results are dropped from now on.
    pub fn unmount(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Boolean in-flight guard for one mutating action.
#[derive(Debug)]
pub struct ActionGuard {
    name: &'static str,
    in_flight: AtomicBool,
}

impl ActionGuard {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Claims the guard, or returns `None` while another call holds it.
    ///
    /// The claim is released when the returned token is dropped, including
    /// on error paths.
    pub fn try_begin(&self) -> Option<InFlight<'_>> {
        match self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        {
            Ok(_) => Some(InFlight(self)),
            Err(_) => {
                tracing::debug!(action = self.name, "Suppressed duplicate submission");
                None
            }
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }
}

/// Token held while a guarded action runs
#[derive(Debug)]
pub struct InFlight<'a>(&'a ActionGuard);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.in_flight.store(false, Ordering::SeqCst);
    }
}

/// Local update recorded while a load is running
type LocalUpdate<T> = Box<dyn Fn(&mut T) + Send>;

struct ScreenState<T> {
    loadable: Loadable<T>,
    /// Replayed over the result of the running load
    pending: Vec<LocalUpdate<T>>,
}

/// A screen's load state plus its mount flag.
///
/// Local updates made while a load is in flight are applied to the current
/// data and replayed over the late result, so the result of a fetch that
/// started before the update never drops it.
pub struct Screen<T> {
    name: &'static str,
    state: Mutex<ScreenState<T>>,
    mount: Mount,
}

impl<T> std::fmt::Debug for Screen<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Screen")
            .field("name", &self.name)
            .field("mount", &self.mount)
            .finish_non_exhaustive()
    }
}

impl<T: Clone> Screen<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            state: Mutex::new(ScreenState {
                loadable: Loadable::default(),
                pending: Vec::new(),
            }),
            mount: Mount::default(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ScreenState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> Loadable<T> {
        self.lock().loadable.clone()
    }

    pub fn phase(&self) -> Phase {
        self.lock().loadable.phase()
    }

    /// Copy of the last loaded data
    pub fn data(&self) -> Option<T> {
        self.lock().loadable.data().cloned()
    }

    pub fn error(&self) -> Option<Arc<FittrackError>> {
        self.lock().loadable.error().cloned()
    }

    pub fn mount(&self) -> &Mount {
        &self.mount
    }

    pub fn is_mounted(&self) -> bool {
        self.mount.is_active()
    }

    pub fn unmount(&self) {
        tracing::debug!(screen = self.name, "Unmounted");
        self.mount.unmount();
    }

    /// Applies a confirmed mutation to the local data.
    ///
    /// The update runs on the current data, if any. While a load is running
    /// it is also kept and replayed over that load's result. The phase is
    /// never changed. Returns `false` when there is no data and no load to
    /// replay over, i.e. the update had no effect.
    pub fn local_update(&self, update: impl Fn(&mut T) + Send + 'static) -> bool {
        let mut state = self.lock();
        let applied = match state.loadable.data_mut() {
            Some(data) => {
                update(data);
                true
            }
            None => false,
        };
        if state.loadable.phase() == Phase::Loading {
            tracing::debug!(screen = self.name, "Queued local update behind running load");
            state.pending.push(Box::new(update));
            return true;
        }
        applied
    }

    /// Replaces the data. A running load stays `Loading`; otherwise the
    /// screen enters `Ready`.
    pub fn set(&self, data: T) {
        self.lock().loadable.put(data);
    }

    /// Runs one load transition.
    ///
    /// Issues `fetch` exactly once unless a load is already running. The
    /// result is applied only while the screen is still mounted.
    pub async fn load_with<F, Fut>(&self, fetch: F) -> LoadOutcome
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ClientResult<T>>,
    {
        if !self.lock().loadable.begin() {
            tracing::debug!(screen = self.name, "Load already in flight");
            return LoadOutcome::AlreadyLoading;
        }
        tracing::debug!(screen = self.name, "Loading");

        let result = fetch().await;

        let mut state = self.lock();
        let pending = std::mem::take(&mut state.pending);
        if !self.mount.is_active() {
            tracing::debug!(screen = self.name, "Discarding result for unmounted screen");
            return LoadOutcome::Discarded;
        }

        match result {
            Ok(mut data) => {
                for update in &pending {
                    update(&mut data);
                }
                state.loadable.succeed(data);
                tracing::info!(screen = self.name, replayed = pending.len(), "Ready");
                LoadOutcome::Ready
            }
            Err(e) => {
                // Previous data already carries the local updates.
                tracing::warn!(screen = self.name, "Load failed: {}", e);
                let error = Arc::new(e);
                state.loadable.fail(error.clone());
                LoadOutcome::Failed(error)
            }
        }
    }
}
