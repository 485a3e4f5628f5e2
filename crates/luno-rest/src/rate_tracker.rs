//! Thread-safe rolling call counter for a Luno client
//!
//! Wraps a [`CallWindow`] so clones of the client and concurrent requests
//! share one window. The tracker never delays or rejects a call; it only
//! reports how many calls were sent in the trailing minute.
//!
//! While the window holds entries a background refresh task is armed. It
//! wakes once the window span has passed since the last prune, prunes again,
//! and either re-arms or releases itself when the window is empty. The task
//! holds a weak reference only, so it never keeps the tracker alive, and the
//! count never depends on it: every read prunes from scratch.

use std::sync::{Arc, Weak};
use std::time::Duration;

use luno_types::CallWindow;
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::trace;

use crate::clock::{Clock, SystemClock};

/// Shared rolling window of call timestamps
#[derive(Debug, Clone)]
pub struct RateTracker {
    shared: Arc<Shared>,
}

#[derive(Debug)]
struct Shared {
    clock: Arc<dyn Clock>,
    span: Duration,
    state: Mutex<TrackerState>,
}

#[derive(Debug)]
struct TrackerState {
    window: CallWindow,
    refresh: Option<RefreshTimer>,
}

#[derive(Debug)]
struct RefreshTimer {
    deadline: Instant,
    task: JoinHandle<()>,
}

impl Default for RateTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl RateTracker {
    /// Create a tracker on the system clock
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create a tracker on a custom clock
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        let window = CallWindow::new();
        let span = window.window();
        Self {
            shared: Arc::new(Shared {
                clock,
                span,
                state: Mutex::new(TrackerState {
                    window,
                    refresh: None,
                }),
            }),
        }
    }

    /// Record a call sent now and return the stored timestamp
    ///
    /// The returned value is what [`RateTracker::retract`] expects back.
    pub fn record(&self) -> u64 {
        let now = self.shared.clock.now_ms();
        let mut state = self.shared.state.lock();
        let stamp = state.window.record(now);

        if state.refresh.is_none() {
            state.refresh = arm_refresh(&self.shared);
        }

        trace!(stamp, "Recorded call");
        stamp
    }

    /// Forget the most recent call recorded at `stamp`
    ///
    /// Returns `false` if no entry matched, e.g. it was already pruned.
    pub fn retract(&self, stamp: u64) -> bool {
        let mut state = self.shared.state.lock();
        state.window.retract(stamp)
    }

    /// Calls recorded in the trailing window
    pub fn count(&self) -> usize {
        let mut state = self.shared.state.lock();
        prune_locked(&self.shared, &mut state)
    }

    /// Whether the background refresh task is currently armed
    pub fn is_refresh_armed(&self) -> bool {
        self.shared.state.lock().refresh.is_some()
    }

    /// Stored entries without pruning first
    pub fn stored(&self) -> usize {
        self.shared.state.lock().window.len()
    }

    /// Span of the rolling window
    pub fn window(&self) -> Duration {
        self.shared.span
    }
}

/// Prune stale entries, then re-arm or release the refresh task
fn prune_locked(shared: &Arc<Shared>, state: &mut TrackerState) -> usize {
    let remaining = state.window.prune(shared.clock.now_ms());

    if remaining == 0 {
        if let Some(timer) = state.refresh.take() {
            timer.task.abort();
            trace!("Rate window empty, refresh released");
        }
    } else {
        match state.refresh.as_mut() {
            Some(timer) => timer.deadline = Instant::now() + shared.span,
            None => state.refresh = arm_refresh(shared),
        }
    }

    remaining
}

/// Spawn the refresh task, if a tokio runtime is available
fn arm_refresh(shared: &Arc<Shared>) -> Option<RefreshTimer> {
    let handle = tokio::runtime::Handle::try_current().ok()?;
    let deadline = Instant::now() + shared.span;
    let task = handle.spawn(run_refresh(Arc::downgrade(shared), deadline));

    Some(RefreshTimer { deadline, task })
}

async fn run_refresh(weak: Weak<Shared>, mut deadline: Instant) {
    loop {
        tokio::time::sleep_until(deadline).await;

        let Some(shared) = weak.upgrade() else {
            return;
        };

        let next = {
            let mut state = shared.state.lock();
            let extended = match state.refresh.as_ref() {
                None => return,
                Some(timer) => timer.deadline > deadline,
            };

            if !extended {
                prune_locked(&shared, &mut state);
            }

            match state.refresh.as_ref() {
                Some(timer) => timer.deadline,
                None => return,
            }
        };

        deadline = next;
    }
}
