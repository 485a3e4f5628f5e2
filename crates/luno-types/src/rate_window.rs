//! Rolling window of API call timestamps
//!
//! Luno counts calls per client over a trailing minute. [`CallWindow`] keeps
//! the send time of each call the client issued and reports how many fall
//! inside that minute. It never blocks or rejects a call; it only reports.
//!
//! The window is a plain value with no clock of its own: every operation
//! takes "now" explicitly so the pruning rule can be exercised without
//! waiting on the wall clock.

use std::collections::VecDeque;
use std::time::Duration;

/// Length of the trailing window Luno applies its call limits over
pub const RATE_WINDOW: Duration = Duration::from_secs(60);

/// [`RATE_WINDOW`] in milliseconds
pub const RATE_WINDOW_MS: u64 = 60_000;

/// Chronologically ordered call timestamps (milliseconds since the Unix epoch)
///
/// Timestamps are appended in the order calls are sent, so the head is always
/// the oldest entry and pruning can stop at the first entry still in range.
#[derive(Debug, Clone)]
pub struct CallWindow {
    stamps: VecDeque<u64>,
    window_ms: u64,
}

impl Default for CallWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl CallWindow {
    /// Create an empty window spanning [`RATE_WINDOW`]
    pub fn new() -> Self {
        Self::with_window(RATE_WINDOW)
    }

    /// Create an empty window with a custom span
    pub fn with_window(window: Duration) -> Self {
        Self {
            stamps: VecDeque::new(),
            window_ms: window.as_millis() as u64,
        }
    }

    /// The span of the window
    pub fn window(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }

    /// Append a call timestamp
    ///
    /// A timestamp earlier than the current tail (wall clock stepped back) is
    /// clamped to the tail so the sequence stays non-decreasing.
    pub fn record(&mut self, timestamp_ms: u64) -> u64 {
        let stamp = match self.stamps.back() {
            Some(&last) if timestamp_ms < last => last,
            _ => timestamp_ms,
        };
        self.stamps.push_back(stamp);
        stamp
    }

    /// Remove the most recent entry equal to `timestamp_ms`
    ///
    /// Scans from the tail, so among equal timestamps the one added last is
    /// removed. Returns `false` when no entry matches (already pruned).
    pub fn retract(&mut self, timestamp_ms: u64) -> bool {
        let found = self
            .stamps
            .iter()
            .rposition(|&stamp| stamp == timestamp_ms);

        match found {
            Some(index) => {
                self.stamps.remove(index);
                true
            }
            None => false,
        }
    }

    /// Drop entries older than `now_ms - window` and return how many remain
    pub fn prune(&mut self, now_ms: u64) -> usize {
        let cutoff = now_ms.saturating_sub(self.window_ms);
        while let Some(&oldest) = self.stamps.front() {
            if oldest >= cutoff {
                break;
            }
            self.stamps.pop_front();
        }
        self.stamps.len()
    }

    /// Number of stored entries, without pruning
    pub fn len(&self) -> usize {
        self.stamps.len()
    }

    /// Whether no entries are stored
    pub fn is_empty(&self) -> bool {
        self.stamps.is_empty()
    }

    /// Most recently recorded timestamp
    pub fn latest(&self) -> Option<u64> {
        self.stamps.back().copied()
    }

    /// Oldest stored timestamp
    pub fn oldest(&self) -> Option<u64> {
        self.stamps.front().copied()
    }

    /// Iterate stored timestamps, oldest first
    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.stamps.iter().copied()
    }
}
