//! Quiet-period debouncing for rapidly changing input (the search box).
//!
//! [`Debouncer`] is a clock-agnostic state machine: callers feed it values
//! and the current [`Instant`], and it reports when a value has stayed
//! unchanged for the whole quiet period. Using `tokio::time::Instant` keeps
//! it compatible with paused-clock tests.

use std::time::Duration;

use tokio::time::Instant;

/// Quiet period applied to the post search query.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Holds the last settled value plus at most one pending value.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    quiet: Duration,
    settled: T,
    pending: Option<Pending<T>>,
}

#[derive(Debug, Clone)]
struct Pending<T> {
    value: T,
    deadline: Instant,
}

impl<T: Clone + PartialEq> Debouncer<T> {
    pub fn new(initial: T, quiet: Duration) -> Self {
        Self {
            quiet,
            settled: initial,
            pending: None,
        }
    }

    /// Record a new input value observed at `now`.
    ///
    /// Every push restarts the quiet period, so a burst of keystrokes only
    /// settles once, on the last value.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some(Pending {
            value,
            deadline: now + self.quiet,
        });
    }

    /// Promote the pending value if its quiet period has elapsed by `now`.
    ///
    /// Returns `true` when the settled value actually changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        let due = matches!(&self.pending, Some(p) if p.deadline <= now);
        if !due {
            return false;
        }
        let Some(pending) = self.pending.take() else {
            return false;
        };
        if pending.value == self.settled {
            return false;
        }
        self.settled = pending.value;
        true
    }

    /// The value currently in effect.
    pub fn settled(&self) -> &T {
        &self.settled
    }

    /// When the pending value will settle, if one is waiting.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
