//! Trailing-edge debouncing driven by an explicit clock.

use std::time::{Duration, Instant};

/// Coalesces calls that arrive within `wait` of each other.
///
/// Only the last call's argument survives, and it becomes due `wait` after
/// that last call. Time is passed in by the caller, so the debouncer works the
/// same under a real event loop and in tests.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    wait: Duration,
    pending: Option<Pending<T>>,
}

#[derive(Debug, Clone)]
struct Pending<T> {
    due: Instant,
    arg: T,
}

impl<T> Debouncer<T> {
    /// Creates a debouncer with the given window.
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            pending: None,
        }
    }

    /// Records a call, replacing any pending one.
    pub fn call(&mut self, arg: T, now: Instant) {
        self.pending = Some(Pending {
            due: now + self.wait,
            arg,
        });
    }

    /// Returns when the pending call becomes due.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.due)
    }

    /// Returns whether a call is waiting.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Takes the pending call if it is due at `now`.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some(p) if p.due <= now => self.pending.take().map(|p| p.arg),
            _ => None,
        }
    }

    /// Takes the pending call regardless of its deadline.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.arg)
    }

    /// Drops the pending call.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
