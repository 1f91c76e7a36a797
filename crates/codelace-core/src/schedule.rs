//! Reconciliation scheduling: trailing-edge debounce with an immediate
//! bypass.
//!
//! At most one reconciliation is ever outstanding. Every request cancels a
//! not-yet-fired pending entry and re-arms at the requested latency, so a
//! burst of requests collapses into one reconciliation at the latency of the
//! last request. [`Latency::Immediate`] still cancels the pending entry but
//! tells the caller to run the reconciliation synchronously instead of
//! arming a timer.
//!
//! The scheduler holds no real timer; the host loop (or a test) pumps it
//! with [`Scheduler::poll`] and an `Instant`, which keeps the whole core
//! single-threaded and deterministic.

use std::time::{Duration, Instant};

/// Named delay tier for a requested reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Latency {
    /// Run synchronously, before the requesting call returns.
    Immediate,
    /// ~10ms: paste and other structural edits.
    Fast,
    /// ~50ms: programmatic text replacement.
    Normal,
    /// ~250ms: steady-state "typing settled".
    Slow,
}

impl Latency {
    pub fn delay(self) -> Duration {
        match self {
            Latency::Immediate => Duration::ZERO,
            Latency::Fast => Duration::from_millis(10),
            Latency::Normal => Duration::from_millis(50),
            Latency::Slow => Duration::from_millis(250),
        }
    }
}

/// The single outstanding reconciliation, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pending {
    pub latency: Latency,
    pub due: Instant,
}

/// Single-slot debounce state. Inspectable so tests and hosts can ask
/// whether a reconciliation is pending and when it is due.
#[derive(Debug, Default)]
pub struct Scheduler {
    pending: Option<Pending>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel any pending entry and re-arm at `latency`.
    ///
    /// Returns `true` when the caller must run the reconciliation now
    /// (the immediate bypass); otherwise the entry waits for [`poll`].
    ///
    /// [`poll`]: Scheduler::poll
    pub fn request(&mut self, latency: Latency, now: Instant) -> bool {
        self.pending = None;
        if latency == Latency::Immediate {
            return true;
        }
        self.pending = Some(Pending {
            latency,
            due: now + latency.delay(),
        });
        false
    }

    /// Take the pending entry if its deadline has passed at `now`.
    ///
    /// Returns `true` when the caller must run the reconciliation.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.pending {
            Some(pending) if pending.due <= now => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending_latency(&self) -> Option<Latency> {
        self.pending.map(|pending| pending.latency)
    }

    /// Time remaining until the pending entry is due, zero if overdue.
    pub fn due_in(&self, now: Instant) -> Option<Duration> {
        self.pending
            .map(|pending| pending.due.saturating_duration_since(now))
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
