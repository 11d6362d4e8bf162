// File: src/debounce.rs
//! Cancel-and-reschedule debouncing against an injectable clock.
//!
//! A `Debouncer` holds at most one pending value. Every `push` replaces the
//! pending value and moves the deadline to `now + interval`; `poll` hands the
//! value out once the deadline has passed. Nothing runs on its own: the owner
//! decides when to poll (an event loop tick, or a test after advancing a
//! `ManualClock`).

use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Source of the current time.
///
/// The trait is object-safe so callers can hold `Arc<dyn Clock>`.
pub trait Clock: Send + Sync + fmt::Debug {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Arc::new(Mutex::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

pub type SharedClock = Arc<dyn Clock>;

#[derive(Debug)]
struct Pending<T> {
    value: T,
    deadline: Instant,
}

#[derive(Debug)]
pub struct Debouncer<T> {
    clock: SharedClock,
    interval: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    pub fn new(clock: SharedClock, interval: Duration) -> Self {
        Self {
            clock,
            interval,
            pending: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Schedules `value`, superseding anything still pending.
    pub fn push(&mut self, value: T) {
        let deadline = self.clock.now() + self.interval;
        if self.pending.is_some() {
            log::trace!("Debounce: superseding pending value");
        }
        self.pending = Some(Pending { value, deadline });
    }

    /// Returns the pending value if its quiet interval has elapsed.
    /// A value is handed out at most once.
    pub fn poll(&mut self) -> Option<T> {
        let now = self.clock.now();
        match &self.pending {
            Some(p) if now >= p.deadline => self.pending.take().map(|p| p.value),
            _ => None,
        }
    }

    /// Drops the pending value without delivering it.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    /// Time left until the pending value is due, zero if already due.
    pub fn remaining(&self) -> Option<Duration> {
        let now = self.clock.now();
        self.deadline().map(|d| d.saturating_duration_since(now))
    }
}
