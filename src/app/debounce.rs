//! Search debounce
//!
//! Typed input is held until no new input has arrived for the configured
//! delay. Each new value restarts the delay and replaces the pending one.
//! Time is passed in explicitly so callers decide the clock.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Hold `value`, due `delay` after `now`. Replaces any pending value.
    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some((now + self.delay, value));
    }

    #[allow(dead_code)]
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(_, v)| v)
    }

    #[allow(dead_code)]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value becomes due
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(at, _)| *at)
    }

    /// Time left until the pending value is due, zero if already due
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline().map(|at| at.saturating_duration_since(now))
    }

    /// Take the pending value if its delay has elapsed
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.pending {
            Some((at, _)) if at <= now => self.pending.take().map(|(_, v)| v),
            _ => None,
        }
    }

    /// Take the pending value regardless of the delay
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(_, v)| v)
    }
}
