//! Resize event pipeline (throttle + debounce)
//!
//! Raw window resize events arrive in bursts. A burst must produce a single
//! layout recalculation once it is over, and two recalculations must never
//! be closer than the throttle window. Only the latest event matters; there
//! is no queue.
//!
//! Time is passed in explicitly as the offset from an arbitrary origin
//! (`performance.now()` in the browser, a virtual clock in tests). Timers
//! may fire slightly before the deadline they were armed for; the last
//! outstanding wake-up re-arms for the remainder instead of dropping the
//! burst.

use std::time::Duration;

use crate::config::ResizeConfig;

#[derive(Debug, Clone)]
pub struct ResizePipeline {
    throttle: Duration,
    debounce: Duration,
    last_event: Option<Duration>,
    last_delivery: Option<Duration>,
    /// Wake-ups handed out and not yet run
    armed: usize,
}

/// Outcome of one scheduled wake-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wake {
    /// The burst is over: recalculate now
    Deliver,
    /// Woke early and no later wake-up is outstanding: wait this much more
    Rearm(Duration),
    /// Nothing to do; a later wake-up covers the pending burst, if any
    Idle,
}

impl ResizePipeline {
    pub const fn new(throttle: Duration, debounce: Duration) -> Self {
        Self {
            throttle,
            debounce,
            last_event: None,
            last_delivery: None,
            armed: 0,
        }
    }

    pub const fn from_config(config: &ResizeConfig) -> Self {
        Self::new(
            Duration::from_millis(config.throttle_ms),
            Duration::from_millis(config.debounce_ms),
        )
    }

    /// Record a raw resize event at `now`.
    ///
    /// Returns how long the caller should wait before calling [`wake`].
    /// Earlier waits that are still armed become stale.
    ///
    /// [`wake`]: Self::wake
    pub fn record(&mut self, now: Duration) -> Duration {
        self.last_event = Some(now);
        self.armed += 1;
        self.deadline()
            .map_or(Duration::ZERO, |deadline| deadline.saturating_sub(now))
    }

    /// When the pending delivery becomes due, if any event is pending
    pub fn deadline(&self) -> Option<Duration> {
        let quiet = self.last_event? + self.debounce;
        let spaced = self
            .last_delivery
            .map_or(Duration::ZERO, |delivered| delivered + self.throttle);
        Some(quiet.max(spaced))
    }

    pub const fn is_pending(&self) -> bool {
        self.last_event.is_some()
    }

    /// True exactly once per burst, when the deadline has passed.
    pub fn poll(&mut self, now: Duration) -> bool {
        match self.deadline() {
            Some(deadline) if now >= deadline => {
                self.last_event = None;
                self.last_delivery = Some(now);
                true
            }
            _ => false,
        }
    }

    /// A wake-up handed out by [`record`](Self::record) or a previous
    /// [`Wake::Rearm`] has run at `now`.
    pub fn wake(&mut self, now: Duration) -> Wake {
        self.armed = self.armed.saturating_sub(1);
        if self.poll(now) {
            return Wake::Deliver;
        }
        match self.deadline() {
            Some(deadline) if self.armed == 0 => {
                self.armed += 1;
                Wake::Rearm(deadline.saturating_sub(now))
            }
            _ => Wake::Idle,
        }
    }
}

impl Default for ResizePipeline {
    fn default() -> Self {
        Self::from_config(&ResizeConfig::default())
    }
}
