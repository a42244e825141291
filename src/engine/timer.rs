//! One-shot, cancellable timers for driving playback.
//!
//! A timer never calls back into the session itself. The host asks the timer
//! which handle is due and hands it to `Session::on_timer`, which ignores any
//! handle that is no longer the one it armed.

use std::time::{Duration, Instant};
use tracing::trace;

/// Identifies one armed timer. Handles are never reused by a timer instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

pub trait Timer {
    /// Arms a timer that becomes due after `delay`. Arming replaces any
    /// timer still pending, so at most one is outstanding.
    fn schedule(&mut self, delay: Duration) -> TimerHandle;

    /// Disarms `handle` if it is still pending.
    fn cancel(&mut self, handle: TimerHandle);
}

/// Wall-clock timer for event loops that poll with a timeout.
#[derive(Debug, Default)]
pub struct DeadlineTimer {
    next_generation: u64,
    pending: Option<(TimerHandle, Instant)>,
}

impl DeadlineTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// How long until the pending timer is due, zero if overdue.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.pending
            .map(|(_, deadline)| deadline.saturating_duration_since(now))
    }

    /// Takes the pending handle if its deadline has passed.
    pub fn poll_due(&mut self, now: Instant) -> Option<TimerHandle> {
        match self.pending {
            Some((handle, deadline)) if deadline <= now => {
                self.pending = None;
                Some(handle)
            }
            _ => None,
        }
    }
}

impl Timer for DeadlineTimer {
    fn schedule(&mut self, delay: Duration) -> TimerHandle {
        self.next_generation += 1;
        let handle = TimerHandle(self.next_generation);
        self.pending = Some((handle, Instant::now() + delay));
        trace!(generation = handle.0, delay_ms = delay.as_millis() as u64, "timer armed");
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if matches!(self.pending, Some((pending, _)) if pending == handle) {
            self.pending = None;
        }
    }
}

/// Timer on a virtual clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualTimer {
    now: Duration,
    next_generation: u64,
    pending: Option<(TimerHandle, Duration)>,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Delay left on the pending timer.
    pub fn remaining(&self) -> Option<Duration> {
        self.pending
            .map(|(_, deadline)| deadline.saturating_sub(self.now))
    }

    /// Moves the clock forward and returns the pending handle if it came due.
    pub fn advance_by(&mut self, delta: Duration) -> Option<TimerHandle> {
        self.now += delta;
        match self.pending {
            Some((handle, deadline)) if deadline <= self.now => {
                self.pending = None;
                Some(handle)
            }
            _ => None,
        }
    }

    /// Jumps straight to the pending deadline.
    pub fn fire_next(&mut self) -> Option<TimerHandle> {
        let remaining = self.remaining()?;
        self.advance_by(remaining)
    }
}

impl Timer for ManualTimer {
    fn schedule(&mut self, delay: Duration) -> TimerHandle {
        self.next_generation += 1;
        let handle = TimerHandle(self.next_generation);
        self.pending = Some((handle, self.now + delay));
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if matches!(self.pending, Some((pending, _)) if pending == handle) {
            self.pending = None;
        }
    }
}

/// Converts a millisecond duration from the scheduler into a `Duration`.
pub fn millis(ms: f64) -> Duration {
    Duration::from_nanos((ms.max(0.0) * 1_000_000.0).round() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_timer_fires_at_deadline() {
        let mut timer = ManualTimer::new();
        let handle = timer.schedule(Duration::from_millis(200));
        assert_eq!(timer.advance_by(Duration::from_millis(199)), None);
        assert_eq!(timer.advance_by(Duration::from_millis(1)), Some(handle));
        assert!(!timer.is_armed());
        assert_eq!(timer.now(), Duration::from_millis(200));
    }

    #[test]
    fn test_schedule_replaces_pending() {
        let mut timer = ManualTimer::new();
        let first = timer.schedule(Duration::from_millis(100));
        let second = timer.schedule(Duration::from_millis(300));
        assert_ne!(first, second);
        assert_eq!(timer.advance_by(Duration::from_millis(150)), None);
        assert_eq!(timer.fire_next(), Some(second));
    }

    #[test]
    fn test_cancel_disarms_only_matching_handle() {
        let mut timer = ManualTimer::new();
        let stale = timer.schedule(Duration::from_millis(100));
        let live = timer.schedule(Duration::from_millis(100));
        timer.cancel(stale);
        assert!(timer.is_armed());
        timer.cancel(live);
        assert!(!timer.is_armed());
        assert_eq!(timer.fire_next(), None);
    }

    #[test]
    fn test_generations_increase() {
        let mut timer = DeadlineTimer::new();
        let a = timer.schedule(Duration::from_secs(1));
        let b = timer.schedule(Duration::from_secs(1));
        assert!(b.generation() > a.generation());
    }

    #[test]
    fn test_deadline_timer_poll() {
        let mut timer = DeadlineTimer::new();
        let handle = timer.schedule(Duration::from_millis(50));
        let now = Instant::now();
        assert_eq!(timer.poll_due(now), None);
        assert!(timer.time_until_due(now).unwrap() <= Duration::from_millis(50));

        let later = now + Duration::from_millis(100);
        assert_eq!(timer.time_until_due(later), Some(Duration::ZERO));
        assert_eq!(timer.poll_due(later), Some(handle));
        assert!(!timer.is_armed());
    }

    #[test]
    fn test_millis_conversion() {
        assert_eq!(millis(250.0), Duration::from_millis(250));
        assert_eq!(millis(-3.0), Duration::ZERO);
    }
}
