//! Cancellable timers over an injectable clock.
//!
//! The event handler never sleeps. When it wants something to happen later it
//! emits [`Action::ScheduleTimer`](crate::app::Action::ScheduleTimer); the
//! runtime records the deadline here and feeds
//! [`Event::TimerFired`](crate::app::Event::TimerFired) back once the deadline
//! passes.
//!
//! Each [`TimerKind`] owns a single slot. Scheduling a kind that is already
//! pending replaces the old deadline, so a superseded debounce timer can never
//! fire. Cancelling is unconditional and silent.
//!
//! Time comes from a [`Clock`]. Production code uses [`SystemClock`]; tests use
//! [`ManualClock`] and advance it explicitly.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// The timers the interaction core can schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimerKind {
    /// Debounce quiet period before fetching autocomplete suggestions.
    Suggest,
    /// Grace delay between the input losing focus and the dropdown closing.
    BlurClose,
}

/// A source of monotonic time.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall-clock time via [`Instant::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A virtual clock that only moves when told to.
///
/// Clones share the same underlying time, so a test can keep one handle while
/// the runtime owns another.
///
/// # Example
///
/// ```
/// use findy::app::scheduler::{Clock, ManualClock};
/// use std::time::Duration;
///
/// let clock = ManualClock::new();
/// let start = clock.now();
/// clock.advance(Duration::from_millis(300));
/// assert_eq!(clock.now() - start, Duration::from_millis(300));
/// ```
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<Instant>>,
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: Arc::new(Mutex::new(Instant::now())),
        }
    }

    /// Moves the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        if let Ok(mut now) = self.now.lock() {
            *now += by;
        }
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now
            .lock()
            .map_or_else(|poisoned| *poisoned.into_inner(), |now| *now)
    }
}

/// Pending deadlines, at most one per [`TimerKind`].
#[derive(Debug, Default)]
pub struct Timers {
    deadlines: BTreeMap<TimerKind, Instant>,
}

impl Timers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `kind` to fire `after` from `now`, replacing any pending deadline.
    pub fn schedule(&mut self, kind: TimerKind, now: Instant, after: Duration) {
        let replaced = self.deadlines.insert(kind, now + after).is_some();
        tracing::trace!(timer = ?kind, after_ms = after.as_millis(), replaced, "timer scheduled");
    }

    /// Cancels `kind` if it is pending. No-op otherwise.
    pub fn cancel(&mut self, kind: TimerKind) {
        if self.deadlines.remove(&kind).is_some() {
            tracing::trace!(timer = ?kind, "timer cancelled");
        }
    }

    #[must_use]
    pub fn is_pending(&self, kind: TimerKind) -> bool {
        self.deadlines.contains_key(&kind)
    }

    /// The earliest pending deadline, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadlines.values().min().copied()
    }

    /// Removes and returns every timer whose deadline is at or before `now`,
    /// earliest first.
    pub fn take_due(&mut self, now: Instant) -> Vec<TimerKind> {
        let mut due: Vec<(Instant, TimerKind)> = self
            .deadlines
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(kind, deadline)| (*deadline, *kind))
            .collect();
        due.sort();

        for (_, kind) in &due {
            self.deadlines.remove(kind);
        }

        due.into_iter().map(|(_, kind)| kind).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIET: Duration = Duration::from_millis(300);

    #[test]
    fn timer_fires_only_after_deadline() {
        let clock = ManualClock::new();
        let mut timers = Timers::new();
        timers.schedule(TimerKind::Suggest, clock.now(), QUIET);

        clock.advance(Duration::from_millis(299));
        assert!(timers.take_due(clock.now()).is_empty());

        clock.advance(Duration::from_millis(1));
        assert_eq!(timers.take_due(clock.now()), vec![TimerKind::Suggest]);
        assert!(!timers.is_pending(TimerKind::Suggest));
    }

    #[test]
    fn rescheduling_supersedes_the_earlier_deadline() {
        let clock = ManualClock::new();
        let mut timers = Timers::new();
        timers.schedule(TimerKind::Suggest, clock.now(), QUIET);

        clock.advance(Duration::from_millis(200));
        timers.schedule(TimerKind::Suggest, clock.now(), QUIET);

        // The original deadline has passed but it was replaced.
        clock.advance(Duration::from_millis(150));
        assert!(timers.take_due(clock.now()).is_empty());

        clock.advance(Duration::from_millis(150));
        assert_eq!(timers.take_due(clock.now()), vec![TimerKind::Suggest]);
    }

    #[test]
    fn cancel_is_silent_when_nothing_is_pending() {
        let mut timers = Timers::new();
        timers.cancel(TimerKind::BlurClose);
        assert!(timers.next_deadline().is_none());
    }

    #[test]
    fn due_timers_come_back_earliest_first() {
        let clock = ManualClock::new();
        let mut timers = Timers::new();
        timers.schedule(TimerKind::Suggest, clock.now(), QUIET);
        timers.schedule(TimerKind::BlurClose, clock.now(), Duration::from_millis(150));

        assert_eq!(
            timers.next_deadline(),
            Some(clock.now() + Duration::from_millis(150))
        );

        clock.advance(Duration::from_secs(1));
        assert_eq!(
            timers.take_due(clock.now()),
            vec![TimerKind::BlurClose, TimerKind::Suggest]
        );
    }

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::new();
        let other = clock.clone();
        let start = clock.now();
        other.advance(QUIET);
        assert_eq!(clock.now() - start, QUIET);
    }
}
