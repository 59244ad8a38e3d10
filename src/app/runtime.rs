//! Controller tying the event handler to timers and a clock.
//!
//! [`Controller`] owns the [`SessionState`] and the pending [`Timers`]. It feeds
//! events through [`handle_event`], applies timer actions itself, and hands the
//! remaining effects (worker requests, scrolling) back to the caller. Due
//! timers become [`Event::TimerFired`] on the next [`Controller::tick`].
//!
//! Presentation adapters and tests drive the same controller; only the clock
//! and the way worker messages are executed differ.

use super::handler::{handle_event, Event};
use super::scheduler::{Clock, SystemClock, Timers};
use super::{Action, SessionState};
use crate::domain::Result;
use std::time::Instant;

/// Result of feeding one event (or one tick) through the controller.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    /// Whether the view changed.
    pub render: bool,
    /// Effects for the caller: worker posts and scroll requests, in order.
    pub actions: Vec<Action>,
}

impl Outcome {
    fn absorb(&mut self, render: bool, actions: Vec<Action>) {
        self.render |= render;
        self.actions.extend(actions);
    }
}

/// Event loop core for one search session.
#[derive(Debug)]
pub struct Controller<C: Clock = SystemClock> {
    state: SessionState,
    timers: Timers,
    clock: C,
}

impl<C: Clock> Controller<C> {
    #[must_use]
    pub fn new(state: SessionState, clock: C) -> Self {
        Self {
            state,
            timers: Timers::new(),
            clock,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub const fn timers(&self) -> &Timers {
        &self.timers
    }

    /// The earliest pending timer deadline, for the caller's sleep.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Handles `event`, arming and disarming timers as requested.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`handle_event`].
    pub fn dispatch(&mut self, event: &Event) -> Result<Outcome> {
        let (render, actions) = handle_event(&mut self.state, event)?;
        let mut outcome = Outcome::default();
        let effects = self.apply_timer_actions(actions);
        outcome.absorb(render, effects);
        Ok(outcome)
    }

    /// Fires every timer whose deadline has passed, earliest first.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`handle_event`].
    pub fn tick(&mut self) -> Result<Outcome> {
        let mut outcome = Outcome::default();
        for timer in self.timers.take_due(self.clock.now()) {
            tracing::trace!(timer = ?timer, "timer fired");
            let (render, actions) = handle_event(&mut self.state, &Event::TimerFired(timer))?;
            let effects = self.apply_timer_actions(actions);
            outcome.absorb(render, effects);
        }
        Ok(outcome)
    }

    fn apply_timer_actions(&mut self, actions: Vec<Action>) -> Vec<Action> {
        let now = self.clock.now();
        actions
            .into_iter()
            .filter_map(|action| match action {
                Action::ScheduleTimer { timer, after } => {
                    self.timers.schedule(timer, now, after);
                    None
                }
                Action::CancelTimer(timer) => {
                    self.timers.cancel(timer);
                    None
                }
                effect => Some(effect),
            })
            .collect()
    }
}
