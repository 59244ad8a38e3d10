//! Side effects requested by the event handler.
//!
//! [`handle_event`](crate::app::handle_event) never performs I/O or touches a
//! clock. It returns a `Vec<Action>` and the runtime carries them out in order:
//! timer actions go to [`Timers`](crate::app::scheduler::Timers), worker actions
//! to the background worker, and `ScrollToResults` to the presentation adapter.

use super::scheduler::TimerKind;
use crate::worker::WorkerMessage;
use std::time::Duration;

/// Commands produced by the event handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Arms `timer` to fire after `after`, replacing any pending deadline for it.
    ScheduleTimer {
        timer: TimerKind,
        after: Duration,
    },

    /// Disarms `timer`. Silent when it is not pending.
    CancelTimer(TimerKind),

    /// Posts a request to the background worker.
    ///
    /// Network fetches and preference writes run off the event loop; their
    /// results come back as [`Event::WorkerResponse`](crate::app::Event::WorkerResponse).
    PostToWorker(WorkerMessage),

    /// Brings the results area into view after a different page loaded.
    ScrollToResults,
}
