//! Application layer: the search interaction state machine.
//!
//! This layer sits between the presentation adapters (terminal, HTML) and the
//! worker/API layers. It owns all interaction rules and performs no I/O.
//!
//! # Architecture
//!
//! ```text
//! User Input → Events → handle_event → State Mutations → Actions → Side Effects
//!                  ↑                                          │
//!                  ├────────── Timer expiry (Controller) ◀────┤
//!                  └────────── Worker Responses ◀─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event enum and the single dispatcher
//! - [`modes`]: Dropdown and results panel state machines
//! - [`state`]: Session state and view model computation
//! - [`suggest`]: Suggestion list, keyboard navigation, debounce decisions
//! - [`dispatch`]: Search validation and request-id guards
//! - [`pagination`]: Page button window calculation
//! - [`scheduler`]: Cancellable timers over an injectable clock
//! - [`runtime`]: Controller applying timer actions

pub mod actions;
pub mod dispatch;
pub mod handler;
pub mod modes;
pub mod pagination;
pub mod runtime;
pub mod scheduler;
pub mod state;
pub mod suggest;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{Dropdown, ResultsPanel};
pub use runtime::{Controller, Outcome};
pub use state::{InteractionSettings, SessionState};
