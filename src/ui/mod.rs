//! User interface layer: view models and the adapters that draw them.
//!
//! ```text
//! SessionState → compute_viewmodel → UIViewModel → terminal::render / html::render_page
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`present`]: Highlighting, truncation and date formatting
//! - [`theme`]: Color scheme definitions and ANSI escape sequence generation
//! - [`terminal`]: ANSI rendering for the interactive CLI
//! - [`html`]: Markup fragments for a static search page

pub mod html;
pub mod present;
pub mod terminal;
pub mod theme;
pub mod viewmodel;

pub use theme::Theme;
pub use viewmodel::{
    EmptyState, FooterInfo, HeaderInfo, ResultCard, ResultsSummary, ResultsView, SearchBarInfo,
    SuggestionItem, UIViewModel,
};
