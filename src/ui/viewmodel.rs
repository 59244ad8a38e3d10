//! View model types representing renderable UI state.
//!
//! View models are computed from [`SessionState`](crate::app::SessionState) by
//! `compute_viewmodel()` and consumed by the presentation adapters
//! ([`terminal`](crate::ui::terminal), [`html`](crate::ui::html)). They carry
//! display-ready data only: highlighted segments, formatted dates, page
//! labels. Adapters never look at session state directly.

use crate::app::pagination::PageWindow;
use crate::ui::present::Segment;

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    pub header: HeaderInfo,

    pub search_bar: SearchBarInfo,

    /// Dropdown entries; `None` while the dropdown is closed.
    pub suggestions: Option<Vec<SuggestionItem>>,

    /// Popular query tags.
    pub popular: Vec<String>,

    /// Recent searches, most recent first.
    pub history: Vec<String>,

    pub results: ResultsView,

    /// Page buttons; `None` when there is at most one page.
    pub pagination: Option<PageWindow>,

    pub footer: FooterInfo,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    pub dark_mode: bool,
}

/// The search form: input box and category selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Raw text of the input box.
    pub input: String,
    /// Selected category, empty for "all".
    pub category: String,
    /// Selectable categories, empty string first for "all".
    pub categories: Vec<String>,
}

/// One dropdown row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionItem {
    /// Text copied into the input when picked.
    pub value: String,
    /// `value` with the current input marked.
    pub segments: Vec<Segment>,
    pub count: Option<u64>,
    pub is_selected: bool,
}

/// What the results area shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsView {
    Idle,
    Loading { title: String },
    Validation(EmptyState),
    NoResults(EmptyState),
    Error(EmptyState),
    Results {
        summary: ResultsSummary,
        cards: Vec<ResultCard>,
    },
}

/// Line above the result list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsSummary {
    /// Query title, e.g. `"ai" (경제)`.
    pub title: String,
    pub total_count: u64,
    /// One-based.
    pub current_page: u32,
    pub total_pages: u32,
    /// Round-trip time of the search request.
    pub elapsed_ms: u64,
}

/// One search hit, ready to draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultCard {
    pub title: Vec<Segment>,
    /// Truncated body with the query marked.
    pub body: Vec<Segment>,
    pub url: String,
    /// Category, author and formatted date, whichever are present.
    pub meta: Vec<String>,
    pub tags: Vec<String>,
}

/// Message shown instead of results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message (e.g., "No results for \"ai\".").
    pub message: String,

    /// Secondary explanatory text; may be empty.
    pub subtitle: String,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Command hints for the current state.
    pub keybindings: String,
}
