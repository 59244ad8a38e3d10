//! Search session state and view model computation.
//!
//! [`SessionState`] is the single source of truth for one interactive session:
//! the raw input, the committed query, the suggestion dropdown, the results
//! panel and the small amount of preference data (history, popular queries,
//! dark mode). It is created at startup, mutated only by
//! [`handle_event`](crate::app::handle_event), and rendered through
//! [`SessionState::compute_viewmodel`].
//!
//! # Example
//!
//! ```
//! use findy::app::{InteractionSettings, SessionState};
//!
//! let state = SessionState::new(InteractionSettings::default());
//! let viewmodel = state.compute_viewmodel();
//! assert!(viewmodel.suggestions.is_none());
//! ```

use super::dispatch::RequestTracker;
use super::modes::{Dropdown, ResultsPanel};
use super::pagination::{compute_window, DEFAULT_RADIUS};
use crate::domain::{Query, ResultItem};
use crate::ui::present::{format_date, highlight, truncate};
use crate::ui::viewmodel::{
    EmptyState, FooterInfo, HeaderInfo, ResultCard, ResultsSummary, ResultsView, SearchBarInfo,
    SuggestionItem, UIViewModel,
};
use std::time::Duration;

/// Characters of article body shown on a result card.
pub const BODY_PREVIEW_CHARS: usize = 200;

/// Shown when the server cannot be reached or answers with an error.
pub const SEARCH_FAILED_MESSAGE: &str = "Something went wrong while searching. Please try again.";

/// Timing and sizing knobs for the interaction core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionSettings {
    /// Quiet period before a suggestion fetch.
    pub debounce: Duration,
    /// Delay between blur and the dropdown closing.
    pub blur_grace: Duration,
    /// Minimum trimmed characters before suggestions are fetched.
    pub min_suggest_chars: usize,
    /// Results per page sent as `size`.
    pub page_size: u32,
    /// Popular queries shown.
    pub popular_limit: usize,
    /// Shown when popular queries cannot be loaded.
    pub popular_fallback: Vec<String>,
    /// Category choices; the empty string means "all".
    pub categories: Vec<String>,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(300),
            blur_grace: Duration::from_millis(150),
            min_suggest_chars: 2,
            page_size: 10,
            popular_limit: 5,
            popular_fallback: ["경제", "정치", "사회", "AI", "스포츠"]
                .into_iter()
                .map(String::from)
                .collect(),
            categories: ["", "경제", "오피니언", "사회", "건강", "연예/문화", "스포츠"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// State of one search session.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Raw text of the search box, untrimmed.
    pub input: String,

    /// Category selector value; empty means "all".
    pub category: String,

    /// The query that produced the results panel, kept for paging and retry.
    pub committed: Option<Query>,

    /// Zero-based page of the committed query.
    pub page: u32,

    pub dropdown: Dropdown,

    pub results: ResultsPanel,

    /// Whether the search box has focus.
    pub focused: bool,

    pub popular: Vec<String>,

    /// Recent searches, most recent first.
    pub history: Vec<String>,

    pub dark_mode: bool,

    pub settings: InteractionSettings,

    /// Page index of the last results actually drawn; survives the loading state.
    pub(crate) shown_page: Option<u32>,
    /// Set once the user toggles dark mode; the stored flag no longer applies.
    pub(crate) dark_mode_changed: bool,
    pub(crate) suggest_requests: RequestTracker,
    pub(crate) search_requests: RequestTracker,
}

impl SessionState {
    #[must_use]
    pub fn new(settings: InteractionSettings) -> Self {
        Self {
            input: String::new(),
            category: String::new(),
            committed: None,
            page: 0,
            dropdown: Dropdown::Closed,
            results: ResultsPanel::Idle,
            focused: true,
            popular: vec![],
            history: vec![],
            dark_mode: false,
            settings,
            shown_page: None,
            dark_mode_changed: false,
            suggest_requests: RequestTracker::new(),
            search_requests: RequestTracker::new(),
        }
    }

    /// The search box text as it would be submitted.
    #[must_use]
    pub fn trimmed_input(&self) -> &str {
        self.input.trim()
    }

    /// Total pages of the displayed result page, if any.
    #[must_use]
    pub fn total_pages(&self) -> Option<u32> {
        self.results.page().map(|page| page.total_pages)
    }

    /// Computes a renderable view model from the current state.
    ///
    /// Suggestions are highlighted against the live input; result cards
    /// against the committed query.
    #[must_use]
    pub fn compute_viewmodel(&self) -> UIViewModel {
        UIViewModel {
            header: self.compute_header(),
            search_bar: SearchBarInfo {
                input: self.input.clone(),
                category: self.category.clone(),
                categories: self.settings.categories.clone(),
            },
            suggestions: self.compute_suggestions(),
            popular: self.popular.clone(),
            history: self.history.clone(),
            results: self.compute_results(),
            pagination: self
                .results
                .page()
                .and_then(|page| compute_window(page.page_index, page.total_pages, DEFAULT_RADIUS)),
            footer: self.compute_footer(),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        HeaderInfo {
            title: " findy ".to_string(),
            dark_mode: self.dark_mode,
        }
    }

    fn compute_suggestions(&self) -> Option<Vec<SuggestionItem>> {
        let list = self.dropdown.list()?;
        let needle = self.trimmed_input();

        Some(
            list.items()
                .iter()
                .enumerate()
                .map(|(index, suggestion)| SuggestionItem {
                    value: suggestion.value.clone(),
                    segments: highlight(&suggestion.value, needle),
                    count: suggestion.count,
                    is_selected: list.selected() == Some(index),
                })
                .collect(),
        )
    }

    fn compute_results(&self) -> ResultsView {
        match &self.results {
            ResultsPanel::Idle => ResultsView::Idle,
            ResultsPanel::Loading { query } => ResultsView::Loading {
                title: query.title(),
            },
            ResultsPanel::Validation { message } => ResultsView::Validation(EmptyState {
                message: message.clone(),
                subtitle: String::new(),
            }),
            ResultsPanel::NoResults { query } => ResultsView::NoResults(EmptyState {
                message: format!("No results for {}.", query.title()),
                subtitle: "Try a different search term.".to_string(),
            }),
            ResultsPanel::Failed { query, message } => ResultsView::Error(EmptyState {
                message: message.clone(),
                subtitle: format!("Searching for {} failed. Use :retry to try again.", query.title()),
            }),
            ResultsPanel::Loaded {
                query,
                page,
                elapsed_ms,
            } => ResultsView::Results {
                summary: ResultsSummary {
                    title: query.title(),
                    total_count: page.total_count,
                    current_page: page.page_index + 1,
                    total_pages: page.total_pages,
                    elapsed_ms: *elapsed_ms,
                },
                cards: page
                    .items
                    .iter()
                    .map(|item| Self::compute_card(item, &query.text))
                    .collect(),
            },
        }
    }

    fn compute_card(item: &ResultItem, needle: &str) -> ResultCard {
        let mut meta = vec![];
        if let Some(category) = item.category.as_deref().filter(|c| !c.is_empty()) {
            meta.push(category.to_string());
        }
        if let Some(author) = item.author.as_deref().filter(|a| !a.is_empty()) {
            meta.push(author.to_string());
        }
        if let Some(published_at) = item.published_at.as_deref() {
            let date = format_date(published_at);
            if !date.is_empty() {
                meta.push(date);
            }
        }

        ResultCard {
            title: highlight(&item.title, needle),
            body: highlight(&truncate(&item.body, BODY_PREVIEW_CHARS), needle),
            url: item.url.clone(),
            meta,
            tags: item.tags.clone(),
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = if self.dropdown.is_open() {
            ":down/:up navigate  :enter pick  :pick N  :esc close"
        } else if self.results.page().is_some() {
            ":page N  :next  :prev  :cat NAME  :search  :dark  :quit"
        } else if matches!(self.results, ResultsPanel::Failed { .. }) {
            ":retry  :search  :cat NAME  :quit"
        } else {
            "type to search  :search  :popular N  :history N  :cat NAME  :dark  :quit"
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}
