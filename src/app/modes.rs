//! State machine enums for the suggestion dropdown and the results panel.
//!
//! # Dropdown
//!
//! ```text
//!            non-empty list arrives
//!   Closed ─────────────────────────▶ Open(list, selected)
//!     ▲                                   │
//!     └───────────────────────────────────┘
//!   empty list · input below threshold · Escape · click outside ·
//!   blur grace elapsed · selection · submit
//! ```
//!
//! # Results panel
//!
//! Exactly one of: nothing yet, loading, validation message, a page of results,
//! "no results" for a query, or an error for a query. A new submission always
//! replaces the panel with `Loading` so stale results never linger.

use super::suggest::SuggestionList;
use crate::domain::{Query, SearchResultPage, Suggestion};

/// Suggestion dropdown visibility and contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Dropdown {
    #[default]
    Closed,
    /// Visible with a non-empty list.
    Open(SuggestionList),
}

impl Dropdown {
    /// Opens with `items`, or closes when `items` is empty.
    #[must_use]
    pub fn from_items(items: Vec<Suggestion>) -> Self {
        if items.is_empty() {
            Self::Closed
        } else {
            Self::Open(SuggestionList::new(items))
        }
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }

    pub fn close(&mut self) {
        *self = Self::Closed;
    }

    /// The visible list, if open.
    #[must_use]
    pub const fn list(&self) -> Option<&SuggestionList> {
        match self {
            Self::Open(list) => Some(list),
            Self::Closed => None,
        }
    }

    /// ArrowDown. Returns `false` when closed (no-op).
    pub fn move_down(&mut self) -> bool {
        match self {
            Self::Open(list) => {
                list.select_next();
                true
            }
            Self::Closed => false,
        }
    }

    /// ArrowUp. Returns `false` when closed (no-op).
    pub fn move_up(&mut self) -> bool {
        match self {
            Self::Open(list) => {
                list.select_previous();
                true
            }
            Self::Closed => false,
        }
    }
}

/// What the results area currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ResultsPanel {
    /// Nothing searched yet.
    #[default]
    Idle,
    /// A search for `query` is in flight.
    Loading { query: Query },
    /// The last submission was refused.
    Validation { message: String },
    /// A page of results for `query`.
    Loaded {
        query: Query,
        page: SearchResultPage,
        elapsed_ms: u64,
    },
    /// The server found nothing for `query`.
    NoResults { query: Query },
    /// The search for `query` failed.
    Failed { query: Query, message: String },
}

impl ResultsPanel {
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    /// The displayed page, if results are showing.
    #[must_use]
    pub const fn page(&self) -> Option<&SearchResultPage> {
        match self {
            Self::Loaded { page, .. } => Some(page),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_items_keep_dropdown_closed() {
        assert_eq!(Dropdown::from_items(vec![]), Dropdown::Closed);
        assert!(Dropdown::from_items(vec![Suggestion::new("ai")]).is_open());
    }

    #[test]
    fn arrows_are_noops_while_closed() {
        let mut dropdown = Dropdown::Closed;
        assert!(!dropdown.move_down());
        assert!(!dropdown.move_up());
        assert_eq!(dropdown, Dropdown::Closed);
    }

    #[test]
    fn open_dropdown_starts_without_selection() {
        let mut dropdown = Dropdown::from_items(vec![Suggestion::new("a"), Suggestion::new("b")]);
        assert_eq!(dropdown.list().and_then(SuggestionList::selected), None);
        assert!(dropdown.move_up());
        assert_eq!(dropdown.list().and_then(SuggestionList::selected), Some(1));
        dropdown.close();
        assert!(dropdown.list().is_none());
    }
}
