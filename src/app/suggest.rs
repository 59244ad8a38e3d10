//! Autocomplete suggestion list and keyboard navigation.
//!
//! A [`SuggestionList`] is the server-supplied candidate list together with the
//! keyboard selection. Both are replaced together; the selection is either
//! `None` (nothing highlighted) or a valid index into the current list.
//!
//! Navigation wraps in both directions. From "no selection", `ArrowDown` lands
//! on the first entry and `ArrowUp` on the last, so pressing `ArrowDown` `N`
//! times on a list of length `L` selects index `(N - 1) mod L`.
//!
//! [`classify_input`] holds the debounce decision: input that is too short is
//! cleared immediately, anything else waits for the quiet period.

use crate::domain::Suggestion;

/// What a keystroke means for the suggestion fetcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputDecision {
    /// Trimmed input is below the threshold: cancel, clear, hide. No debounce.
    Clear,
    /// Schedule a fetch for this trimmed text after the quiet period.
    Schedule(String),
}

/// Decides how the suggestion fetcher reacts to `raw` input.
///
/// Length is measured in characters, not bytes, so two Hangul syllables pass a
/// threshold of 2 just like two ASCII letters do.
///
/// # Examples
///
/// ```
/// use findy::app::suggest::{classify_input, InputDecision};
///
/// assert_eq!(classify_input(" a ", 2), InputDecision::Clear);
/// assert_eq!(classify_input(" ai ", 2), InputDecision::Schedule("ai".to_string()));
/// assert_eq!(classify_input("경제", 2), InputDecision::Schedule("경제".to_string()));
/// ```
#[must_use]
pub fn classify_input(raw: &str, min_chars: usize) -> InputDecision {
    let trimmed = raw.trim();
    if trimmed.chars().count() < min_chars {
        InputDecision::Clear
    } else {
        InputDecision::Schedule(trimmed.to_string())
    }
}

/// Suggestions plus the keyboard selection over them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionList {
    items: Vec<Suggestion>,
    selected: Option<usize>,
}

impl SuggestionList {
    /// Creates a list with nothing selected.
    #[must_use]
    pub const fn new(items: Vec<Suggestion>) -> Self {
        Self {
            items,
            selected: None,
        }
    }

    #[must_use]
    pub fn items(&self) -> &[Suggestion] {
        &self.items
    }

    #[must_use]
    pub const fn selected(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The highlighted suggestion, if any.
    #[must_use]
    pub fn selected_suggestion(&self) -> Option<&Suggestion> {
        self.selected.and_then(|index| self.items.get(index))
    }

    /// Returns the suggestion at `index`, if it exists.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Suggestion> {
        self.items.get(index)
    }

    /// Moves the selection down one entry, wrapping from last to first.
    ///
    /// No selection moves to the first entry. No-op on an empty list.
    pub fn select_next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.selected = Some(match self.selected {
            None => 0,
            Some(index) => (index + 1) % self.items.len(),
        });
    }

    /// Moves the selection up one entry, wrapping from first to last.
    ///
    /// No selection moves to the last entry. No-op on an empty list.
    pub fn select_previous(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let last = self.items.len() - 1;
        self.selected = Some(match self.selected {
            None | Some(0) => last,
            Some(index) => index - 1,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(values: &[&str]) -> SuggestionList {
        SuggestionList::new(values.iter().map(|v| Suggestion::new(*v)).collect())
    }

    #[test]
    fn short_input_clears() {
        assert_eq!(classify_input("", 2), InputDecision::Clear);
        assert_eq!(classify_input("   ", 2), InputDecision::Clear);
        assert_eq!(classify_input("경", 2), InputDecision::Clear);
    }

    #[test]
    fn arrow_down_wraps_through_the_list() {
        let mut suggestions = list(&["a", "b", "c"]);
        assert_eq!(suggestions.selected(), None);

        let expected = [0, 1, 2, 0, 1];
        for want in expected {
            suggestions.select_next();
            assert_eq!(suggestions.selected(), Some(want));
        }
    }

    #[test]
    fn arrow_down_n_times_from_none_is_n_minus_one_mod_len() {
        for len in 1..5usize {
            let values: Vec<String> = (0..len).map(|i| format!("s{i}")).collect();
            let refs: Vec<&str> = values.iter().map(String::as_str).collect();
            for presses in 1..12usize {
                let mut suggestions = list(&refs);
                for _ in 0..presses {
                    suggestions.select_next();
                }
                assert_eq!(suggestions.selected(), Some((presses - 1) % len));
            }
        }
    }

    #[test]
    fn arrow_up_from_none_lands_on_last() {
        let mut suggestions = list(&["a", "b", "c"]);
        suggestions.select_previous();
        assert_eq!(suggestions.selected(), Some(2));
        suggestions.select_previous();
        assert_eq!(suggestions.selected(), Some(1));
        suggestions.select_previous();
        suggestions.select_previous();
        assert_eq!(suggestions.selected(), Some(2));
    }

    #[test]
    fn navigation_on_empty_list_keeps_no_selection() {
        let mut suggestions = SuggestionList::default();
        suggestions.select_next();
        suggestions.select_previous();
        assert_eq!(suggestions.selected(), None);
        assert!(suggestions.selected_suggestion().is_none());
    }

    #[test]
    fn selected_suggestion_follows_index() {
        let mut suggestions = list(&["ai news", "ai policy"]);
        suggestions.select_next();
        suggestions.select_next();
        assert_eq!(
            suggestions.selected_suggestion().map(|s| s.value.as_str()),
            Some("ai policy")
        );
    }
}
