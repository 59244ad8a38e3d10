//! Search submission and stale-response guards.
//!
//! Every outgoing request (suggestions or search) is tagged with an id from a
//! [`RequestTracker`]. Only a response carrying the latest issued id is
//! applied; anything older lost the race and is dropped. Invalidating a
//! tracker without issuing a request makes every in-flight response stale.

use crate::domain::{Query, SearchRequest};

/// Shown instead of results when the user submits blank text.
pub const VALIDATION_MESSAGE: &str = "Please enter a search term.";

/// Identifies one outgoing request.
pub type RequestId = u64;

/// Issues monotonically increasing request ids and recognizes the latest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestTracker {
    latest: RequestId,
}

impl RequestTracker {
    #[must_use]
    pub const fn new() -> Self {
        Self { latest: 0 }
    }

    /// Issues a new id, superseding every earlier one.
    pub fn issue(&mut self) -> RequestId {
        self.latest += 1;
        self.latest
    }

    /// Supersedes every issued id without issuing a new request.
    pub fn invalidate(&mut self) {
        self.latest += 1;
    }

    /// Returns `true` if `id` is the most recently issued id.
    #[must_use]
    pub const fn is_current(&self, id: RequestId) -> bool {
        id != 0 && id == self.latest
    }
}

/// Why a submission was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The trimmed text was empty.
    EmptyQuery,
}

impl Rejection {
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::EmptyQuery => VALIDATION_MESSAGE,
        }
    }
}

/// Validates `(text, category, page)` and builds the request to send.
///
/// # Errors
///
/// Returns [`Rejection::EmptyQuery`] when `text` is empty after trimming; no
/// request may be sent in that case.
///
/// # Examples
///
/// ```
/// use findy::app::dispatch::{prepare_search, Rejection};
///
/// let request = prepare_search(" ai ", "경제", 0, 10).unwrap();
/// assert_eq!(request.query.text, "ai");
///
/// assert_eq!(prepare_search("   ", "", 0, 10), Err(Rejection::EmptyQuery));
/// ```
pub fn prepare_search(
    text: &str,
    category: &str,
    page: u32,
    size: u32,
) -> std::result::Result<SearchRequest, Rejection> {
    let query = Query::new(text, category);
    if !query.is_submittable() {
        return Err(Rejection::EmptyQuery);
    }
    Ok(SearchRequest::new(query, page, size))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_latest_id_is_current() {
        let mut tracker = RequestTracker::new();
        assert!(!tracker.is_current(0));

        let first = tracker.issue();
        assert!(tracker.is_current(first));

        let second = tracker.issue();
        assert!(!tracker.is_current(first));
        assert!(tracker.is_current(second));
    }

    #[test]
    fn invalidate_makes_in_flight_requests_stale() {
        let mut tracker = RequestTracker::new();
        let in_flight = tracker.issue();
        tracker.invalidate();
        assert!(!tracker.is_current(in_flight));

        let next = tracker.issue();
        assert!(next > in_flight);
        assert!(tracker.is_current(next));
    }

    #[test]
    fn blank_text_is_rejected_with_message() {
        let rejection = prepare_search("\t \n", "경제", 0, 10).unwrap_err();
        assert_eq!(rejection.message(), "Please enter a search term.");
    }

    #[test]
    fn accepted_search_keeps_page_and_size() {
        let request = prepare_search("ai", "", 4, 20).unwrap();
        assert_eq!(request.page, 4);
        assert_eq!(request.size, 20);
        assert_eq!(request.query.category_filter(), None);
    }
}
