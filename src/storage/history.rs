//! Search history maintenance.
//!
//! The history is a most-recent-first list of distinct queries with a fixed
//! capacity. Recording a query that is already present moves it to the front
//! instead of duplicating it; the oldest entries fall off the end.

use super::models::HistoryEntry;

/// Default number of remembered searches.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Records `query` at the front of `entries`, deduplicating and capping to `limit`.
///
/// Blank queries are ignored. Returns `true` if `entries` changed.
///
/// # Examples
///
/// ```
/// use findy::storage::{record_search, HistoryEntry};
///
/// let mut entries = vec![HistoryEntry::new("ml"), HistoryEntry::new("ai")];
/// record_search(&mut entries, "ai", 100, 10);
/// let queries: Vec<&str> = entries.iter().map(|e| e.query.as_str()).collect();
/// assert_eq!(queries, vec!["ai", "ml"]);
/// ```
pub fn record_search(entries: &mut Vec<HistoryEntry>, query: &str, now: i64, limit: usize) -> bool {
    let query = query.trim();
    if query.is_empty() || limit == 0 {
        return false;
    }

    entries.retain(|entry| entry.query != query);
    entries.insert(
        0,
        HistoryEntry {
            query: query.to_string(),
            searched_at: now,
        },
    );
    entries.truncate(limit);
    true
}

/// The query strings of `entries`, in order.
#[must_use]
pub fn queries(entries: &[HistoryEntry]) -> Vec<String> {
    entries.iter().map(|entry| entry.query.clone()).collect()
}
