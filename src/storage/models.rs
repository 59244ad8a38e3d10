//! Storage record models for the persistence layer.
//!
//! These are the on-disk shapes of the client-local preference cache. They are
//! kept separate from the view-facing types: the session only ever sees the
//! history as plain query strings.

use serde::{Deserialize, Serialize};

/// One remembered search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The trimmed query text.
    pub query: String,

    /// Unix timestamp of the most recent search for this query.
    pub searched_at: i64,
}

impl HistoryEntry {
    /// Creates an entry stamped with the current time.
    ///
    /// # Examples
    ///
    /// ```
    /// use findy::storage::HistoryEntry;
    ///
    /// let entry = HistoryEntry::new("ai");
    /// assert_eq!(entry.query, "ai");
    /// assert!(entry.searched_at > 0);
    /// ```
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            searched_at: chrono::Utc::now().timestamp(),
        }
    }
}

/// Top-level structure serialized to `preferences.json`.
///
/// ```json
/// {
///   "version": 1,
///   "history": [
///     { "query": "ai", "searched_at": 1737500000 }
///   ],
///   "dark_mode": false
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferencesData {
    /// Version of the storage format for future migrations.
    pub version: u32,

    /// Recent searches, most recent first.
    #[serde(default)]
    pub history: Vec<HistoryEntry>,

    #[serde(default)]
    pub dark_mode: bool,
}

impl Default for PreferencesData {
    fn default() -> Self {
        Self {
            version: 1,
            history: Vec::new(),
            dark_mode: false,
        }
    }
}
