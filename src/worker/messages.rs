//! Request and response protocol between the event loop and the worker.
//!
//! Every network request carries the request id the event handler issued for
//! it; the matching response echoes it back so stale answers can be told
//! apart from current ones.

use crate::app::dispatch::RequestId;
use crate::domain::{SearchRequest, SearchResultPage, Suggestion};
use serde::{Deserialize, Serialize};

/// Messages sent from the event loop to the worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Fetch autocomplete suggestions for `text`.
    FetchSuggestions {
        request_id: RequestId,
        /// Trimmed input the suggestions are for.
        text: String,
    },

    /// Fetch one page of search results.
    Search {
        request_id: RequestId,
        request: SearchRequest,
    },

    /// Fetch popular queries, keeping at most `limit`.
    LoadPopular { limit: usize },

    /// Read the stored history and dark-mode preference.
    LoadPreferences,

    /// Push a submitted query onto the search history.
    RecordHistory { query: String },

    ClearHistory,

    /// Persist the dark-mode preference.
    SaveDarkMode { enabled: bool },
}

impl WorkerMessage {
    /// Whether the message touches the preference store rather than the network.
    #[must_use]
    pub const fn is_storage(&self) -> bool {
        matches!(
            self,
            Self::LoadPreferences | Self::RecordHistory { .. } | Self::ClearHistory | Self::SaveDarkMode { .. }
        )
    }
}

/// Responses sent from the worker back to the event loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// Suggestions for the request with `request_id`.
    Suggestions {
        request_id: RequestId,
        /// The text the request was made for.
        text: String,
        suggestions: Vec<Suggestion>,
    },

    /// The suggestion request failed; treated as "no suggestions".
    SuggestionsFailed {
        request_id: RequestId,
        text: String,
        message: String,
    },

    /// A search finished.
    SearchCompleted {
        request_id: RequestId,
        page: SearchResultPage,
        /// Measured round-trip time.
        elapsed_ms: u64,
    },

    SearchFailed {
        request_id: RequestId,
        message: String,
    },

    PopularLoaded { queries: Vec<String> },

    PopularFailed { message: String },

    PreferencesLoaded { history: Vec<String>, dark_mode: bool },

    /// The history after a change, most recent first.
    HistoryUpdated { history: Vec<String> },

    DarkModeSaved { enabled: bool },

    /// A storage operation failed.
    Error {
        /// Human-readable error message.
        message: String,
    },
}
