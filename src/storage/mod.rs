//! Storage layer for the client-local preference cache.
//!
//! Persists the recent search history and the dark-mode preference in a JSON
//! file under the data directory. Nothing here is authoritative; losing the
//! file only loses convenience.
//!
//! # Modules
//!
//! - `backend`: Storage trait abstraction for backend implementations
//! - `json`: JSON file-based storage implementation
//! - `history`: Most-recent-first, deduplicated, capped history list
//! - `models`: On-disk record types

pub mod backend;
pub mod history;
pub mod json;
pub mod models;

pub use backend::Storage;
pub use history::{queries, record_search, DEFAULT_HISTORY_LIMIT};
pub use json::JsonStorage;
pub use models::{HistoryEntry, PreferencesData};
