//! Storage backend abstraction.
//!
//! The [`Storage`] trait covers exactly what the worker needs from the
//! client-local cache: the search history and the dark-mode preference. Both
//! are best-effort; a failing backend degrades to an empty history and the
//! light theme, never to a broken session.

use crate::domain::error::Result;
use crate::storage::models::HistoryEntry;

/// Abstraction over persistent preference storage.
///
/// # Implementations
///
/// - [`JsonStorage`](crate::storage::JsonStorage): JSON file with atomic writes
///
/// # Examples
///
/// ```no_run
/// use findy::storage::{JsonStorage, Storage};
/// use std::path::PathBuf;
///
/// let mut storage = JsonStorage::new(PathBuf::from("/tmp/preferences.json"), 10)?;
/// storage.record_search("ai", 1_737_500_000)?;
/// let history = storage.history()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Storage: Send {
    /// Returns the search history, most recent first.
    ///
    /// # Errors
    ///
    /// Returns an error if the read operation fails.
    fn history(&self) -> Result<Vec<HistoryEntry>>;

    /// Records a search and returns the updated history.
    ///
    /// # Errors
    ///
    /// Returns an error if the history cannot be persisted.
    fn record_search(&mut self, query: &str, timestamp: i64) -> Result<Vec<HistoryEntry>>;

    /// Forgets every recorded search.
    ///
    /// # Errors
    ///
    /// Returns an error if the change cannot be persisted.
    fn clear_history(&mut self) -> Result<()>;

    /// Returns the stored dark-mode preference.
    ///
    /// # Errors
    ///
    /// Returns an error if the read operation fails.
    fn dark_mode(&self) -> Result<bool>;

    /// Stores the dark-mode preference.
    ///
    /// # Errors
    ///
    /// Returns an error if the change cannot be persisted.
    fn set_dark_mode(&mut self, enabled: bool) -> Result<()>;
}
