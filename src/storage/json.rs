//! JSON file-based storage backend.
//!
//! Keeps the whole preference file in memory and rewrites it on every change.
//! Writes are atomic (write-to-temp + rename) so a crash never leaves a
//! half-written file behind.
//!
//! A file that cannot be parsed is treated as empty and overwritten on the
//! next change: the cache is best-effort and must never block a session.

use crate::domain::error::{FindyError, Result};
use crate::storage::backend::Storage;
use crate::storage::history::record_search;
use crate::storage::models::{HistoryEntry, PreferencesData};
use std::path::{Path, PathBuf};

/// JSON file storage backend.
///
/// # Thread Safety
///
/// `Send` but not `Sync`; the worker wraps it in a mutex.
pub struct JsonStorage {
    /// Path to the JSON file on disk.
    file_path: PathBuf,

    /// In-memory data cache, loaded on creation.
    data: PreferencesData,

    /// Maximum number of history entries kept.
    history_limit: usize,

    /// Tracks if data has been modified since last save.
    dirty: bool,
}

impl JsonStorage {
    /// Creates or opens a JSON storage backend.
    ///
    /// Parent directories are created automatically. A missing file starts
    /// empty; an unreadable one is logged and replaced on the next write.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created.
    pub fn new(file_path: PathBuf, history_limit: usize) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing JSON storage");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut data = if file_path.exists() {
            Self::load_from_file(&file_path).unwrap_or_else(|e| {
                tracing::warn!(error = %e, path = ?file_path, "discarding unreadable preferences");
                PreferencesData::default()
            })
        } else {
            tracing::debug!("initializing new empty storage");
            PreferencesData::default()
        };
        data.history.truncate(history_limit);

        tracing::debug!(
            history_count = data.history.len(),
            dark_mode = data.dark_mode,
            "storage initialized"
        );

        Ok(Self {
            file_path,
            data,
            history_limit,
            dirty: false,
        })
    }

    fn load_from_file(path: &Path) -> Result<PreferencesData> {
        let contents = std::fs::read_to_string(path)?;
        let data: PreferencesData = serde_json::from_str(&contents)
            .map_err(|e| FindyError::Storage(format!("failed to parse JSON: {e}")))?;

        tracing::debug!(version = data.version, history = data.history.len(), "loaded preferences");
        Ok(data)
    }

    /// Saves data to disk using an atomic write.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary file cannot be written or renamed.
    fn save_to_file(&mut self) -> Result<()> {
        if !self.dirty {
            tracing::trace!("skipping save, no changes");
            return Ok(());
        }

        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| FindyError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        self.dirty = false;
        tracing::debug!(path = ?self.file_path, "preferences saved");
        Ok(())
    }
}

impl Storage for JsonStorage {
    fn history(&self) -> Result<Vec<HistoryEntry>> {
        Ok(self.data.history.clone())
    }

    fn record_search(&mut self, query: &str, timestamp: i64) -> Result<Vec<HistoryEntry>> {
        let _span = tracing::debug_span!("json_record_search", query = %query).entered();

        if record_search(&mut self.data.history, query, timestamp, self.history_limit) {
            self.dirty = true;
            self.save_to_file()?;
        }

        Ok(self.data.history.clone())
    }

    fn clear_history(&mut self) -> Result<()> {
        if self.data.history.is_empty() {
            return Ok(());
        }
        self.data.history.clear();
        self.dirty = true;
        self.save_to_file()
    }

    fn dark_mode(&self) -> Result<bool> {
        Ok(self.data.dark_mode)
    }

    fn set_dark_mode(&mut self, enabled: bool) -> Result<()> {
        if self.data.dark_mode == enabled {
            return Ok(());
        }
        self.data.dark_mode = enabled;
        self.dirty = true;
        self.save_to_file()
    }
}

impl Drop for JsonStorage {
    fn drop(&mut self) {
        if self.dirty {
            tracing::debug!("saving dirty data on drop");
            if let Err(e) = self.save_to_file() {
                tracing::error!(error = %e, "failed to save on drop");
            }
        }
    }
}
