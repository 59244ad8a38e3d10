//! Findy: the interaction core of a news-search front end.
//!
//! Findy turns keystrokes and clicks into search-API requests and API
//! responses into renderable views:
//! - Debounced autocomplete with stale-response suppression
//! - Keyboard navigation of the suggestion dropdown
//! - Query dispatch with category filter and paging
//! - A bounded pagination window around the current page
//! - Result cards with match highlighting, body previews and Korean dates
//! - Persisted search history and dark-mode preference
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  CLI shell (main.rs)                                │  ← stdin commands, stdout screen
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling, timers, request guards           │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Worker Layer  │   │ Storage Layer │
//! │ (ui/)         │   │ (worker/)     │   │ (storage/)    │
//! │ - Terminal    │   │ - tokio tasks │   │ - JSON file   │
//! │ - HTML        │   │ - api/ client │   │ - History     │
//! │ - Theming     │   │               │   │ - Dark mode   │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain, Infrastructure, Observability              │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! The event handler never performs I/O. It returns [`Action`]s; the shell
//! schedules timers through [`app::Controller`] and hands
//! [`worker::WorkerMessage`]s to a [`worker::SearchWorker`], whose responses
//! come back as [`Event::WorkerResponse`].
//!
//! # Example
//!
//! ```
//! use findy::{handle_event, initialize, Action, Config, Event};
//! use findy::worker::WorkerMessage;
//!
//! let mut state = initialize(&Config::default());
//! state.input = "ai".to_string();
//! let (_, actions) = handle_event(&mut state, &Event::Submit)?;
//! assert!(actions.iter().any(|action| matches!(
//!     action,
//!     Action::PostToWorker(WorkerMessage::Search { .. })
//! )));
//! # Ok::<(), findy::FindyError>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod storage;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, Event, InteractionSettings, SessionState};
pub use domain::{FindyError, Result};
pub use ui::Theme;

use api::ApiSettings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Configuration loaded from `~/.config/findy/config.toml`.
///
/// Every key is optional; missing keys take the defaults below. Command-line
/// flags override individual values after loading.
///
/// # Example
///
/// ```toml
/// api_base_url = "https://news.example.com"
/// query_param = "query"
/// page_size = 20
/// debounce_ms = 250
/// trace_level = "debug"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root of the search API. Default: `http://localhost:8080`
    pub api_base_url: String,
    pub autocomplete_path: String,
    pub popular_path: String,
    pub search_path: String,
    /// Name of the free-text parameter. Default: `"q"`
    pub query_param: String,

    /// Results per page. Default: 10
    pub page_size: u32,
    /// Suggestion debounce in milliseconds. Default: 300
    pub debounce_ms: u64,
    /// Grace period between blur and dropdown close. Default: 150
    pub blur_grace_ms: u64,
    /// Minimum trimmed characters before suggestions are fetched. Default: 2
    pub min_suggest_chars: usize,

    /// Recent searches kept. Default: 10
    pub history_limit: usize,
    /// Popular queries shown. Default: 5
    pub popular_limit: usize,
    /// Shown when popular queries cannot be fetched.
    pub popular_fallback: Vec<String>,
    /// Category selector values, `""` meaning all categories.
    pub categories: Vec<String>,

    /// Path to a custom TOML theme file; overrides the light/dark built-ins.
    pub theme_file: Option<PathBuf>,
    /// Tracing filter. Options: `trace`, `debug`, `info`, `warn`, `error`.
    pub trace_level: String,
    /// Per-request timeout in seconds; unset waits indefinitely.
    pub request_timeout_secs: Option<u64>,
    /// Overrides the platform data directory.
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        let interaction = InteractionSettings::default();
        Self {
            api_base_url: "http://localhost:8080".to_string(),
            autocomplete_path: api::DEFAULT_AUTOCOMPLETE_PATH.to_string(),
            popular_path: api::DEFAULT_POPULAR_PATH.to_string(),
            search_path: api::DEFAULT_SEARCH_PATH.to_string(),
            query_param: "q".to_string(),
            page_size: interaction.page_size,
            debounce_ms: 300,
            blur_grace_ms: 150,
            min_suggest_chars: interaction.min_suggest_chars,
            history_limit: storage::DEFAULT_HISTORY_LIMIT,
            popular_limit: interaction.popular_limit,
            popular_fallback: interaction.popular_fallback,
            categories: interaction.categories,
            theme_file: None,
            trace_level: "info".to_string(),
            request_timeout_secs: None,
            data_dir: None,
        }
    }
}

impl Config {
    /// Loads configuration from `path`, or the default location when `None`.
    ///
    /// A missing file at the default location yields [`Config::default`]; a
    /// missing file at an explicit path is an error.
    ///
    /// # Errors
    ///
    /// Returns [`FindyError::Config`] if the file cannot be read or parsed, or
    /// if the loaded values fail [`Config::validate`].
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(path) => (Some(infrastructure::expand_tilde(path)), true),
            None => (infrastructure::default_config_path(), false),
        };

        let config = match path {
            Some(path) if required || path.exists() => Self::from_file(&path)?,
            _ => {
                tracing::debug!("no config file, using defaults");
                Self::default()
            }
        };

        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| FindyError::Config(format!("failed to read {}: {e}", path.display())))?;
        toml::from_str(&contents)
            .map_err(|e| FindyError::Config(format!("failed to parse {}: {e}", path.display())))
    }

    /// Rejects values the session cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`FindyError::Config`] for a zero page size or history limit,
    /// an empty query parameter name, or an unparseable base URL.
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(FindyError::Config("page_size must be greater than 0".to_string()));
        }
        if self.history_limit == 0 {
            return Err(FindyError::Config("history_limit must be greater than 0".to_string()));
        }
        if self.query_param.trim().is_empty() {
            return Err(FindyError::Config("query_param must not be empty".to_string()));
        }
        self.base_url()?;
        Ok(())
    }

    fn base_url(&self) -> Result<Url> {
        Url::parse(&self.api_base_url)
            .map_err(|e| FindyError::Config(format!("invalid api_base_url {:?}: {e}", self.api_base_url)))
    }

    /// Timing and sizing knobs for the session.
    #[must_use]
    pub fn interaction_settings(&self) -> InteractionSettings {
        InteractionSettings {
            debounce: Duration::from_millis(self.debounce_ms),
            blur_grace: Duration::from_millis(self.blur_grace_ms),
            min_suggest_chars: self.min_suggest_chars,
            page_size: self.page_size,
            popular_limit: self.popular_limit,
            popular_fallback: self.popular_fallback.clone(),
            categories: self.categories.clone(),
        }
    }

    /// Endpoint settings for [`api::HttpSearchApi`].
    ///
    /// # Errors
    ///
    /// Returns [`FindyError::Config`] if `api_base_url` does not parse.
    pub fn api_settings(&self) -> Result<ApiSettings> {
        Ok(ApiSettings {
            base_url: self.base_url()?,
            autocomplete_path: self.autocomplete_path.clone(),
            popular_path: self.popular_path.clone(),
            search_path: self.search_path.clone(),
            query_param: self.query_param.clone(),
            timeout: self.request_timeout_secs.map(Duration::from_secs),
        })
    }

    /// Data directory after applying `data_dir`.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        infrastructure::get_data_dir(self.data_dir.as_deref())
    }

    /// The theme to draw with: `theme_file` when it loads, otherwise the
    /// built-in matching `dark_mode`.
    #[must_use]
    pub fn theme(&self, dark_mode: bool) -> Theme {
        match &self.theme_file {
            Some(path) => Theme::from_file(infrastructure::expand_tilde(path)).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %path.display(), error = %e, "failed to load theme from file, using default");
                Theme::for_mode(dark_mode)
            }),
            None => Theme::for_mode(dark_mode),
        }
    }
}

/// Creates the session state for `config`.
///
/// Preferences and popular queries are not loaded here; dispatching
/// [`Event::Started`] asks the worker for them.
#[must_use]
pub fn initialize(config: &Config) -> SessionState {
    tracing::debug!(api = %config.api_base_url, "initializing findy session");
    SessionState::new(config.interaction_settings())
}
