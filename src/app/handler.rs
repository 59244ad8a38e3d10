//! Event handling and state transition logic.
//!
//! [`handle_event`] is the one dispatcher for everything that can happen to a
//! search session: keystrokes, focus changes, clicks, timer expiry and worker
//! responses. It mutates [`SessionState`] and returns whether a re-render is
//! needed plus the side effects to run. It never blocks, sleeps or performs I/O.
//!
//! # Event categories
//!
//! - **Input**: `Input`, `Focus`, `Blur`, `ClickOutside`
//! - **Dropdown**: `ArrowDown`, `ArrowUp`, `Enter`, `Escape`, `PickSuggestion`
//! - **Search**: `Submit`, `SelectCategory`, `GoToPage`, `NextPage`,
//!   `PreviousPage`, `SearchFor`, `Retry`
//! - **Preferences**: `ToggleDarkMode`, `ClearHistory`
//! - **System**: `Started`, `TimerFired`, `WorkerResponse`
//!
//! # Example
//!
//! ```
//! use findy::app::{handle_event, Action, Event, InteractionSettings, SessionState};
//! use findy::app::scheduler::TimerKind;
//!
//! let mut state = SessionState::new(InteractionSettings::default());
//! let (render, actions) = handle_event(&mut state, &Event::Input("ai".into())).unwrap();
//! assert!(render);
//! assert!(matches!(
//!     actions[0],
//!     Action::ScheduleTimer { timer: TimerKind::Suggest, .. }
//! ));
//! ```

use super::dispatch::{prepare_search, RequestId};
use super::modes::{Dropdown, ResultsPanel};
use super::scheduler::TimerKind;
use super::suggest::{classify_input, InputDecision};
use super::state::SEARCH_FAILED_MESSAGE;
use crate::app::{Action, SessionState};
use crate::domain::error::Result;
use crate::domain::{SearchResultPage, Suggestion};
use crate::worker::{WorkerMessage, WorkerResponse};

/// Everything that can happen to a search session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Session start: load popular queries and stored preferences.
    Started,

    /// The search box now contains this raw text.
    Input(String),
    /// The search box gained focus.
    Focus,
    /// The search box lost focus.
    Blur,
    /// A click landed outside the search form.
    ClickOutside,

    ArrowDown,
    ArrowUp,
    /// Picks the highlighted suggestion, or submits the input when none is.
    Enter,
    /// Closes the dropdown without touching the input.
    Escape,
    /// Picks the suggestion at this index.
    PickSuggestion(usize),

    /// Submits the current input and category, page 0.
    Submit,
    /// The category selector changed.
    SelectCategory(String),
    /// Requests a zero-based page of the committed query.
    GoToPage(u32),
    NextPage,
    PreviousPage,
    /// Replaces the input with this text and submits it (popular tag or
    /// history entry).
    SearchFor(String),
    /// Re-submits the committed query and page.
    Retry,

    ToggleDarkMode,
    ClearHistory,

    /// A scheduled timer expired.
    TimerFired(TimerKind),

    /// A background request finished.
    WorkerResponse(WorkerResponse),
}

/// Processes an event, mutates session state, and returns actions to execute.
///
/// # Returns
///
/// `(render, actions)`: whether the view changed, and the side effects to run
/// in order.
///
/// # Errors
///
/// Currently infallible; the `Result` keeps the signature stable for handlers
/// that may fail.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut SessionState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::Started => Ok((
            false,
            vec![
                Action::PostToWorker(WorkerMessage::LoadPopular {
                    limit: state.settings.popular_limit,
                }),
                Action::PostToWorker(WorkerMessage::LoadPreferences),
            ],
        )),
        Event::Input(raw) => {
            state.input.clone_from(raw);
            match classify_input(raw, state.settings.min_suggest_chars) {
                InputDecision::Clear => {
                    tracing::trace!("input below suggestion threshold");
                    state.dropdown.close();
                    state.suggest_requests.invalidate();
                    Ok((true, vec![Action::CancelTimer(TimerKind::Suggest)]))
                }
                InputDecision::Schedule(_) => Ok((
                    true,
                    vec![Action::ScheduleTimer {
                        timer: TimerKind::Suggest,
                        after: state.settings.debounce,
                    }],
                )),
            }
        }
        Event::Focus => {
            state.focused = true;
            let mut actions = vec![Action::CancelTimer(TimerKind::BlurClose)];
            if let InputDecision::Schedule(_) =
                classify_input(&state.input, state.settings.min_suggest_chars)
            {
                actions.push(Action::ScheduleTimer {
                    timer: TimerKind::Suggest,
                    after: state.settings.debounce,
                });
            }
            Ok((false, actions))
        }
        Event::Blur => {
            state.focused = false;
            Ok((
                false,
                vec![Action::ScheduleTimer {
                    timer: TimerKind::BlurClose,
                    after: state.settings.blur_grace,
                }],
            ))
        }
        Event::ClickOutside => Ok((close_dropdown(state), vec![])),
        Event::ArrowDown => Ok((state.dropdown.move_down(), vec![])),
        Event::ArrowUp => Ok((state.dropdown.move_up(), vec![])),
        Event::Enter => {
            let selected = state
                .dropdown
                .list()
                .and_then(|list| list.selected_suggestion())
                .map(|suggestion| suggestion.value.clone());

            match selected {
                Some(value) => Ok(pick(state, value)),
                None => {
                    let text = state.input.clone();
                    let category = state.category.clone();
                    Ok(submit(state, &text, &category, 0, true))
                }
            }
        }
        Event::Escape => {
            let render = close_dropdown(state);
            state.suggest_requests.invalidate();
            Ok((render, vec![Action::CancelTimer(TimerKind::Suggest)]))
        }
        Event::PickSuggestion(index) => {
            let value = state
                .dropdown
                .list()
                .and_then(|list| list.get(*index))
                .map(|suggestion| suggestion.value.clone());

            match value {
                Some(value) => Ok(pick(state, value)),
                None => {
                    tracing::debug!(index, "no suggestion at index");
                    Ok((false, vec![]))
                }
            }
        }
        Event::Submit => {
            let text = state.input.clone();
            let category = state.category.clone();
            Ok(submit(state, &text, &category, 0, true))
        }
        Event::SelectCategory(category) => {
            state.category = category.trim().to_string();
            match state.committed.clone() {
                Some(query) => {
                    tracing::debug!(category = %state.category, "category changed, re-submitting");
                    let category = state.category.clone();
                    Ok(submit(state, &query.text, &category, 0, false))
                }
                None => Ok((true, vec![])),
            }
        }
        Event::GoToPage(page) => Ok(go_to_page(state, *page)),
        Event::NextPage => match state.total_pages() {
            Some(total) if state.page + 1 < total => {
                let next = state.page + 1;
                Ok(go_to_page(state, next))
            }
            _ => Ok((false, vec![])),
        },
        Event::PreviousPage => {
            if state.results.page().is_some() && state.page > 0 {
                let previous = state.page - 1;
                Ok(go_to_page(state, previous))
            } else {
                Ok((false, vec![]))
            }
        }
        Event::SearchFor(text) => {
            state.input.clone_from(text);
            let category = state.category.clone();
            Ok(submit(state, text, &category, 0, true))
        }
        Event::Retry => match state.committed.clone() {
            Some(query) => {
                let page = state.page;
                Ok(submit(state, &query.text, &query.category, page, false))
            }
            None => Ok((false, vec![])),
        },
        Event::ToggleDarkMode => {
            state.dark_mode = !state.dark_mode;
            state.dark_mode_changed = true;
            tracing::debug!(dark_mode = state.dark_mode, "dark mode toggled");
            Ok((
                true,
                vec![Action::PostToWorker(WorkerMessage::SaveDarkMode {
                    enabled: state.dark_mode,
                })],
            ))
        }
        Event::ClearHistory => {
            state.history.clear();
            Ok((true, vec![Action::PostToWorker(WorkerMessage::ClearHistory)]))
        }
        Event::TimerFired(TimerKind::Suggest) => {
            let InputDecision::Schedule(text) =
                classify_input(&state.input, state.settings.min_suggest_chars)
            else {
                return Ok((false, vec![]));
            };
            let request_id = state.suggest_requests.issue();
            tracing::debug!(request_id, text = %text, "fetching suggestions");
            Ok((
                false,
                vec![Action::PostToWorker(WorkerMessage::FetchSuggestions {
                    request_id,
                    text,
                })],
            ))
        }
        Event::TimerFired(TimerKind::BlurClose) => Ok((close_dropdown(state), vec![])),
        Event::WorkerResponse(response) => handle_worker_response(state, response),
    }
}

fn handle_worker_response(
    state: &mut SessionState,
    response: &WorkerResponse,
) -> Result<(bool, Vec<Action>)> {
    match response {
        WorkerResponse::Suggestions {
            request_id,
            text,
            suggestions,
        } => Ok((apply_suggestions(state, *request_id, text, suggestions), vec![])),
        WorkerResponse::SuggestionsFailed {
            request_id,
            message,
            ..
        } => {
            tracing::warn!(request_id, error = %message, "suggestion fetch failed");
            if state.suggest_requests.is_current(*request_id) {
                Ok((close_dropdown(state), vec![]))
            } else {
                Ok((false, vec![]))
            }
        }
        WorkerResponse::SearchCompleted {
            request_id,
            page,
            elapsed_ms,
        } => Ok(apply_search_page(state, *request_id, page, *elapsed_ms)),
        WorkerResponse::SearchFailed {
            request_id,
            message,
        } => {
            if !state.search_requests.is_current(*request_id) {
                tracing::debug!(request_id, "dropping stale search failure");
                return Ok((false, vec![]));
            }
            tracing::warn!(request_id, error = %message, "search failed");
            let query = state.committed.clone().unwrap_or_default();
            state.results = ResultsPanel::Failed {
                query,
                message: SEARCH_FAILED_MESSAGE.to_string(),
            };
            Ok((true, vec![]))
        }
        WorkerResponse::PopularLoaded { queries } if queries.is_empty() => {
            tracing::debug!("no popular queries returned, using fallback");
            state.popular.clone_from(&state.settings.popular_fallback);
            Ok((true, vec![]))
        }
        WorkerResponse::PopularLoaded { queries } => {
            state.popular = queries
                .iter()
                .take(state.settings.popular_limit)
                .cloned()
                .collect();
            Ok((true, vec![]))
        }
        WorkerResponse::PopularFailed { message } => {
            tracing::warn!(error = %message, "popular queries unavailable, using fallback");
            state.popular.clone_from(&state.settings.popular_fallback);
            Ok((true, vec![]))
        }
        WorkerResponse::PreferencesLoaded { history, dark_mode } => {
            state.history.clone_from(history);
            if state.dark_mode_changed {
                tracing::debug!(stored = *dark_mode, "keeping dark mode toggled before load");
            } else {
                state.dark_mode = *dark_mode;
            }
            Ok((true, vec![]))
        }
        WorkerResponse::HistoryUpdated { history } => {
            if &state.history == history {
                return Ok((false, vec![]));
            }
            state.history.clone_from(history);
            Ok((true, vec![]))
        }
        WorkerResponse::DarkModeSaved { .. } => Ok((false, vec![])),
        WorkerResponse::Error { message } => {
            tracing::error!("Worker error: {}", message);
            Ok((false, vec![]))
        }
    }
}

/// Closes the dropdown, returning whether it was open.
fn close_dropdown(state: &mut SessionState) -> bool {
    let was_open = state.dropdown.is_open();
    state.dropdown.close();
    was_open
}

/// Copies a picked suggestion into the input and submits it.
fn pick(state: &mut SessionState, value: String) -> (bool, Vec<Action>) {
    tracing::debug!(value = %value, "suggestion picked");
    state.input.clone_from(&value);
    let category = state.category.clone();
    let (render, mut actions) = submit(state, &value, &category, 0, true);
    actions.insert(0, Action::CancelTimer(TimerKind::BlurClose));
    (render, actions)
}

fn go_to_page(state: &mut SessionState, page: u32) -> (bool, Vec<Action>) {
    let Some(query) = state.committed.clone() else {
        return (false, vec![]);
    };
    let page = state
        .total_pages()
        .filter(|total| *total > 0)
        .map_or(page, |total| page.min(total - 1));
    submit(state, &query.text, &query.category, page, false)
}

/// Validates and submits a search.
///
/// `record` pushes the query onto the search history; paging and retries do
/// not.
fn submit(
    state: &mut SessionState,
    text: &str,
    category: &str,
    page: u32,
    record: bool,
) -> (bool, Vec<Action>) {
    let request = match prepare_search(text, category, page, state.settings.page_size) {
        Ok(request) => request,
        Err(rejection) => {
            tracing::debug!("empty query rejected");
            state.results = ResultsPanel::Validation {
                message: rejection.message().to_string(),
            };
            return (true, vec![]);
        }
    };

    let request_id = state.search_requests.issue();
    tracing::debug!(
        request_id,
        query = %request.query.text,
        category = %request.query.category,
        page,
        "submitting search"
    );

    state.committed = Some(request.query.clone());
    state.page = page;
    state.results = ResultsPanel::Loading {
        query: request.query.clone(),
    };
    state.dropdown.close();
    state.suggest_requests.invalidate();

    let mut actions = vec![Action::CancelTimer(TimerKind::Suggest)];
    if record {
        actions.push(Action::PostToWorker(WorkerMessage::RecordHistory {
            query: request.query.text.clone(),
        }));
    }
    actions.push(Action::PostToWorker(WorkerMessage::Search {
        request_id,
        request,
    }));

    (true, actions)
}

fn apply_suggestions(
    state: &mut SessionState,
    request_id: RequestId,
    text: &str,
    suggestions: &[Suggestion],
) -> bool {
    if !state.suggest_requests.is_current(request_id) || text != state.trimmed_input() {
        tracing::debug!(request_id, text = %text, "dropping stale suggestions");
        return false;
    }

    tracing::debug!(request_id, count = suggestions.len(), "suggestions applied");
    let was_open = state.dropdown.is_open();
    state.dropdown = Dropdown::from_items(suggestions.to_vec());
    was_open || state.dropdown.is_open()
}

fn apply_search_page(
    state: &mut SessionState,
    request_id: RequestId,
    page: &SearchResultPage,
    elapsed_ms: u64,
) -> (bool, Vec<Action>) {
    if !state.search_requests.is_current(request_id) {
        tracing::debug!(request_id, "dropping stale search results");
        return (false, vec![]);
    }

    let query = state.committed.clone().unwrap_or_default();
    let previous_page = state.shown_page;
    state.dropdown.close();

    if page.is_empty() {
        tracing::debug!(request_id, query = %query.text, "search returned no results");
        state.shown_page = None;
        state.results = ResultsPanel::NoResults { query };
        return (true, vec![]);
    }

    tracing::debug!(
        request_id,
        total = page.total_count,
        page = page.page_index,
        elapsed_ms,
        "search results applied"
    );

    state.page = page.page_index;
    state.shown_page = Some(page.page_index);
    state.results = ResultsPanel::Loaded {
        query,
        page: page.clone(),
        elapsed_ms,
    };

    let mut actions = vec![];
    if previous_page.is_some_and(|previous| previous != page.page_index) {
        actions.push(Action::ScrollToResults);
    }
    (true, actions)
}
