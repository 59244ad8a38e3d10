//! Worker executing network and storage requests off the event loop.
//!
//! [`SearchWorker::handle_message`] turns one [`WorkerMessage`] into one
//! [`WorkerResponse`]. [`SearchWorker::spawn`] runs it as a tokio task and
//! sends the response down a channel, so a slow search never delays a
//! suggestion fetch or a keystroke.
//!
//! Storage messages are different: they run one at a time, in the order they
//! were spawned, on a single queue task. Each one executes on tokio's blocking
//! pool because the backend does synchronous file I/O.

use crate::api::SearchApi;
use crate::app::dispatch::RequestId;
use crate::domain::error::{FindyError, Result};
use crate::domain::SearchRequest;
use crate::storage::backend::Storage;
use crate::storage::history::queries;
use crate::worker::{WorkerMessage, WorkerResponse};
use std::sync::{Arc, Mutex, OnceLock};
use std::time::Instant;
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::Instrument;

type SharedStorage = Arc<Mutex<Box<dyn Storage>>>;
type StorageJob = (WorkerMessage, UnboundedSender<WorkerResponse>);

/// Executes worker messages against an API and a storage backend.
pub struct SearchWorker<A> {
    api: Arc<A>,
    storage: SharedStorage,
    /// Feeds the storage queue task; started on the first spawned storage message.
    storage_queue: Arc<OnceLock<UnboundedSender<StorageJob>>>,
}

impl<A> Clone for SearchWorker<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            storage: Arc::clone(&self.storage),
            storage_queue: Arc::clone(&self.storage_queue),
        }
    }
}

impl<A: SearchApi + 'static> SearchWorker<A> {
    #[must_use]
    pub fn new(api: A, storage: Box<dyn Storage>) -> Self {
        Self {
            api: Arc::new(api),
            storage: Arc::new(Mutex::new(storage)),
            storage_queue: Arc::new(OnceLock::new()),
        }
    }

    /// Runs `message` on the tokio runtime and sends the response to `responses`.
    ///
    /// Storage messages are queued behind earlier ones so history writes
    /// land, and are answered, in submission order. A closed channel means
    /// the session ended; the response is dropped.
    pub fn spawn(&self, message: WorkerMessage, responses: UnboundedSender<WorkerResponse>) {
        if message.is_storage() {
            if let Err(mpsc::error::SendError((message, _))) = self.storage_queue().send((message, responses)) {
                tracing::warn!(message = ?message, "storage queue closed, dropping message");
            }
            return;
        }

        let worker = self.clone();
        tokio::spawn(async move {
            let response = worker.handle_message(message).await;
            if responses.send(response).is_err() {
                tracing::debug!("response channel closed, dropping worker response");
            }
        });
    }

    fn storage_queue(&self) -> &UnboundedSender<StorageJob> {
        self.storage_queue.get_or_init(|| {
            let (sender, mut jobs) = mpsc::unbounded_channel::<StorageJob>();
            let storage = Arc::clone(&self.storage);
            tokio::spawn(async move {
                while let Some((message, responses)) = jobs.recv().await {
                    let span = tracing::debug_span!("worker_storage_message", message_type = ?message);
                    let response = run_storage(Arc::clone(&storage), message).instrument(span).await;
                    if responses.send(response).is_err() {
                        tracing::debug!("response channel closed, dropping storage response");
                    }
                }
            });
            sender
        })
    }

    /// Processes a worker message and returns the response.
    pub async fn handle_message(&self, message: WorkerMessage) -> WorkerResponse {
        let span = tracing::debug_span!("worker_handle_message", message_type = ?message);
        self.dispatch(message).instrument(span).await
    }

    async fn dispatch(&self, message: WorkerMessage) -> WorkerResponse {
        match message {
            WorkerMessage::FetchSuggestions { request_id, text } => {
                match self.api.autocomplete(&text).await {
                    Ok(suggestions) => {
                        tracing::debug!(request_id, count = suggestions.len(), "suggestions fetched");
                        WorkerResponse::Suggestions {
                            request_id,
                            text,
                            suggestions,
                        }
                    }
                    Err(e) => WorkerResponse::SuggestionsFailed {
                        request_id,
                        text,
                        message: e.to_string(),
                    },
                }
            }
            WorkerMessage::Search { request_id, request } => self.handle_search(request_id, &request).await,
            WorkerMessage::LoadPopular { limit } => match self.api.popular().await {
                Ok(mut queries) => {
                    queries.truncate(limit);
                    WorkerResponse::PopularLoaded { queries }
                }
                Err(e) => WorkerResponse::PopularFailed {
                    message: e.to_string(),
                },
            },
            WorkerMessage::LoadPreferences
            | WorkerMessage::RecordHistory { .. }
            | WorkerMessage::ClearHistory
            | WorkerMessage::SaveDarkMode { .. } => run_storage(Arc::clone(&self.storage), message).await,
        }
    }

    async fn handle_search(&self, request_id: RequestId, request: &SearchRequest) -> WorkerResponse {
        let started = Instant::now();
        let result = self.api.search(request).await;
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        match result {
            Ok(page) => {
                tracing::debug!(
                    request_id,
                    items = page.items.len(),
                    total = page.total_count,
                    elapsed_ms,
                    "search completed"
                );
                WorkerResponse::SearchCompleted {
                    request_id,
                    page,
                    elapsed_ms,
                }
            }
            Err(e) => WorkerResponse::SearchFailed {
                request_id,
                message: e.to_string(),
            },
        }
    }
}

/// Runs one storage message on the blocking pool.
async fn run_storage(storage: SharedStorage, message: WorkerMessage) -> WorkerResponse {
    tokio::task::spawn_blocking(move || apply_storage(&storage, message))
        .await
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, "storage task panicked");
            WorkerResponse::Error {
                message: format!("storage task failed: {e}"),
            }
        })
}

fn apply_storage(storage: &Mutex<Box<dyn Storage>>, message: WorkerMessage) -> WorkerResponse {
    match message {
        WorkerMessage::LoadPreferences => handle_db_result(
            "load preferences",
            with_storage(storage, |storage| Ok((storage.history()?, storage.dark_mode()?))),
            |(history, dark_mode)| WorkerResponse::PreferencesLoaded {
                history: queries(&history),
                dark_mode,
            },
        ),
        WorkerMessage::RecordHistory { query } => {
            let timestamp = chrono::Utc::now().timestamp();
            handle_db_result(
                "record history",
                with_storage(storage, |storage| storage.record_search(&query, timestamp)),
                |history| WorkerResponse::HistoryUpdated {
                    history: queries(&history),
                },
            )
        }
        WorkerMessage::ClearHistory => handle_db_result(
            "clear history",
            with_storage(storage, |storage| storage.clear_history()),
            |()| WorkerResponse::HistoryUpdated { history: vec![] },
        ),
        WorkerMessage::SaveDarkMode { enabled } => handle_db_result(
            "save dark mode",
            with_storage(storage, |storage| storage.set_dark_mode(enabled)),
            |()| WorkerResponse::DarkModeSaved { enabled },
        ),
        other => WorkerResponse::Error {
            message: format!("not a storage message: {other:?}"),
        },
    }
}

fn with_storage<T>(
    storage: &Mutex<Box<dyn Storage>>,
    operation: impl FnOnce(&mut Box<dyn Storage>) -> Result<T>,
) -> Result<T> {
    let mut storage = storage
        .lock()
        .map_err(|_| FindyError::Worker("storage lock poisoned".to_string()))?;
    operation(&mut storage)
}

/// Standardizes logging and error mapping for storage operations.
fn handle_db_result<T, F>(operation: &str, result: Result<T>, on_success: F) -> WorkerResponse
where
    F: FnOnce(T) -> WorkerResponse,
{
    match result {
        Ok(value) => {
            tracing::debug!(operation = operation, "storage operation successful");
            on_success(value)
        }
        Err(e) => {
            tracing::warn!(operation = operation, error = %e, "storage operation failed");
            WorkerResponse::Error {
                message: format!("{operation}: {e}"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Query, SearchResultPage, Suggestion};
    use crate::storage::JsonStorage;
    use tempfile::TempDir;

    struct FakeApi {
        fail: bool,
    }

    impl SearchApi for FakeApi {
        async fn autocomplete(&self, text: &str) -> Result<Vec<Suggestion>> {
            if self.fail {
                return Err(FindyError::Http("503 Service Unavailable".to_string()));
            }
            Ok(vec![Suggestion::new(format!("{text} news"))])
        }

        async fn popular(&self) -> Result<Vec<String>> {
            if self.fail {
                return Err(FindyError::Http("503 Service Unavailable".to_string()));
            }
            Ok((1..=8).map(|i| format!("q{i}")).collect())
        }

        async fn search(&self, request: &SearchRequest) -> Result<SearchResultPage> {
            if self.fail {
                return Err(FindyError::Http("503 Service Unavailable".to_string()));
            }
            Ok(SearchResultPage::new(vec![], 0, request.page, request.size, 0))
        }
    }

    fn worker(dir: &TempDir, fail: bool) -> SearchWorker<FakeApi> {
        let storage = JsonStorage::new(dir.path().join("preferences.json"), 10).unwrap();
        SearchWorker::new(FakeApi { fail }, Box::new(storage))
    }

    #[tokio::test]
    async fn suggestions_echo_request_id_and_text() {
        let dir = TempDir::new().unwrap();
        let response = worker(&dir, false)
            .handle_message(WorkerMessage::FetchSuggestions {
                request_id: 7,
                text: "ai".to_string(),
            })
            .await;
        assert_eq!(
            response,
            WorkerResponse::Suggestions {
                request_id: 7,
                text: "ai".to_string(),
                suggestions: vec![Suggestion::new("ai news")],
            }
        );
    }

    #[tokio::test]
    async fn popular_is_truncated_to_limit() {
        let dir = TempDir::new().unwrap();
        let response = worker(&dir, false)
            .handle_message(WorkerMessage::LoadPopular { limit: 5 })
            .await;
        let WorkerResponse::PopularLoaded { queries } = response else {
            panic!("expected popular queries");
        };
        assert_eq!(queries.len(), 5);
    }

    #[tokio::test]
    async fn failures_become_failure_responses() {
        let dir = TempDir::new().unwrap();
        let worker = worker(&dir, true);

        let response = worker
            .handle_message(WorkerMessage::Search {
                request_id: 3,
                request: SearchRequest::new(Query::new("ai", ""), 0, 10),
            })
            .await;
        assert!(matches!(response, WorkerResponse::SearchFailed { request_id: 3, .. }));

        let response = worker.handle_message(WorkerMessage::LoadPopular { limit: 5 }).await;
        assert!(matches!(response, WorkerResponse::PopularFailed { .. }));
    }

    #[tokio::test]
    async fn history_round_trips_through_storage() {
        let dir = TempDir::new().unwrap();
        let worker = worker(&dir, false);

        worker
            .handle_message(WorkerMessage::RecordHistory { query: "ai".to_string() })
            .await;
        let response = worker
            .handle_message(WorkerMessage::RecordHistory { query: "ml".to_string() })
            .await;
        assert_eq!(
            response,
            WorkerResponse::HistoryUpdated {
                history: vec!["ml".to_string(), "ai".to_string()]
            }
        );

        worker.handle_message(WorkerMessage::SaveDarkMode { enabled: true }).await;
        let response = worker.handle_message(WorkerMessage::LoadPreferences).await;
        assert_eq!(
            response,
            WorkerResponse::PreferencesLoaded {
                history: vec!["ml".to_string(), "ai".to_string()],
                dark_mode: true,
            }
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn spawned_storage_messages_apply_in_order() {
        let dir = TempDir::new().unwrap();
        let worker = worker(&dir, false);
        let (responses, mut receiver) = mpsc::unbounded_channel();

        let queries = ["a", "b", "c", "d", "e", "f"];
        for query in queries {
            worker.spawn(
                WorkerMessage::RecordHistory {
                    query: query.to_string(),
                },
                responses.clone(),
            );
        }
        worker.spawn(WorkerMessage::SaveDarkMode { enabled: true }, responses.clone());
        worker.spawn(WorkerMessage::LoadPreferences, responses);

        let mut received = vec![];
        while let Some(response) = receiver.recv().await {
            received.push(response);
        }

        assert_eq!(received.len(), queries.len() + 2);
        for (i, response) in received.iter().take(queries.len()).enumerate() {
            let expected: Vec<String> = queries[..=i].iter().rev().map(|q| (*q).to_string()).collect();
            assert_eq!(response, &WorkerResponse::HistoryUpdated { history: expected });
        }
        assert_eq!(
            received.last(),
            Some(&WorkerResponse::PreferencesLoaded {
                history: vec!["f", "e", "d", "c", "b", "a"].into_iter().map(String::from).collect(),
                dark_mode: true,
            })
        );
    }

    #[test]
    fn storage_messages_are_classified() {
        assert!(WorkerMessage::ClearHistory.is_storage());
        assert!(WorkerMessage::LoadPreferences.is_storage());
        assert!(!WorkerMessage::LoadPopular { limit: 5 }.is_storage());
    }
}
