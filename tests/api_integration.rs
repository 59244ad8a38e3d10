//! Integration tests for the HTTP search client and the worker round trip.
//!
//! Every test starts a local mock server, points an `HttpSearchApi` at it and
//! drives the session through the same `Controller` and `SearchWorker` the
//! binary uses.

use findy::api::{ApiSettings, HttpSearchApi, SearchApi};
use findy::app::modes::ResultsPanel;
use findy::app::scheduler::ManualClock;
use findy::app::state::SEARCH_FAILED_MESSAGE;
use findy::app::{Controller, InteractionSettings, SessionState};
use findy::domain::Suggestion;
use findy::storage::JsonStorage;
use findy::worker::SearchWorker;
use findy::{Action, Event};
use std::collections::VecDeque;
use tempfile::TempDir;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings(server: &MockServer) -> ApiSettings {
    ApiSettings::new(Url::parse(&server.uri()).unwrap())
}

struct Harness {
    controller: Controller<ManualClock>,
    worker: SearchWorker<HttpSearchApi>,
    _dir: TempDir,
}

impl Harness {
    fn new(settings: ApiSettings) -> Self {
        let dir = TempDir::new().unwrap();
        let storage = JsonStorage::new(dir.path().join("preferences.json"), 10).unwrap();
        let api = HttpSearchApi::new(settings).unwrap();
        Self {
            controller: Controller::new(
                SessionState::new(InteractionSettings::default()),
                ManualClock::new(),
            ),
            worker: SearchWorker::new(api, Box::new(storage)),
            _dir: dir,
        }
    }

    /// Dispatches `event` and runs every resulting worker message to completion.
    async fn run(&mut self, event: Event) {
        let outcome = self.controller.dispatch(&event).unwrap();
        let mut pending: VecDeque<Action> = outcome.actions.into();

        while let Some(action) = pending.pop_front() {
            if let Action::PostToWorker(message) = action {
                let response = self.worker.handle_message(message).await;
                let outcome = self
                    .controller
                    .dispatch(&Event::WorkerResponse(response))
                    .unwrap();
                pending.extend(outcome.actions);
            }
        }
    }

    fn results(&self) -> &ResultsPanel {
        &self.controller.state().results
    }
}

#[tokio::test]
async fn test_search_sends_category_and_paging_params() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/search"))
        .and(query_param("q", "ai"))
        .and(query_param("category", "경제"))
        .and(query_param("page", "0"))
        .and(query_param("size", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "content": [],
            "totalElements": 0,
            "totalPages": 0,
            "number": 0
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut harness = Harness::new(settings(&server));
    harness.run(Event::SelectCategory("경제".to_string())).await;
    harness.run(Event::SearchFor("ai".to_string())).await;

    match harness.results() {
        ResultsPanel::NoResults { query } => {
            assert_eq!(query.text, "ai");
            assert_eq!(query.category, "경제");
        }
        other => panic!("Expected NoResults, got: {other:?}"),
    }
    assert_eq!(harness.controller.state().history, vec!["ai".to_string()]);
}

#[tokio::test]
async fn test_search_without_category_omits_param() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/search"))
        .and(query_param("q", "rust"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "content": [
                {"title": "Rust 2.0", "content": "Editions", "url": "https://news.example/1",
                 "category": "IT", "publishedAt": "2025-01-22T09:00:00"}
            ],
            "totalElements": 31,
            "totalPages": 4,
            "number": 0,
            "size": 10
        })))
        .mount(&server)
        .await;

    let mut harness = Harness::new(settings(&server));
    harness.run(Event::SearchFor("rust".to_string())).await;

    let requests = server.received_requests().await.unwrap();
    assert!(requests
        .iter()
        .all(|request| !request.url.query_pairs().any(|(key, _)| key == "category")));

    let ResultsPanel::Loaded { page, .. } = harness.results() else {
        panic!("Expected Loaded, got: {:?}", harness.results());
    };
    assert_eq!(page.total_count, 31);
    assert_eq!(page.total_pages, 4);
    assert_eq!(page.items[0].title, "Rust 2.0");

    let viewmodel = harness.controller.state().compute_viewmodel();
    let window = viewmodel.pagination.unwrap();
    assert_eq!(window.pages, vec![0, 1, 2]);
    assert!(window.show_last);
}

#[tokio::test]
async fn test_search_500_error_shows_error_panel() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let mut harness = Harness::new(settings(&server));
    harness.run(Event::SearchFor("ai".to_string())).await;

    match harness.results() {
        ResultsPanel::Failed { query, message } => {
            assert_eq!(query.text, "ai");
            assert_eq!(message, SEARCH_FAILED_MESSAGE);
        }
        other => panic!("Expected Failed, got: {other:?}"),
    }
    assert_eq!(
        harness.controller.state().committed.as_ref().map(|q| q.text.as_str()),
        Some("ai")
    );
}

#[tokio::test]
async fn test_malformed_body_is_a_search_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let mut harness = Harness::new(settings(&server));
    harness.run(Event::SearchFor("ai".to_string())).await;

    assert!(matches!(harness.results(), ResultsPanel::Failed { .. }));
}

#[tokio::test]
async fn test_autocomplete_with_legacy_param_name() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/autocomplete"))
        .and(query_param("query", "ai"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!(["ai news", {"query": "ai chips", "count": 3}])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut settings = settings(&server);
    settings.autocomplete_path = "/api/autocomplete".to_string();
    settings.query_param = "query".to_string();
    let api = HttpSearchApi::new(settings).unwrap();

    let suggestions = api.autocomplete("ai").await.unwrap();
    assert_eq!(
        suggestions,
        vec![
            Suggestion::new("ai news"),
            Suggestion {
                value: "ai chips".to_string(),
                count: Some(3),
            },
        ]
    );
}

#[tokio::test]
async fn test_popular_failure_uses_fallback_tags() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/search/popular"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let mut harness = Harness::new(settings(&server));
    harness.run(Event::Started).await;

    assert_eq!(
        harness.controller.state().popular,
        InteractionSettings::default().popular_fallback
    );
}

#[tokio::test]
async fn test_popular_is_capped() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/search/popular"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!(["a", "b", "c", "d", "e", "f", "g"])),
        )
        .mount(&server)
        .await;

    let mut harness = Harness::new(settings(&server));
    harness.run(Event::Started).await;

    assert_eq!(harness.controller.state().popular, vec!["a", "b", "c", "d", "e"]);
}
