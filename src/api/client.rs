//! HTTP client for the news search API.
//!
//! [`SearchApi`] is the seam between the worker and the network: production
//! uses [`HttpSearchApi`] (reqwest), tests can substitute an in-memory fake.

use super::wire::{SearchPageDto, SuggestionDto};
use crate::domain::error::{FindyError, Result};
use crate::domain::{SearchRequest, SearchResultPage, Suggestion};
use serde::de::DeserializeOwned;
use std::future::Future;
use std::time::Duration;
use url::Url;

/// The three calls the front end makes.
///
/// All implementations must be `Send + Sync`: the worker runs requests
/// concurrently on a multi-threaded runtime.
pub trait SearchApi: Send + Sync {
    /// Suggestions for the (already trimmed) input text.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or a body
    /// that is not a suggestion array.
    fn autocomplete(&self, text: &str) -> impl Future<Output = Result<Vec<Suggestion>>> + Send;

    /// Popular queries, most popular first.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or a body
    /// that is not a string array.
    fn popular(&self) -> impl Future<Output = Result<Vec<String>>> + Send;

    /// One page of results.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or a body
    /// that is not a search page.
    fn search(&self, request: &SearchRequest) -> impl Future<Output = Result<SearchResultPage>> + Send;
}

pub const DEFAULT_AUTOCOMPLETE_PATH: &str = "/api/search/autocomplete";
pub const DEFAULT_POPULAR_PATH: &str = "/api/search/popular";
pub const DEFAULT_SEARCH_PATH: &str = "/api/search";

/// Where the API lives and how it is addressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiSettings {
    pub base_url: Url,
    /// Absolute path of the autocomplete endpoint.
    pub autocomplete_path: String,
    pub popular_path: String,
    pub search_path: String,
    /// Name of the text parameter: `q` on current servers, `query` on older ones.
    pub query_param: String,
    /// Per-request timeout; `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl ApiSettings {
    /// Settings for a server at `base_url` using the default paths.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            autocomplete_path: DEFAULT_AUTOCOMPLETE_PATH.to_string(),
            popular_path: DEFAULT_POPULAR_PATH.to_string(),
            search_path: DEFAULT_SEARCH_PATH.to_string(),
            query_param: "q".to_string(),
            timeout: None,
        }
    }
}

/// [`SearchApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSearchApi {
    client: reqwest::Client,
    settings: ApiSettings,
}

impl HttpSearchApi {
    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns [`FindyError::Http`] if the underlying client cannot be built.
    pub fn new(settings: ApiSettings) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("findy/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| FindyError::Http(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, settings })
    }

    #[must_use]
    pub const fn settings(&self) -> &ApiSettings {
        &self.settings
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.settings
            .base_url
            .join(path)
            .map_err(|e| FindyError::Config(format!("invalid endpoint path {path:?}: {e}")))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let url = self.endpoint(path)?;
        tracing::debug!(url = %url, params = ?query, "GET");

        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<T>().await?)
    }
}

impl SearchApi for HttpSearchApi {
    async fn autocomplete(&self, text: &str) -> Result<Vec<Suggestion>> {
        let query = [(self.settings.query_param.as_str(), text.to_string())];
        let dtos: Vec<SuggestionDto> = self.get_json(&self.settings.autocomplete_path, &query).await?;
        Ok(dtos.into_iter().map(Suggestion::from).collect())
    }

    async fn popular(&self) -> Result<Vec<String>> {
        self.get_json(&self.settings.popular_path, &[]).await
    }

    async fn search(&self, request: &SearchRequest) -> Result<SearchResultPage> {
        let query = request.query_pairs(&self.settings.query_param);
        let dto: SearchPageDto = self.get_json(&self.settings.search_path, &query).await?;
        Ok(dto.into_page(request.size))
    }
}
