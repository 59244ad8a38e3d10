//! JSON shapes returned by the news search API.
//!
//! The server has shipped in two flavours: a Spring `Page` style response
//! (`content`, `totalElements`, `totalPages`, `number`, `size`) and an older
//! DTO (`documents`, `currentPage`, `pageSize`). Both decode into
//! [`SearchPageDto`]. Autocomplete answers with either bare strings or
//! `{ "query": ..., "count": ... }` objects.
//!
//! Decoding is lenient: missing arrays and counters default to empty/zero so
//! a partially filled response still renders.

use crate::domain::{ResultItem, SearchResultPage, Suggestion};
use serde::Deserialize;

/// One autocomplete entry as sent by the server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SuggestionDto {
    Text(String),
    Entry {
        #[serde(alias = "value", alias = "text")]
        query: String,
        #[serde(default)]
        count: Option<u64>,
    },
}

impl From<SuggestionDto> for Suggestion {
    fn from(dto: SuggestionDto) -> Self {
        match dto {
            SuggestionDto::Text(value) => Self { value, count: None },
            SuggestionDto::Entry { query, count } => Self {
                value: query,
                count,
            },
        }
    }
}

/// One article as sent by the server.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDto {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, alias = "body")]
    pub content: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl From<ArticleDto> for ResultItem {
    fn from(dto: ArticleDto) -> Self {
        Self {
            title: dto.title.unwrap_or_default(),
            body: dto.content.unwrap_or_default(),
            url: dto.url.unwrap_or_default(),
            category: dto.category,
            author: dto.author,
            published_at: dto.published_at.filter(|date| !date.is_empty()),
            tags: dto.tags.unwrap_or_default(),
        }
    }
}

/// A page of search results as sent by the server.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPageDto {
    #[serde(default, alias = "documents")]
    pub content: Vec<ArticleDto>,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default, alias = "currentPage")]
    pub number: u32,
    #[serde(default, alias = "pageSize")]
    pub size: u32,
}

impl SearchPageDto {
    /// Converts to the domain page, falling back to `requested_size` when the
    /// server omits the page size.
    #[must_use]
    pub fn into_page(self, requested_size: u32) -> SearchResultPage {
        let size = if self.size == 0 { requested_size } else { self.size };
        SearchResultPage::new(
            self.content.into_iter().map(ResultItem::from).collect(),
            self.total_elements,
            self.number,
            size,
            self.total_pages,
        )
    }
}
