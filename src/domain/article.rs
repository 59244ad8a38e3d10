//! News article, result page and suggestion models.
//!
//! These are the render-friendly shapes the rest of the crate works with. The
//! API's JSON is decoded into them by [`crate::api::wire`], which also absorbs
//! the differences between server variants (field aliases, string vs. object
//! suggestions).

use serde::{Deserialize, Serialize};

/// One autocomplete candidate.
///
/// `count` is the server-reported popularity, when the server provides it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub value: String,
    pub count: Option<u64>,
}

impl Suggestion {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            count: None,
        }
    }
}

/// A single search hit, taken verbatim from the API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultItem {
    pub title: String,
    pub body: String,
    pub url: String,
    pub category: Option<String>,
    pub author: Option<String>,
    pub published_at: Option<String>,
    pub tags: Vec<String>,
}

/// One page of search results.
///
/// Invariant: `page_index < total_pages` whenever `total_pages > 0`. The
/// constructor clamps the index to uphold it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultPage {
    pub items: Vec<ResultItem>,
    pub total_count: u64,
    pub page_index: u32,
    pub page_size: u32,
    pub total_pages: u32,
}

impl SearchResultPage {
    /// Builds a page, clamping `page_index` into `0..total_pages`.
    ///
    /// # Examples
    ///
    /// ```
    /// use findy::domain::SearchResultPage;
    ///
    /// let page = SearchResultPage::new(vec![], 0, 7, 10, 3);
    /// assert_eq!(page.page_index, 2);
    /// ```
    #[must_use]
    pub fn new(
        items: Vec<ResultItem>,
        total_count: u64,
        page_index: u32,
        page_size: u32,
        total_pages: u32,
    ) -> Self {
        let page_index = if total_pages > 0 {
            page_index.min(total_pages - 1)
        } else {
            page_index
        };

        Self {
            items,
            total_count,
            page_index,
            page_size,
            total_pages,
        }
    }

    /// Returns `true` when the server found nothing for the query.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
