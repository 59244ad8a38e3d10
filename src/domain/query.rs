//! Search query domain model.
//!
//! A [`Query`] is the finalized pair of search text and category filter that the
//! search dispatcher submits. Text is always stored trimmed; an empty category
//! means "all categories" and is never sent to the server.
//!
//! A [`SearchRequest`] adds the page coordinates and knows how to lay itself out
//! as URL query pairs.

use serde::{Deserialize, Serialize};

/// A finalized search query.
///
/// # Fields
///
/// - `text`: Trimmed search text. Empty text is valid for clearing suggestions
///   but never for submission (see [`Query::is_submittable`]).
/// - `category`: Category filter, empty for "all".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub text: String,
    pub category: String,
}

impl Query {
    /// Creates a query, trimming both the text and the category.
    ///
    /// # Examples
    ///
    /// ```
    /// use findy::domain::Query;
    ///
    /// let query = Query::new("  ai  ", " 경제 ");
    /// assert_eq!(query.text, "ai");
    /// assert_eq!(query.category, "경제");
    /// ```
    #[must_use]
    pub fn new(text: impl AsRef<str>, category: impl AsRef<str>) -> Self {
        Self {
            text: text.as_ref().trim().to_string(),
            category: category.as_ref().trim().to_string(),
        }
    }

    /// Returns `true` if the query has non-empty text and may be submitted.
    #[must_use]
    pub fn is_submittable(&self) -> bool {
        !self.text.is_empty()
    }

    /// Returns the category filter, or `None` when searching all categories.
    #[must_use]
    pub fn category_filter(&self) -> Option<&str> {
        if self.category.is_empty() {
            None
        } else {
            Some(&self.category)
        }
    }

    /// Human-readable title for a results header.
    ///
    /// `"ai" (경제)` when a category is set, `"ai"` otherwise.
    #[must_use]
    pub fn title(&self) -> String {
        match self.category_filter() {
            Some(category) => format!("\"{}\" ({category})", self.text),
            None => format!("\"{}\"", self.text),
        }
    }
}

/// A query plus the page to fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: Query,
    pub page: u32,
    pub size: u32,
}

impl SearchRequest {
    #[must_use]
    pub const fn new(query: Query, page: u32, size: u32) -> Self {
        Self { query, page, size }
    }

    /// URL query pairs in wire order: text, category (only when set), page, size.
    ///
    /// `text_param` is the name the server expects for the search text,
    /// usually `q`.
    ///
    /// # Examples
    ///
    /// ```
    /// use findy::domain::{Query, SearchRequest};
    ///
    /// let request = SearchRequest::new(Query::new("ai", ""), 2, 10);
    /// let pairs = request.query_pairs("q");
    /// assert_eq!(pairs[0], ("q", "ai".to_string()));
    /// assert_eq!(pairs.len(), 3);
    /// ```
    #[must_use]
    pub fn query_pairs<'a>(&'a self, text_param: &'a str) -> Vec<(&'a str, String)> {
        let mut pairs = vec![(text_param, self.query.text.clone())];
        if let Some(category) = self.query.category_filter() {
            pairs.push(("category", category.to_string()));
        }
        pairs.push(("page", self.page.to_string()));
        pairs.push(("size", self.size.to_string()));
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_text_is_not_submittable() {
        assert!(!Query::new("   ", "").is_submittable());
        assert!(Query::new(" a ", "").is_submittable());
    }

    #[test]
    fn blank_category_means_no_filter() {
        assert_eq!(Query::new("ai", "  ").category_filter(), None);
        assert_eq!(Query::new("ai", "스포츠").category_filter(), Some("스포츠"));
    }

    #[test]
    fn title_includes_category_when_present() {
        assert_eq!(Query::new("ai", "경제").title(), "\"ai\" (경제)");
        assert_eq!(Query::new("ai", "").title(), "\"ai\"");
    }

    #[test]
    fn request_pairs_include_category_only_when_set() {
        let request = SearchRequest::new(Query::new("ai", "경제"), 0, 10);
        assert_eq!(
            request.query_pairs("q"),
            vec![
                ("q", "ai".to_string()),
                ("category", "경제".to_string()),
                ("page", "0".to_string()),
                ("size", "10".to_string()),
            ]
        );

        let all = SearchRequest::new(Query::new("ai", ""), 3, 20);
        let keys: Vec<&str> = all.query_pairs("query").iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["query", "page", "size"]);
    }
}
