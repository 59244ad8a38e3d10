//! Domain layer for the findy front end.
//!
//! This module contains the core domain types, independent of the HTTP client,
//! storage format, or presentation surface.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`query`]: The submitted query (text + category)
//! - [`article`]: Result items, result pages and autocomplete suggestions
//!
//! # Examples
//!
//! ```
//! use findy::domain::{Query, Result};
//!
//! fn build() -> Result<Query> {
//!     Ok(Query::new("ai", "경제"))
//! }
//! # assert!(build().is_ok());
//! ```

pub mod article;
pub mod error;
pub mod query;

pub use article::{ResultItem, SearchResultPage, Suggestion};
pub use error::{FindyError, Result};
pub use query::{Query, SearchRequest};
