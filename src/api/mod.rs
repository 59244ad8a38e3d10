//! Client for the external news search REST API.
//!
//! - `client`: The [`SearchApi`] trait and its reqwest implementation
//! - `wire`: JSON response shapes and their conversion to domain types

pub mod client;
pub mod wire;

pub use client::{
    ApiSettings, HttpSearchApi, SearchApi, DEFAULT_AUTOCOMPLETE_PATH, DEFAULT_POPULAR_PATH,
    DEFAULT_SEARCH_PATH,
};
