//! Web intelligence gathering for dalal
//!
//! This crate wraps the Serper.dev search API and aggregates the results of
//! a fixed set of stock-related queries into a bounded [`WebIntelligence`]
//! snapshot: recent news items plus general search results for one company.
//!
//! Individual query failures degrade to empty contributions; the gather
//! operation itself never fails.

pub mod client;
pub mod error;
pub mod types;

// Re-export main types
pub use client::SerperClient;
pub use error::{IntelError, Result};
pub use types::{
    MAX_NEWS_ITEMS, MAX_SEARCH_RESULTS, NewsItem, NewsResponse, SearchResponse, SearchResult,
    WebIntelligence,
};
