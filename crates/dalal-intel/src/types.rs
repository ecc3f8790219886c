//! Search and news result types

use serde::{Deserialize, Serialize};

/// Maximum number of news items kept per gather
pub const MAX_NEWS_ITEMS: usize = 30;

/// Maximum number of general search results kept per gather
pub const MAX_SEARCH_RESULTS: usize = 20;

/// A single news item as returned by the provider
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewsItem {
    /// Headline
    #[serde(default)]
    pub title: String,

    /// Short article excerpt
    #[serde(default)]
    pub snippet: String,

    /// Publishing outlet
    #[serde(default)]
    pub source: String,

    /// Article URL
    #[serde(default)]
    pub link: String,
}

/// A single organic search result
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResult {
    /// Result title
    #[serde(default)]
    pub title: String,

    /// Result excerpt
    #[serde(default)]
    pub snippet: String,

    /// Result URL
    #[serde(default)]
    pub link: String,
}

/// Response body of the general search endpoint
///
/// The provider includes a `news` block only when the query happens to
/// surface news stories, so both lists default to empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    /// Organic search results, most relevant first
    #[serde(default)]
    pub organic: Vec<SearchResult>,

    /// News stories matched by the general query
    #[serde(default)]
    pub news: Vec<NewsItem>,
}

/// Response body of the dedicated news endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewsResponse {
    /// News items, most recent first
    #[serde(default)]
    pub news: Vec<NewsItem>,
}

/// Aggregated web intelligence for one company
///
/// Bounded to [`MAX_NEWS_ITEMS`] news items and [`MAX_SEARCH_RESULTS`]
/// search results, in provider order. Items matched by more than one query
/// are kept as-is; no deduplication is performed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WebIntelligence {
    /// News items, general-search matches first, dedicated news after
    pub news: Vec<NewsItem>,

    /// Organic search results in query order
    pub search_results: Vec<SearchResult>,

    /// The company the intelligence was gathered for
    pub subject: String,
}

impl WebIntelligence {
    /// Combine the responses of the general queries and the dedicated news
    /// query into one bounded snapshot.
    ///
    /// News items from the general queries come first (in call order),
    /// followed by the dedicated news results; both lists are truncated to
    /// their caps after concatenation.
    pub fn aggregate(
        subject: impl Into<String>,
        general: Vec<SearchResponse>,
        dedicated_news: Vec<NewsItem>,
    ) -> Self {
        let mut news = Vec::new();
        let mut search_results = Vec::new();

        for response in general {
            news.extend(response.news);
            search_results.extend(response.organic);
        }
        news.extend(dedicated_news);

        news.truncate(MAX_NEWS_ITEMS);
        search_results.truncate(MAX_SEARCH_RESULTS);

        Self {
            news,
            search_results,
            subject: subject.into(),
        }
    }

    /// True when no query contributed anything
    pub fn is_empty(&self) -> bool {
        self.news.is_empty() && self.search_results.is_empty()
    }
}
