//! Serper.dev API client

use crate::error::{IntelError, Result};
use crate::types::{NewsResponse, SearchResponse, WebIntelligence};
use futures::future::join_all;
use serde_json::json;
use tracing::{debug, warn};

const SEARCH_URL: &str = "https://google.serper.dev/search";
const NEWS_URL: &str = "https://google.serper.dev/news";

/// Results requested per general search query
const GENERAL_RESULT_COUNT: usize = 10;

/// Results requested from the dedicated news endpoint
const NEWS_RESULT_COUNT: usize = 20;

/// Serper.dev search client
///
/// Auth is a static API key sent in the `X-API-KEY` header.
pub struct SerperClient {
    client: reqwest::Client,
    api_key: String,
}

impl SerperClient {
    /// Create a new client with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
        }
    }

    /// Run one general search query
    pub async fn search(&self, query: &str, count: usize) -> Result<SearchResponse> {
        let response = self
            .client
            .post(SEARCH_URL)
            .header("X-API-KEY", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&json!({ "q": query, "num": count }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(IntelError::ApiStatus { status, body });
        }

        response
            .json::<SearchResponse>()
            .await
            .map_err(|e| IntelError::Parse(e.to_string()))
    }

    /// Run one query against the dedicated news endpoint
    pub async fn news(&self, query: &str, count: usize) -> Result<NewsResponse> {
        let response = self
            .client
            .post(NEWS_URL)
            .header("X-API-KEY", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&json!({ "q": query, "num": count }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(IntelError::ApiStatus { status, body });
        }

        response
            .json::<NewsResponse>()
            .await
            .map_err(|e| IntelError::Parse(e.to_string()))
    }

    /// Gather comprehensive web intelligence for one stock
    ///
    /// Issues four general searches (analysis, financial results, price
    /// target, latest news) plus one dedicated news query, all concurrently,
    /// and aggregates whatever succeeded. A failed call contributes nothing
    /// but never aborts the others.
    pub async fn gather(&self, symbol: &str, company: &str) -> WebIntelligence {
        let queries = [
            format!("{company} {symbol} stock analysis India"),
            format!("{company} financial results earnings India"),
            format!("{company} stock price target India"),
            format!("{company} news latest India"),
        ];

        let searches = join_all(
            queries
                .iter()
                .map(|q| self.search(q, GENERAL_RESULT_COUNT)),
        );
        let news_query = format!("{company} {symbol} stock news India");
        let news = self.news(&news_query, NEWS_RESULT_COUNT);

        let (search_outcomes, news_outcome) = futures::join!(searches, news);

        let general: Vec<SearchResponse> = search_outcomes
            .into_iter()
            .zip(queries.iter())
            .map(|(outcome, query)| match outcome {
                Ok(response) => response,
                Err(e) => {
                    warn!("Search query '{query}' failed: {e}");
                    SearchResponse::default()
                }
            })
            .collect();

        let dedicated_news = match news_outcome {
            Ok(response) => response.news,
            Err(e) => {
                warn!("News query '{news_query}' failed: {e}");
                Vec::new()
            }
        };

        let intel = WebIntelligence::aggregate(company, general, dedicated_news);
        debug!(
            "Gathered {} news items and {} search results for {symbol}",
            intel.news.len(),
            intel.search_results.len()
        );
        intel
    }
}
