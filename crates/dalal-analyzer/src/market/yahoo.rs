//! Yahoo Finance price-history client

use crate::error::{AnalyzerError, Result};
use crate::market::series::{Bar, PriceSeries};
use chrono::{DateTime, Utc};
use yahoo_finance_api as yahoo;

/// Yahoo Finance history client
pub struct YahooHistoryClient {}

impl YahooHistoryClient {
    /// Create a new history client
    pub fn new() -> Self {
        Self {}
    }

    /// Fetch OHLCV history for a period and interval
    ///
    /// `period` is a Yahoo range string ("5d", "1mo", "1y", ...), `interval`
    /// a bar width ("1h", "1d", ...).
    pub async fn history(&self, symbol: &str, period: &str, interval: &str) -> Result<PriceSeries> {
        let provider = yahoo::YahooConnector::new()
            .map_err(|e| AnalyzerError::MarketData(e.to_string()))?;

        let response = provider
            .get_quote_range(symbol, interval, period)
            .await
            .map_err(|e| AnalyzerError::MarketData(e.to_string()))?;

        let quotes = response
            .quotes()
            .map_err(|e| AnalyzerError::MarketData(e.to_string()))?;

        let bars = quotes
            .iter()
            .map(|q| Bar {
                timestamp: DateTime::from_timestamp(q.timestamp as i64, 0)
                    .unwrap_or_else(Utc::now),
                open: q.open,
                high: q.high,
                low: q.low,
                close: q.close,
                volume: q.volume,
            })
            .collect();

        Ok(PriceSeries::new(bars))
    }
}

impl Default for YahooHistoryClient {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for YahooHistoryClient {
    fn clone(&self) -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_history() {
        let client = YahooHistoryClient::new();
        let series = client.history("RELIANCE.NS", "1mo", "1d").await.unwrap();

        assert!(!series.is_empty());
        assert!(series.last().unwrap().close > 0.0);
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_history_invalid_symbol_is_an_error() {
        let client = YahooHistoryClient::new();
        let outcome = client.history("NOT-A-SYMBOL-12345.NS", "1mo", "1d").await;
        assert!(outcome.is_err());
    }
}
