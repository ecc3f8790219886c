//! Market data access: price history plus fundamentals
//!
//! [`MarketDataClient::fetch`] joins both provider calls and never fails:
//! either part degrades to its empty counterpart, and an all-empty
//! [`MarketSnapshot`] is the caller's signal to stop the pipeline with a
//! user-facing "no data" state.

pub mod fundamentals;
pub mod series;
pub mod yahoo;

pub use fundamentals::{Fundamentals, FundamentalsClient};
pub use series::{Bar, PriceSeries};
pub use yahoo::YahooHistoryClient;

use crate::error::Result;
use crate::symbol::TickerSymbol;
use std::time::Duration;
use tracing::warn;

/// Joint result of one market-data fetch
#[derive(Debug, Clone, Default)]
pub struct MarketSnapshot {
    /// OHLCV history, possibly empty
    pub series: PriceSeries,

    /// Descriptive and valuation fields, possibly empty
    pub fundamentals: Fundamentals,
}

impl MarketSnapshot {
    /// True when neither part came back; callers must treat this as
    /// "no data available" and not derive indicators from it
    pub fn is_empty(&self) -> bool {
        self.series.is_empty() && self.fundamentals.is_empty()
    }
}

/// Market-data client joining price history with fundamentals
pub struct MarketDataClient {
    history: YahooHistoryClient,
    fundamentals: FundamentalsClient,
}

impl MarketDataClient {
    /// Create a new client with the given request timeout
    pub fn new(timeout: Duration) -> Result<Self> {
        Ok(Self {
            history: YahooHistoryClient::new(),
            fundamentals: FundamentalsClient::new(timeout)?,
        })
    }

    /// Fetch history and fundamentals for one symbol
    ///
    /// The two calls run concurrently. A failed call degrades to the empty
    /// value for its part; no provider error propagates out of here.
    pub async fn fetch(
        &self,
        symbol: &TickerSymbol,
        period: &str,
        interval: &str,
    ) -> MarketSnapshot {
        let (series_outcome, fundamentals_outcome) = tokio::join!(
            self.history.history(symbol.as_str(), period, interval),
            self.fundamentals.fetch(symbol.as_str()),
        );

        let series = match series_outcome {
            Ok(series) => series,
            Err(e) => {
                warn!("Price history for {symbol} unavailable: {e}");
                PriceSeries::empty()
            }
        };

        let fundamentals = match fundamentals_outcome {
            Ok(fundamentals) => fundamentals,
            Err(e) => {
                warn!("Fundamentals for {symbol} unavailable: {e}");
                Fundamentals::empty()
            }
        };

        MarketSnapshot {
            series,
            fundamentals,
        }
    }
}
