//! OHLCV price series

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One OHLCV bar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Bar timestamp
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Ordered sequence of bars, ascending by timestamp
///
/// An empty series is a valid "no data" result, not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    bars: Vec<Bar>,
}

impl PriceSeries {
    /// Build a series, enforcing ascending timestamp order
    pub fn new(mut bars: Vec<Bar>) -> Self {
        bars.sort_by_key(|bar| bar.timestamp);
        Self { bars }
    }

    /// The empty series
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when the series holds no bars
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Number of bars
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// All bars, oldest first
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// The most recent bar
    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    /// Closing prices, oldest first
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|bar| bar.close).collect()
    }

    /// Volumes, oldest first
    pub fn volumes(&self) -> Vec<f64> {
        self.bars.iter().map(|bar| bar.volume as f64).collect()
    }
}
