//! Derived price and volume indicators
//!
//! Indicators are derived once per query, preferring the price series and
//! falling back to fundamentals when the series is empty. Windows that
//! exceed the available history degrade to the current price (or last
//! volume) instead of erroring. Derivation is pure: identical inputs give
//! identical output, and nothing is cached between queries.

use crate::market::{Fundamentals, PriceSeries};
use serde::Serialize;

/// Indicators derived from one (PriceSeries, Fundamentals) pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorSet {
    /// Last close (or provider's current price)
    pub current_price: f64,

    /// Second-to-last close; equals `current_price` for one-bar series
    pub previous_close: f64,

    /// `current_price - previous_close`
    pub change: f64,

    /// Change as a percentage; 0 whenever `previous_close <= 0`
    pub percent_change: f64,

    /// Mean of the trailing 20 closes, or `current_price` with less history
    pub sma_20: f64,

    /// Mean of the trailing 50 closes, or `current_price` with less history
    pub sma_50: f64,

    /// Highest high of the window
    pub high_52w: f64,

    /// Lowest low of the window
    pub low_52w: f64,

    /// Last bar's volume
    pub volume: f64,

    /// Mean of the trailing 20 volumes, or the last volume with less history
    pub average_volume_20: f64,

    /// Sample standard deviation of close-to-close returns, in percent
    pub volatility: f64,
}

impl IndicatorSet {
    /// Derive the indicator set for one query
    pub fn derive(series: &PriceSeries, fundamentals: &Fundamentals) -> Self {
        if series.is_empty() {
            Self::from_fundamentals(fundamentals)
        } else {
            Self::from_series(series)
        }
    }

    fn from_series(series: &PriceSeries) -> Self {
        let bars = series.bars();
        let closes = series.closes();
        let volumes = series.volumes();

        let current_price = closes.last().copied().unwrap_or_default();
        let previous_close = if closes.len() >= 2 {
            closes[closes.len() - 2]
        } else {
            current_price
        };
        let change = current_price - previous_close;

        let high_52w = bars
            .iter()
            .map(|bar| bar.high)
            .fold(f64::NEG_INFINITY, f64::max);
        let low_52w = bars.iter().map(|bar| bar.low).fold(f64::INFINITY, f64::min);

        let volume = volumes.last().copied().unwrap_or_default();

        Self {
            current_price,
            previous_close,
            change,
            percent_change: percent_change(change, previous_close),
            sma_20: trailing_mean(&closes, 20).unwrap_or(current_price),
            sma_50: trailing_mean(&closes, 50).unwrap_or(current_price),
            high_52w,
            low_52w,
            volume,
            average_volume_20: trailing_mean(&volumes, 20).unwrap_or(volume),
            volatility: volatility_percent(&closes),
        }
    }

    fn from_fundamentals(fundamentals: &Fundamentals) -> Self {
        let current_price = fundamentals
            .number("currentPrice")
            .or_else(|| fundamentals.number("regularMarketPrice"))
            .unwrap_or(0.0);
        let previous_close = fundamentals.number("previousClose").unwrap_or(current_price);
        let change = current_price - previous_close;
        let volume = fundamentals.number("volume").unwrap_or(0.0);

        Self {
            current_price,
            previous_close,
            change,
            percent_change: percent_change(change, previous_close),
            sma_20: current_price,
            sma_50: current_price,
            high_52w: fundamentals
                .number("fiftyTwoWeekHigh")
                .unwrap_or(current_price),
            low_52w: fundamentals
                .number("fiftyTwoWeekLow")
                .unwrap_or(current_price),
            volume,
            average_volume_20: fundamentals.number("averageVolume").unwrap_or(volume),
            volatility: 0.0,
        }
    }
}

/// Mean of the trailing `window` values; `None` with insufficient history
fn trailing_mean(values: &[f64], window: usize) -> Option<f64> {
    if window == 0 || values.len() < window {
        return None;
    }
    let tail = &values[values.len() - window..];
    Some(tail.iter().sum::<f64>() / window as f64)
}

/// Percentage change, guarding the division: 0 whenever `previous <= 0`
fn percent_change(change: f64, previous: f64) -> f64 {
    if previous > 0.0 {
        change / previous * 100.0
    } else {
        0.0
    }
}

/// Sample standard deviation of close-to-close returns, in percent
///
/// Needs at least two returns (three closes) to be defined; 0 otherwise.
fn volatility_percent(closes: &[f64]) -> f64 {
    if closes.len() < 2 {
        return 0.0;
    }
    let returns: Vec<f64> = closes
        .windows(2)
        .map(|pair| (pair[1] - pair[0]) / pair[0])
        .collect();
    if returns.len() < 2 {
        return 0.0;
    }

    let mean = returns.iter().sum::<f64>() / returns.len() as f64;
    let variance = returns
        .iter()
        .map(|r| (r - mean).powi(2))
        .sum::<f64>()
        / (returns.len() - 1) as f64;

    variance.sqrt() * 100.0
}
