//! Layered chart specification derived from a price series
//!
//! The spec carries everything a renderer needs: one candlestick layer,
//! SMA overlays when enough history exists, and a two-color volume layer.
//! Rendering itself happens elsewhere; the CLI can also dump the spec as
//! JSON for external charting.

use crate::market::PriceSeries;
use crate::symbol::TickerSymbol;
use chrono::{DateTime, Utc};
use serde::Serialize;
use ta::{Next, indicators::SimpleMovingAverage};

/// Direction of one bar, used for the two-color volume encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BarDirection {
    /// Close at or above open
    Up,
    /// Close below open
    Down,
}

/// One candlestick
#[derive(Debug, Clone, Serialize)]
pub struct CandlePoint {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// One point of an overlay line
#[derive(Debug, Clone, Serialize)]
pub struct OverlayPoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

/// A moving-average overlay
#[derive(Debug, Clone, Serialize)]
pub struct OverlayLine {
    /// Display label, e.g. "SMA 20"
    pub label: String,

    /// Rolling window width
    pub period: usize,

    /// Points starting at the first bar with a full window
    pub points: Vec<OverlayPoint>,
}

/// One volume bar
#[derive(Debug, Clone, Serialize)]
pub struct VolumeBar {
    pub timestamp: DateTime<Utc>,
    pub volume: u64,
    pub direction: BarDirection,
}

/// Layered chart specification: candles, overlays, volume
#[derive(Debug, Clone, Serialize)]
pub struct ChartSpec {
    pub symbol: String,
    pub candles: Vec<CandlePoint>,
    pub overlays: Vec<OverlayLine>,
    pub volume: Vec<VolumeBar>,
}

/// Builds chart specifications from price series
pub struct ChartBuilder;

impl ChartBuilder {
    /// Build the chart spec, or `None` when the series is empty
    ///
    /// An absent spec is a "data still loading" display state for the
    /// caller, not an error.
    pub fn build(series: &PriceSeries, symbol: &TickerSymbol) -> Option<ChartSpec> {
        if series.is_empty() {
            return None;
        }

        let candles = series
            .bars()
            .iter()
            .map(|bar| CandlePoint {
                timestamp: bar.timestamp,
                open: bar.open,
                high: bar.high,
                low: bar.low,
                close: bar.close,
            })
            .collect();

        let mut overlays = Vec::new();
        if let Some(line) = sma_overlay(series, 20, "SMA 20") {
            overlays.push(line);
        }
        if let Some(line) = sma_overlay(series, 50, "SMA 50") {
            overlays.push(line);
        }

        let volume = series
            .bars()
            .iter()
            .map(|bar| VolumeBar {
                timestamp: bar.timestamp,
                volume: bar.volume,
                direction: if bar.close >= bar.open {
                    BarDirection::Up
                } else {
                    BarDirection::Down
                },
            })
            .collect();

        Some(ChartSpec {
            symbol: symbol.as_str().to_string(),
            candles,
            overlays,
            volume,
        })
    }
}

/// Trailing rolling mean over `period` closes; `None` with less history.
/// Points start where the window first fills.
fn sma_overlay(series: &PriceSeries, period: usize, label: &str) -> Option<OverlayLine> {
    if series.len() < period {
        return None;
    }
    let mut sma = SimpleMovingAverage::new(period).ok()?;

    let mut points = Vec::with_capacity(series.len() - period + 1);
    for (i, bar) in series.bars().iter().enumerate() {
        let value = sma.next(bar.close);
        if i + 1 >= period {
            points.push(OverlayPoint {
                timestamp: bar.timestamp,
                value,
            });
        }
    }

    Some(OverlayLine {
        label: label.to_string(),
        period,
        points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::Bar;
    use chrono::DateTime;

    fn series(closes: &[f64]) -> PriceSeries {
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Bar {
                timestamp: DateTime::from_timestamp(86_400 * i as i64, 0).unwrap(),
                open: if i % 2 == 0 { close - 0.5 } else { close + 0.5 },
                high: close + 1.0,
                low: close - 1.0,
                close,
                volume: 500,
            })
            .collect();
        PriceSeries::new(bars)
    }

    fn symbol() -> TickerSymbol {
        TickerSymbol::parse("RELIANCE.NS").unwrap()
    }

    #[test]
    fn test_empty_series_has_no_spec() {
        assert!(ChartBuilder::build(&PriceSeries::empty(), &symbol()).is_none());
    }

    #[test]
    fn test_sixty_bar_series_has_both_overlays() {
        let closes: Vec<f64> = (1..=60).map(f64::from).collect();
        let spec = ChartBuilder::build(&series(&closes), &symbol()).unwrap();

        assert_eq!(spec.candles.len(), 60);
        assert_eq!(spec.overlays.len(), 2);

        let sma20 = &spec.overlays[0];
        assert_eq!(sma20.period, 20);
        assert_eq!(sma20.points.len(), 41);
        // Trailing mean of 41..=60
        assert!((sma20.points.last().unwrap().value - 50.5).abs() < 1e-9);

        let sma50 = &spec.overlays[1];
        assert_eq!(sma50.period, 50);
        assert_eq!(sma50.points.len(), 11);
        // Trailing mean of 11..=60
        assert!((sma50.points.last().unwrap().value - 35.5).abs() < 1e-9);
    }

    #[test]
    fn test_thirty_bar_series_has_only_sma20() {
        let closes: Vec<f64> = (1..=30).map(f64::from).collect();
        let spec = ChartBuilder::build(&series(&closes), &symbol()).unwrap();

        assert_eq!(spec.overlays.len(), 1);
        assert_eq!(spec.overlays[0].label, "SMA 20");
    }

    #[test]
    fn test_short_series_has_candles_and_volume_but_no_overlays() {
        let spec = ChartBuilder::build(&series(&[1.0, 2.0, 3.0]), &symbol()).unwrap();

        assert_eq!(spec.candles.len(), 3);
        assert!(spec.overlays.is_empty());
        assert_eq!(spec.volume.len(), 3);
    }

    #[test]
    fn test_volume_direction_tracks_close_vs_open() {
        // Even indices open below close (up), odd ones open above (down)
        let spec = ChartBuilder::build(&series(&[10.0, 10.0, 10.0]), &symbol()).unwrap();

        assert_eq!(spec.volume[0].direction, BarDirection::Up);
        assert_eq!(spec.volume[1].direction, BarDirection::Down);
        assert_eq!(spec.volume[2].direction, BarDirection::Up);
    }

    #[test]
    fn test_spec_serializes() {
        let closes: Vec<f64> = (1..=25).map(f64::from).collect();
        let spec = ChartBuilder::build(&series(&closes), &symbol()).unwrap();

        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["symbol"], "RELIANCE.NS");
        assert_eq!(json["volume"][0]["direction"], "up");
        assert!(json["overlays"].as_array().unwrap().len() == 1);
    }
}
