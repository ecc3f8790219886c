//! AI-assisted analysis pipeline for NSE/BSE equities
//!
//! This crate turns a free-text stock name into a full analysis report:
//!
//! - Symbol resolution against a static alias table of major Indian
//!   listings, with a web-search fallback
//! - Price history (Yahoo Finance) and company fundamentals, fetched
//!   concurrently with a web-intelligence sweep of news and search results
//! - Derived indicators (change, SMA-20/50, volumes, volatility) with a
//!   fundamentals fallback when no history is available
//! - A structured prompt rendered for the Groq-hosted analysis model
//! - A layered chart specification (candles, SMA overlays, colored volume)
//!
//! Every external call fails soft at its component boundary: provider
//! errors degrade to empty values or in-band text, and only an unresolvable
//! symbol or an entirely empty market snapshot stops a query.
//!
//! # Example
//!
//! ```rust,ignore
//! use dalal_analyzer::{Analyzer, AnalyzerConfig};
//! use dalal_analyzer::engine::{Outcome, QueryIntent};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let analyzer = Analyzer::new(AnalyzerConfig::from_env())?;
//!
//!     let symbol = analyzer.resolve("HDFC Bank").await.expect("known alias");
//!     let intent = QueryIntent::ShowSymbolAnalysis {
//!         symbol,
//!         company_hint: "HDFC Bank".to_string(),
//!     };
//!
//!     if let Outcome::Analysis(report) = analyzer.execute(intent).await? {
//!         println!("{}", report.analysis);
//!     }
//!     Ok(())
//! }
//! ```

pub mod chart;
pub mod config;
pub mod engine;
pub mod error;
pub mod indicators;
pub mod market;
pub mod prompts;
pub mod resolver;
pub mod symbol;

// Re-export main types for convenience
pub use chart::{ChartBuilder, ChartSpec};
pub use config::AnalyzerConfig;
pub use engine::{Analyzer, InsightGenerator, Outcome, QueryIntent, StockReport};
pub use error::{AnalyzerError, Result};
pub use indicators::IndicatorSet;
pub use market::{Fundamentals, MarketDataClient, MarketSnapshot, PriceSeries};
pub use resolver::{AliasTable, SymbolResolver};
pub use symbol::TickerSymbol;
