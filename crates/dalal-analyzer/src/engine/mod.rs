//! Query execution engine
//!
//! Ties the pipeline together: resolve the symbol, fetch market data and
//! web intelligence, derive indicators, build the prompt, generate the
//! analysis and assemble a [`StockReport`] for display.

pub mod insight;
pub mod pipeline;
pub mod report;

pub use insight::InsightGenerator;
pub use pipeline::{Analyzer, Outcome, POPULAR_SYMBOLS, QueryIntent};
pub use report::StockReport;
