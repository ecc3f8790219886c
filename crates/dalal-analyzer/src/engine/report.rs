//! Per-query analysis report

use crate::chart::ChartSpec;
use crate::indicators::IndicatorSet;
use crate::market::Fundamentals;
use crate::symbol::TickerSymbol;
use dalal_intel::WebIntelligence;

/// Everything one query produces for display
///
/// Built fresh per query and discarded after the response is rendered;
/// nothing in here is shared across queries.
#[derive(Debug, Clone)]
pub struct StockReport {
    /// The resolved symbol
    pub symbol: TickerSymbol,

    /// Display name: the provider's long name when available, the user's
    /// input otherwise
    pub company_name: String,

    /// Derived price and volume indicators
    pub indicators: IndicatorSet,

    /// Raw fundamentals for the company-information sections
    pub fundamentals: Fundamentals,

    /// Chart specification; absent while there is no price history
    pub chart: Option<ChartSpec>,

    /// Aggregated news and search results
    pub intel: WebIntelligence,

    /// Model-generated analysis text (or an in-band error string)
    pub analysis: String,
}
