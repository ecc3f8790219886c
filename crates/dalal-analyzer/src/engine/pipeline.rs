//! The per-query pipeline
//!
//! One query flows resolution -> {market data, web intelligence} (joined
//! concurrently) -> indicator derivation -> prompt -> model -> report. The
//! only process-wide state is the immutable alias table inside the
//! resolver; everything derived is scoped to the query and dropped with
//! the report.

use crate::chart::ChartBuilder;
use crate::config::AnalyzerConfig;
use crate::engine::insight::InsightGenerator;
use crate::engine::report::StockReport;
use crate::error::{AnalyzerError, Result};
use crate::indicators::IndicatorSet;
use crate::market::MarketDataClient;
use crate::prompts::build_analysis_prompt;
use crate::resolver::{AliasTable, SymbolResolver};
use crate::symbol::TickerSymbol;
use dalal_intel::SerperClient;
use dalal_llm::providers::{GroqConfig, GroqProvider};
use std::sync::Arc;
use tracing::info;

/// Candidate pool for the daily top-picks recommendation
pub const POPULAR_SYMBOLS: [&str; 10] = [
    "RELIANCE.NS",
    "TCS.NS",
    "HDFCBANK.NS",
    "INFY.NS",
    "ICICIBANK.NS",
    "BHARTIARTL.NS",
    "SBIN.NS",
    "BAJFINANCE.NS",
    "LT.NS",
    "ITC.NS",
];

/// What one user request asks the pipeline to do
///
/// Request-scoped and passed through the pipeline explicitly; there is no
/// ambient mode flag anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryIntent {
    /// Nothing requested yet
    Idle,

    /// Recommend today's best picks over the popular candidate pool
    ShowBestPicks,

    /// Deep analysis of one resolved symbol
    ShowSymbolAnalysis {
        symbol: TickerSymbol,
        /// The company name as the user typed it; seeds the web queries
        company_hint: String,
    },
}

/// Pipeline output for one intent
#[derive(Debug)]
pub enum Outcome {
    /// Nothing to show
    Idle,

    /// Recommendation text (or an in-band error string)
    BestPicks(String),

    /// Full single-stock report
    Analysis(Box<StockReport>),
}

/// The assembled pipeline
pub struct Analyzer {
    resolver: SymbolResolver,
    market: MarketDataClient,
    intel: Arc<SerperClient>,
    insight: InsightGenerator,
    config: AnalyzerConfig,
}

impl Analyzer {
    /// Assemble the pipeline from a validated configuration
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        config.validate()?;

        let intel = Arc::new(SerperClient::new(&config.serper_api_key));
        let resolver = SymbolResolver::new(AliasTable::standard()).with_search(intel.clone());
        let market = MarketDataClient::new(config.request_timeout)?;

        let provider = GroqProvider::with_config(GroqConfig::new(&config.groq_api_key))
            .map_err(|e| AnalyzerError::Config(e.to_string()))?;
        let insight = InsightGenerator::new(Arc::new(provider), &config.model);

        Ok(Self {
            resolver,
            market,
            intel,
            insight,
            config,
        })
    }

    /// Resolve free text to an exchange-qualified symbol
    pub async fn resolve(&self, input: &str) -> Option<TickerSymbol> {
        self.resolver.resolve(input).await
    }

    /// Resolve free text, treating exhaustion of every fallback as the
    /// user-visible resolution failure
    pub async fn resolve_required(&self, input: &str) -> Result<TickerSymbol> {
        self.resolve(input)
            .await
            .ok_or_else(|| AnalyzerError::SymbolNotFound(input.to_string()))
    }

    /// Execute one request-scoped intent
    pub async fn execute(&self, intent: QueryIntent) -> Result<Outcome> {
        match intent {
            QueryIntent::Idle => Ok(Outcome::Idle),
            QueryIntent::ShowBestPicks => {
                let text = self.insight.generate_top_picks(&POPULAR_SYMBOLS).await;
                Ok(Outcome::BestPicks(text))
            }
            QueryIntent::ShowSymbolAnalysis {
                symbol,
                company_hint,
            } => {
                let report = self.analyze(&symbol, &company_hint).await?;
                Ok(Outcome::Analysis(Box::new(report)))
            }
        }
    }

    /// Run the full analysis pipeline for one resolved symbol
    ///
    /// Market data and web intelligence are independent and fetched
    /// concurrently. The only hard stop here is an all-empty snapshot.
    pub async fn analyze(
        &self,
        symbol: &TickerSymbol,
        company_hint: &str,
    ) -> Result<StockReport> {
        let company = if company_hint.trim().is_empty() {
            symbol.base().to_string()
        } else {
            title_case(company_hint)
        };
        info!("Analyzing {symbol} ({company})");

        let (snapshot, intel) = tokio::join!(
            self.market
                .fetch(symbol, &self.config.period, &self.config.interval),
            self.intel.gather(symbol.as_str(), &company),
        );

        if snapshot.is_empty() {
            return Err(AnalyzerError::NoData(symbol.to_string()));
        }

        let indicators = IndicatorSet::derive(&snapshot.series, &snapshot.fundamentals);
        let prompt =
            build_analysis_prompt(symbol, &company, &indicators, &snapshot.fundamentals, &intel)?;
        let analysis = self.insight.generate(&prompt).await;
        let chart = ChartBuilder::build(&snapshot.series, symbol);

        let company_name = snapshot
            .fundamentals
            .text("longName")
            .map_or(company, str::to_string);

        Ok(StockReport {
            symbol: symbol.clone(),
            company_name,
            indicators,
            fundamentals: snapshot.fundamentals,
            chart,
            intel,
            analysis,
        })
    }

    /// Today's top-picks recommendation
    pub async fn best_picks(&self) -> String {
        self.insight.generate_top_picks(&POPULAR_SYMBOLS).await
    }
}

/// Title-case each word of the user's free-text input
fn title_case(input: &str) -> String {
    input
        .trim()
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> Analyzer {
        let config = AnalyzerConfig::builder()
            .groq_api_key("test")
            .serper_api_key("test")
            .build()
            .unwrap();
        Analyzer::new(config).unwrap()
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("hdfc bank"), "Hdfc Bank");
        assert_eq!(title_case("  reliance   industries "), "Reliance Industries");
        assert_eq!(title_case("TCS"), "Tcs");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_popular_candidates() {
        assert_eq!(POPULAR_SYMBOLS.len(), 10);
        assert!(POPULAR_SYMBOLS.iter().all(|s| s.ends_with(".NS")));
    }

    #[tokio::test]
    async fn test_end_to_end_alias_resolution_without_network() {
        // "HDFC Bank" must resolve through the alias table alone
        let analyzer = analyzer();
        let symbol = analyzer.resolve("HDFC Bank").await.unwrap();
        assert_eq!(symbol.as_str(), "HDFCBANK.NS");
    }

    #[tokio::test]
    async fn test_resolve_required_surfaces_resolution_failure() {
        let analyzer = analyzer();
        let outcome = analyzer.resolve_required("   ").await;
        assert!(matches!(outcome, Err(AnalyzerError::SymbolNotFound(_))));
    }

    #[tokio::test]
    async fn test_idle_intent_is_a_no_op() {
        let analyzer = analyzer();
        let outcome = analyzer.execute(QueryIntent::Idle).await.unwrap();
        assert!(matches!(outcome, Outcome::Idle));
    }

    #[test]
    fn test_intents_are_comparable() {
        let symbol = TickerSymbol::parse("ITC.NS").unwrap();
        let intent = QueryIntent::ShowSymbolAnalysis {
            symbol: symbol.clone(),
            company_hint: "itc".to_string(),
        };
        assert_eq!(
            intent,
            QueryIntent::ShowSymbolAnalysis {
                symbol,
                company_hint: "itc".to_string(),
            }
        );
        assert_ne!(QueryIntent::Idle, QueryIntent::ShowBestPicks);
    }
}
